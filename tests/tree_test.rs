//! Structural properties of Tree, checked over several tree shapes

use std::collections::HashSet;

use rstest::rstest;
use treemenu::util::testing;
use treemenu::{NodeId, Tree};

/// Builds a tree where `parents[i]` is the position of the parent of node `i + 1`.
/// Node 0 is the root; node `i` holds the value `n{i}`.
fn build(parents: &[usize]) -> (Tree<String>, Vec<NodeId>) {
    testing::init_test_setup();
    let mut tree = Tree::new("n0".to_string());
    let mut ids = vec![tree.root()];
    for (i, &parent) in parents.iter().enumerate() {
        let id = tree
            .add_child(ids[parent], format!("n{}", i + 1))
            .expect("parent exists");
        ids.push(id);
    }
    (tree, ids)
}

// ============================================================
// Parent / depth / path
// ============================================================

#[rstest]
#[case::single(&[])]
#[case::chain(&[0, 1, 2, 3])]
#[case::star(&[0, 0, 0, 0])]
#[case::mixed(&[0, 0, 1, 1, 2, 4, 4, 0])]
fn given_tree_when_finding_parents_then_matches_construction(#[case] parents: &[usize]) {
    let (tree, ids) = build(parents);
    assert_eq!(tree.find_depth(tree.root()), 1);
    assert_eq!(tree.find_parent(tree.root()), None);
    for (i, &parent) in parents.iter().enumerate() {
        assert_eq!(tree.find_parent(ids[i + 1]), Some(ids[parent]));
        assert_eq!(tree.find_depth(ids[i + 1]), tree.find_depth(ids[parent]) + 1);
    }
}

#[rstest]
#[case::single(&[])]
#[case::chain(&[0, 1, 2, 3])]
#[case::mixed(&[0, 0, 1, 1, 2, 4, 4, 0])]
fn given_any_node_when_finding_path_then_ends_at_node_and_has_depth_length(
    #[case] parents: &[usize],
) {
    let (tree, ids) = build(parents);
    for &id in &ids {
        let path = tree.find_path(id);
        assert_eq!(path.last().copied(), tree.value(id));
        assert_eq!(path.len(), tree.find_depth(id));
        assert_eq!(path.first().map(|v| v.as_str()), Some("n0"));
    }
}

// ============================================================
// Height
// ============================================================

#[rstest]
#[case::single(&[], 0)]
#[case::chain(&[0, 1, 2, 3], 4)]
#[case::star(&[0, 0, 0, 0], 1)]
#[case::mixed(&[0, 0, 1, 1, 2, 4, 4, 0], 3)]
fn given_tree_when_finding_height_then_follows_recursive_definition(
    #[case] parents: &[usize],
    #[case] expected_root_height: usize,
) {
    let (tree, ids) = build(parents);
    assert_eq!(tree.find_height(tree.root()), expected_root_height);
    for &id in &ids {
        let node = tree.get_node(id).unwrap();
        let expected = node
            .children()
            .iter()
            .map(|&child| tree.find_height(child) + 1)
            .max()
            .unwrap_or(0);
        assert_eq!(tree.find_height(id), expected);
    }
}

// ============================================================
// Leaves / internal nodes / edges
// ============================================================

#[rstest]
#[case::single(&[])]
#[case::chain(&[0, 1, 2, 3])]
#[case::star(&[0, 0, 0, 0])]
#[case::mixed(&[0, 0, 1, 1, 2, 4, 4, 0])]
fn given_tree_then_leaves_and_internal_nodes_partition_all_nodes(#[case] parents: &[usize]) {
    let (tree, ids) = build(parents);
    let leaves: HashSet<NodeId> = tree.list_leaves(tree.root()).unwrap().into_iter().collect();
    let internal: HashSet<NodeId> = tree
        .list_internal_nodes(tree.root())
        .unwrap()
        .into_iter()
        .collect();
    let all: HashSet<NodeId> = ids.iter().copied().collect();

    assert!(leaves.is_disjoint(&internal));
    assert_eq!(&leaves | &internal, all);
    assert_eq!(tree.node_count(), ids.len());
}

#[rstest]
#[case::single(&[])]
#[case::chain(&[0, 1, 2, 3])]
#[case::star(&[0, 0, 0, 0])]
#[case::mixed(&[0, 0, 1, 1, 2, 4, 4, 0])]
fn given_tree_then_edge_count_is_node_count_minus_one(#[case] parents: &[usize]) {
    let (tree, _) = build(parents);
    assert_eq!(tree.list_edges().len(), tree.node_count() - 1);
}

#[test]
fn given_two_branches_when_listing_edges_then_later_branch_expands_first() {
    testing::init_test_setup();
    //     A
    //   /   \
    //  B     C
    // / \    |
    // D  E   F
    let mut tree = Tree::new("A");
    let a = tree.root();
    let b = tree.add_child(a, "B").unwrap();
    let c = tree.add_child(a, "C").unwrap();
    tree.add_child(b, "D").unwrap();
    tree.add_child(b, "E").unwrap();
    tree.add_child(c, "F").unwrap();

    let edges: Vec<String> = tree.list_edges().iter().map(|e| e.to_string()).collect();
    assert_eq!(edges, vec!["A -> B", "A -> C", "C -> F", "B -> D", "B -> E"]);
}

// ============================================================
// Worked example: A(B(D), C)
// ============================================================

#[test]
fn given_abcd_scenario_then_queries_match_walkthrough() {
    testing::init_test_setup();
    let mut tree = Tree::new("A".to_string());
    let a = tree.root();
    let b = tree.add_child(a, "B".to_string()).unwrap();
    let c = tree.add_child(a, "C".to_string()).unwrap();
    let d = tree.add_child(b, "D".to_string()).unwrap();

    assert_eq!(tree.list_leaves(a).unwrap(), vec![d, c]);
    assert_eq!(tree.find_height(a), 2);
    assert_eq!(tree.find_depth(d), 3);
    assert_eq!(tree.find_siblings(b), vec![c]);
    assert_eq!(tree.find_node(a, &"Z".to_string()).unwrap(), None);
    assert_eq!(tree.find_node(a, &"D".to_string()).unwrap(), Some(d));
}

#[test]
fn given_stale_parent_when_adding_child_then_tree_is_unchanged() {
    testing::init_test_setup();
    let mut tree = Tree::new("A".to_string());
    let stale = tree.root();
    tree.reset_root("R".to_string());
    let before = tree.display(tree.root(), 0).unwrap();

    let result = tree.add_child(stale, "X".to_string());

    assert!(matches!(result, Err(treemenu::TreeError::InvalidArgument(_))));
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.display(tree.root(), 0).unwrap(), before);
}

#[test]
fn given_duplicate_values_when_finding_node_then_first_in_preorder_wins() {
    testing::init_test_setup();
    let mut tree = Tree::new("A");
    let a = tree.root();
    let b = tree.add_child(a, "B").unwrap();
    let deep_x = tree.add_child(b, "X").unwrap();
    let shallow_x = tree.add_child(a, "X").unwrap();

    assert_eq!(tree.find_node(a, &"X").unwrap(), Some(deep_x));
    assert_eq!(tree.find_node(shallow_x, &"X").unwrap(), Some(shallow_x));
    assert_eq!(tree.find_depth(deep_x), 3);
    assert_eq!(tree.find_depth(shallow_x), 2);
}

#[test]
fn given_subtree_when_source_grows_then_subtree_is_unaffected() {
    testing::init_test_setup();
    let mut tree = Tree::new("A");
    let a = tree.root();
    let b = tree.add_child(a, "B").unwrap();
    tree.add_child(b, "C").unwrap();

    let subtree = tree.find_subtree(b).unwrap();
    tree.add_child(b, "D").unwrap();

    assert_eq!(subtree.node_count(), 2);
    assert_eq!(subtree.display(subtree.root(), 0).unwrap(), "B\n C\n");
    assert_eq!(tree.display(b, 0).unwrap(), "B\n C\n D\n");
}
