/*
termtree cannot be fed the arena directly, so the tree is converted into a
termtree::Tree<String> first. The trait is implemented for the whole tree and
for a (tree, node) pair to render any subtree.
 */
use std::collections::HashMap;
use std::fmt::Display;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::arena::{NodeId, Tree};

pub trait TreeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<T: Display> TreeConvert for Tree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        (self, self.root()).to_tree_string()
    }
}

impl<T: Display> TreeConvert for (&Tree<T>, NodeId) {
    fn to_tree_string(&self) -> TermTree<String> {
        let (tree, node_id) = *self;
        if !tree.contains(node_id) {
            return TermTree::new("Invalid node.".to_string());
        }
        build_tree(tree, node_id)
    }
}

/// Builds bottom-up in reverse pre-order, so every child is finished before its parent.
fn build_tree<T: Display>(tree: &Tree<T>, node_id: NodeId) -> TermTree<String> {
    let order: Vec<_> = tree.iter_from(node_id).collect();
    let mut built: HashMap<NodeId, TermTree<String>> = HashMap::with_capacity(order.len());

    for &(id, node) in order.iter().rev() {
        let mut current = TermTree::new(node.value().to_string());
        for child_id in node.children() {
            if let Some(child) = built.remove(child_id) {
                current.push(child);
            }
        }
        built.insert(id, current);
    }
    built
        .remove(&node_id)
        .unwrap_or_else(|| TermTree::new("Invalid node.".to_string()))
}
