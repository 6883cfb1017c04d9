use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, warn};

use crate::domain::error::{TreeError, TreeResult};

/// Handle to a node stored in a [`Tree`].
///
/// Handles are generational: once a node is discarded (see [`Tree::reset_root`])
/// its handle never resolves again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}@{}", slot, generation)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Payload, used for display and value lookup only
    value: T,
    /// Parent handle, None for the root
    parent: Option<NodeId>,
    /// Child handles in insertion order
    children: Vec<NodeId>,
}

impl<T> TreeNode<T> {
    fn new(value: T, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A direct parent-child relationship, with both values stringified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub parent: String,
    pub child: String,
}

impl Edge {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

/// Arena-based rooted, ordered, multi-way tree.
///
/// The tree always has a root. Nodes are only ever created as children of an
/// existing node, so every node is reachable from the root through exactly one
/// path and cycles cannot be built. Each node keeps a non-owning parent handle,
/// which makes parent, depth, path and sibling queries O(depth).
///
/// Value equality is only used for display and [`Tree::find_node`]; structural
/// relationships are always decided by [`NodeId`], so duplicate values are fine.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    arena: Arena<TreeNode<T>>,
    root: NodeId,
}

impl<T> Tree<T> {
    pub fn new(root_value: T) -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(TreeNode::new(root_value, None)));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Whether `node` resolves to a live node of this tree.
    pub fn contains(&self, node: NodeId) -> bool {
        self.arena.contains(node.0)
    }

    pub fn get_node(&self, node: NodeId) -> Option<&TreeNode<T>> {
        self.arena.get(node.0)
    }

    pub fn value(&self, node: NodeId) -> Option<&T> {
        self.get_node(node).map(TreeNode::value)
    }

    fn node(&self, node: NodeId) -> TreeResult<&TreeNode<T>> {
        self.get_node(node).ok_or(TreeError::InvalidNode(node))
    }

    /// Appends a new child holding `value` to the end of `parent`'s children.
    ///
    /// Fails with [`TreeError::InvalidArgument`] when `parent` does not resolve;
    /// the tree is left untouched in that case.
    #[instrument(level = "trace", skip(self, value))]
    pub fn add_child(&mut self, parent: NodeId, value: T) -> TreeResult<NodeId> {
        if !self.contains(parent) {
            return Err(TreeError::InvalidArgument(format!(
                "parent {} is not a node of this tree",
                parent
            )));
        }
        let child = NodeId(self.arena.insert(TreeNode::new(value, Some(parent))));
        if let Some(parent_node) = self.arena.get_mut(parent.0) {
            parent_node.children.push(child);
        }
        Ok(child)
    }

    /// Replaces the whole tree with a single childless root holding `value`.
    ///
    /// Every previously issued handle becomes stale.
    #[instrument(level = "trace", skip(self, value))]
    pub fn reset_root(&mut self, value: T) -> NodeId {
        // remove() bumps the arena generation, clear() would not
        let discarded: Vec<Index> = self.arena.iter().map(|(idx, _)| idx).collect();
        for idx in &discarded {
            self.arena.remove(*idx);
        }
        self.root = NodeId(self.arena.insert(TreeNode::new(value, None)));
        debug!(discarded = discarded.len(), root = %self.root, "root replaced");
        self.root
    }

    /// Pre-order iterator over the whole tree.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order iterator over the subtree rooted at `node`; empty if `node` does not resolve.
    pub fn iter_from(&self, node: NodeId) -> TreeIterator<'_, T> {
        TreeIterator::new(self, node)
    }

    /// Post-order iterator over the subtree rooted at `node`; empty if `node` does not resolve.
    pub fn iter_postorder_from(&self, node: NodeId) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self, node)
    }

    /// Siblings of `node` in their original order, `node` itself excluded.
    ///
    /// The root, an only child and an unknown handle all have no siblings.
    #[instrument(level = "trace", skip(self))]
    pub fn find_siblings(&self, node: NodeId) -> Vec<NodeId> {
        let children = self
            .find_parent(node)
            .and_then(|parent| self.get_node(parent))
            .map(TreeNode::children)
            .unwrap_or_default();

        if children.len() < 2 {
            debug!(%node, "No siblings.");
            return Vec::new();
        }
        debug!(%node, "Siblings of node");
        children
            .iter()
            .copied()
            .filter(|&child| child != node)
            .collect()
    }

    /// Leaves of the subtree rooted at `node`, in pre-order.
    ///
    /// `node` must resolve.
    #[instrument(level = "trace", skip(self))]
    pub fn list_leaves(&self, node: NodeId) -> TreeResult<Vec<NodeId>> {
        self.node(node)?;
        Ok(self
            .iter_from(node)
            .filter(|(_, n)| n.is_leaf())
            .map(|(id, _)| id)
            .collect())
    }

    /// Internal nodes of the subtree rooted at `node`, in pre-order.
    ///
    /// `node` must resolve.
    #[instrument(level = "trace", skip(self))]
    pub fn list_internal_nodes(&self, node: NodeId) -> TreeResult<Vec<NodeId>> {
        if self.node(node)?.is_leaf() {
            debug!(%node, "No internal nodes found.");
            return Ok(Vec::new());
        }
        Ok(self
            .iter_from(node)
            .filter(|(_, n)| !n.is_leaf())
            .map(|(id, _)| id)
            .collect())
    }

    /// 1-based depth: the root has depth 1, an unknown handle depth 0.
    #[instrument(level = "trace", skip(self))]
    pub fn find_depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = Some(node).filter(|&id| self.contains(id));
        while let Some(id) = current {
            depth += 1;
            current = self.find_parent(id);
        }
        depth
    }

    /// Edge count of the longest downward path from `node` to a leaf.
    ///
    /// Leaves and unknown handles have height 0.
    #[instrument(level = "trace", skip(self))]
    pub fn find_height(&self, node: NodeId) -> usize {
        let mut heights: HashMap<NodeId, usize> = HashMap::new();
        for (id, current) in self.iter_postorder_from(node) {
            let height = current
                .children
                .iter()
                .filter_map(|child| heights.get(child))
                .map(|h| h + 1)
                .max()
                .unwrap_or(0);
            heights.insert(id, height);
        }
        heights.get(&node).copied().unwrap_or(0)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn find_parent(&self, node: NodeId) -> Option<NodeId> {
        self.get_node(node).and_then(TreeNode::parent)
    }

    /// Values from the root down to and including `node`; empty for an unknown handle.
    #[instrument(level = "trace", skip(self))]
    pub fn find_path(&self, node: NodeId) -> Vec<&T> {
        let mut path = Vec::new();
        let mut current = self.get_node(node);
        while let Some(n) = current {
            path.push(&n.value);
            current = n.parent.and_then(|parent| self.get_node(parent));
        }
        path.reverse();
        path
    }
}

impl<T: PartialEq> Tree<T> {
    /// First node in pre-order below (and including) `node` whose value equals `target`.
    ///
    /// `node` must resolve.
    #[instrument(level = "trace", skip(self, target))]
    pub fn find_node(&self, node: NodeId, target: &T) -> TreeResult<Option<NodeId>> {
        self.node(node)?;
        Ok(self
            .iter_from(node)
            .find(|(_, n)| n.value == *target)
            .map(|(id, _)| id))
    }
}

impl<T: Clone> Tree<T> {
    /// Independently owned copy of the subtree rooted at `node`.
    #[instrument(level = "trace", skip(self))]
    pub fn find_subtree(&self, node: NodeId) -> TreeResult<Tree<T>> {
        let source = self.node(node)?;
        let mut subtree = Tree::new(source.value.clone());
        let mut copies = HashMap::from([(node, subtree.root())]);

        // pre-order visits every parent before its children
        for (id, current) in self.iter_from(node).skip(1) {
            let parent = current
                .parent
                .and_then(|p| copies.get(&p).copied())
                .ok_or(TreeError::InvalidNode(id))?;
            let copy = subtree.add_child(parent, current.value.clone())?;
            copies.insert(id, copy);
        }
        Ok(subtree)
    }
}

impl<T: fmt::Display> Tree<T> {
    /// Indented pre-order rendering of the subtree rooted at `node`.
    ///
    /// Each line is indented by `level` plus the depth below `node`, one space per unit.
    #[instrument(level = "trace", skip(self))]
    pub fn display(&self, node: NodeId, level: usize) -> TreeResult<String> {
        if !self.contains(node) {
            warn!(%node, "Invalid node.");
            return Err(TreeError::InvalidNode(node));
        }

        let mut out = String::new();
        let mut stack = vec![(node, level)];
        while let Some((id, indent)) = stack.pop() {
            if let Some(current) = self.get_node(id) {
                out.extend(std::iter::repeat(' ').take(indent));
                let _ = writeln!(out, "{}", current.value);
                for &child in current.children.iter().rev() {
                    stack.push((child, indent + 1));
                }
            }
        }
        Ok(out)
    }

    /// All edges of the tree, discovered by stack-based expansion from the root.
    ///
    /// A popped node emits its edges in child order, so the edges of later
    /// siblings' subtrees come before those of earlier siblings.
    #[instrument(level = "trace", skip(self))]
    pub fn list_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(current) = self.get_node(id) {
                for &child in &current.children {
                    if let Some(child_node) = self.get_node(child) {
                        edges.push(Edge::new(
                            current.value.to_string(),
                            child_node.value.to_string(),
                        ));
                    }
                    stack.push(child);
                }
            }
        }
        edges
    }
}

pub struct TreeIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(tree: &'a Tree<T>, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(tree: &'a Tree<T>, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push((start, false));
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
