//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references so the tree can
//! be cleared and rebuilt between searches without reallocating.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, SearchNode};
use crate::core::PlayerId;

/// Arena-based best-first search tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree<M> {
    /// All nodes in the tree.
    nodes: Vec<SearchNode<M>>,

    /// The root node ID (always 0 after initialization).
    root: NodeId,
}

impl<M> SearchTree<M> {
    /// Create a new tree with a root node.
    pub fn new(root_mover: PlayerId) -> Self {
        Self::with_capacity(root_mover, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root_mover: PlayerId, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(root_mover));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<M> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<M> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: SearchNode<M>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear the tree and reset with a new root.
    pub fn reset(&mut self, root_mover: PlayerId) {
        self.nodes.clear();
        self.nodes.push(SearchNode::root(root_mover));
        self.root = NodeId::new(0);
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode<M> {
        self.get(self.root)
    }

    /// Get the root node mutably.
    pub fn root_node_mut(&mut self) -> &mut SearchNode<M> {
        self.get_mut(self.root)
    }

    /// Moves along the best edges from the root while children exist.
    #[must_use]
    pub fn principal_variation(&self, maximising: PlayerId) -> Vec<&M> {
        let mut line = Vec::new();
        let mut current = self.root;
        while let Some(idx) = self.get(current).best_edge(maximising) {
            let edge = &self.get(current).edges[idx];
            line.push(&edge.mv);
            if !edge.is_expanded() {
                break;
            }
            current = edge.child;
        }
        line
    }
}
