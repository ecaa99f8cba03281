//! Search node and edge structures.
//!
//! Uses arena-based allocation with index references (NodeId) for efficiency
//! and serializability. Edge scores are always expressed from the maximizing
//! player's point of view.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Path of edge indices from the root to a node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeLabel(Vec<u32>);

impl NodeLabel {
    /// The root label (empty path).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path by one edge.
    pub fn push(&mut self, edge_idx: usize) {
        self.0.push(u32::try_from(edge_idx).unwrap_or(u32::MAX));
    }

    /// Edge indices from the root.
    #[must_use]
    pub fn path(&self) -> &[u32] {
        &self.0
    }

    /// Number of edges between the root and this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "_")?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}

/// Edge representing a move from a parent node to a child.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge<M> {
    /// The move this edge represents.
    pub mv: M,

    /// Child node (NONE if not yet created).
    pub child: NodeId,

    /// Estimated value of the move for the maximizing player. Starts as the
    /// estimator's output and is replaced by the child's backed-up value.
    pub score: f32,

    /// Number of iterations that descended through this edge.
    pub visits: u32,

    /// The child's subtree has nothing left to evaluate.
    pub exhausted: bool,
}

impl<M> Edge<M> {
    /// Create a new edge with its estimated score.
    pub fn new(mv: M, score: f32) -> Self {
        Self {
            mv,
            child: NodeId::NONE,
            score,
            visits: 0,
            exhausted: false,
        }
    }

    /// Check if this edge has a child node.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A node in the search tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode<M> {
    /// Player to move at this node.
    pub mover: PlayerId,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Total visits to this node.
    pub visits: u32,

    /// Backed-up value for the maximizing player.
    pub value: f32,

    /// `value` holds an evaluation (heuristic, terminal or backed-up).
    pub evaluated: bool,

    /// Legal moves have been scored and stored as edges.
    pub expanded: bool,

    /// Is this a terminal game state?
    pub is_terminal: bool,

    /// Nothing below this node is left to evaluate: a terminal or
    /// depth-limited leaf, or an expanded node whose edges are all exhausted.
    pub exhausted: bool,

    /// Outgoing edges (legal moves).
    /// SmallVec optimizes for typical branching factor < 8.
    pub edges: SmallVec<[Edge<M>; 8]>,
}

impl<M> SearchNode<M> {
    /// Create a new node.
    pub fn new(mover: PlayerId, depth: u16) -> Self {
        Self {
            mover,
            depth,
            visits: 0,
            value: 0.0,
            evaluated: false,
            expanded: false,
            is_terminal: false,
            exhausted: false,
            edges: SmallVec::new(),
        }
    }

    /// Create a root node.
    pub fn root(mover: PlayerId) -> Self {
        Self::new(mover, 0)
    }

    /// Whether the node's mover picks the highest score.
    #[must_use]
    pub fn is_maximising(&self, maximising: PlayerId) -> bool {
        self.mover == maximising
    }

    /// Index of the best edge for this node's mover; the first one wins ties.
    ///
    /// The maximizing player takes the highest score, every other mover the
    /// lowest.
    #[must_use]
    pub fn best_edge(&self, maximising: PlayerId) -> Option<usize> {
        self.best_edge_where(maximising, |_| true)
    }

    /// Like [`best_edge`](Self::best_edge), skipping exhausted edges.
    #[must_use]
    pub fn best_open_edge(&self, maximising: PlayerId) -> Option<usize> {
        self.best_edge_where(maximising, |e| !e.exhausted)
    }

    fn best_edge_where(
        &self,
        maximising: PlayerId,
        keep: impl Fn(&Edge<M>) -> bool,
    ) -> Option<usize> {
        let maximise = self.is_maximising(maximising);
        let mut best: Option<usize> = None;
        for (i, edge) in self.edges.iter().enumerate().filter(|(_, e)| keep(*e)) {
            let better = match best {
                None => true,
                Some(b) => {
                    let ord = edge.score.total_cmp(&self.edges[b].score);
                    if maximise {
                        ord == Ordering::Greater
                    } else {
                        ord == Ordering::Less
                    }
                }
            };
            if better {
                best = Some(i);
            }
        }
        best
    }

    /// Like [`best_edge`](Self::best_edge), but ties go to the most visited edge.
    #[must_use]
    pub fn most_trusted_edge(&self, maximising: PlayerId) -> Option<usize> {
        let best_score = self.edges[self.best_edge(maximising)?].score;
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.score.total_cmp(&best_score) == Ordering::Equal)
            .fold(None, |acc: Option<(usize, u32)>, (i, e)| match acc {
                Some((_, visits)) if visits >= e.visits => acc,
                _ => Some((i, e.visits)),
            })
            .map(|(i, _)| i)
    }

    /// Value of the best edge for this node's mover.
    #[must_use]
    pub fn best_value(&self, maximising: PlayerId) -> Option<f32> {
        self.best_edge(maximising).map(|i| self.edges[i].score)
    }

    /// Indices of the edges that are not exhausted.
    pub fn open_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.exhausted)
            .map(|(i, _)| i)
    }
}
