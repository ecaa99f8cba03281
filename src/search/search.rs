//! Best-first search driver.
//!
//! Grows a minimax tree one node per iteration. Every iteration descends
//! from the root through the best-scored edges (highest for the maximizing
//! player, lowest for everyone else), asks the move value estimator for the
//! scores of the first unexpanded node's moves, and backs the new value up
//! the path.
//!
//! The estimator's scores are "lazy" values: a move keeps the score the
//! estimator gave it until the search actually expands the resulting state.
//!
//! Subtrees with nothing left to evaluate (terminal or depth-limited leaves
//! and nodes whose edges all lead to such subtrees) are marked exhausted and
//! skipped by the descent, so every iteration evaluates one new node. The
//! search stops early once the root is exhausted.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::analytics::{AnalyticsLog, AnalyticsRecorder};
use crate::core::{GameRng, PlayerId};
use crate::error::SearchError;
use crate::eval::{ActionScorer, HeuristicEvaluator, TerminalAware};
use crate::rules::RulesEngine;

use super::config::{SearchBudget, SearchConfig};
use super::description::SearchTreeDescription;
use super::estimator::{EstimateSink, MoveValueEstimator, NodeRequest};
use super::node::{Edge, NodeId, NodeLabel, SearchNode};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Main best-first search context.
///
/// Generic over the rules engine type. Owns the search tree, the estimator
/// and the analytics of the most recent search.
pub struct BestFirstSearch<E: RulesEngine> {
    /// The game rules engine.
    engine: E,

    /// Search configuration.
    config: SearchConfig,

    /// The search tree.
    tree: SearchTree<E::Move>,

    /// RNG for rank tie-breaking and exploration.
    rng: GameRng,

    /// Scores the moves of every expanded node.
    estimator: MoveValueEstimator<E>,

    /// Samples of the current search.
    analytics: AnalyticsRecorder,

    /// One summary tuple per analysed search.
    analytics_log: AnalyticsLog,

    tree_description: SearchTreeDescription,

    /// Search statistics.
    stats: SearchStats,

    /// Mover at the root of the current search.
    maximising: PlayerId,
}

impl<E: RulesEngine> BestFirstSearch<E> {
    /// Create a new search context with the zero action scorer.
    ///
    /// The heuristic is wrapped in [`TerminalAware`] so finished games reached
    /// during analysis score `±win_score`.
    pub fn new(
        engine: E,
        heuristic: impl HeuristicEvaluator<E> + 'static,
        config: SearchConfig,
    ) -> Self {
        let rng = GameRng::new(config.seed);
        let estimator = MoveValueEstimator::new(
            TerminalAware::new(heuristic, config.win_score),
            config.estimator.clone(),
        );

        Self {
            engine,
            tree: SearchTree::with_capacity(PlayerId::new(0), config.max_nodes.min(1 << 16)),
            config,
            rng,
            estimator,
            analytics: AnalyticsRecorder::new(),
            analytics_log: AnalyticsLog::new(),
            tree_description: SearchTreeDescription::new(),
            stats: SearchStats::new(),
            maximising: PlayerId::new(0),
        }
    }

    /// Set the learned action scorer.
    pub fn with_scorer(mut self, scorer: impl ActionScorer<E> + 'static) -> Self {
        self.estimator = self.estimator.with_scorer(scorer);
        self
    }

    /// Continue an existing analytics log instead of starting empty.
    pub fn with_analytics_log(mut self, log: AnalyticsLog) -> Self {
        self.analytics_log = log;
        self
    }

    /// Choose a move for the player to move in `state`.
    ///
    /// Returns `Ok(None)` when the state is terminal or the mover has no
    /// legal move. A single legal move is returned without searching.
    /// The root expansion happens before the first counted iteration.
    pub fn select_move(
        &mut self,
        state: &E::State,
        budget: &SearchBudget,
    ) -> Result<Option<E::Move>, SearchError> {
        if !budget.is_bounded() {
            return Err(SearchError::UnboundedBudget);
        }

        let start = Instant::now();
        self.stats.reset();
        self.analytics.reset();
        self.tree_description.clear();

        self.maximising = self.engine.mover(state);
        self.tree.reset(self.maximising);

        let chosen = self.search_root(state, budget, start);
        self.stats.time_us = start.elapsed().as_micros() as u64;
        let chosen = chosen?;

        debug!(
            "Search finished: {} iterations, {} nodes, max depth {}, {}us ({:.0} it/s, {:.2} expansions/it)",
            self.stats.iterations,
            self.tree.len(),
            self.stats.max_depth,
            self.stats.time_us,
            self.stats.iterations_per_second(),
            self.stats.avg_nodes_per_iteration()
        );

        self.finish_analysis();
        self.write_tree_description();
        Ok(chosen)
    }

    fn search_root(
        &mut self,
        state: &E::State,
        budget: &SearchBudget,
        start: Instant,
    ) -> Result<Option<E::Move>, SearchError> {
        if self.engine.is_terminal(state).is_some() {
            debug!("Root state is terminal, nothing to search");
            return Ok(None);
        }

        let legal = self.engine.legal_moves(state);
        match legal.len() {
            0 => return Ok(None),
            1 => return Ok(legal.into_iter().next()),
            _ => {}
        }

        let root = self.tree.root();
        self.expand(root, state, legal, &NodeLabel::root())?;

        // A deadline past the end of the clock means no deadline.
        let deadline = budget.max_time.and_then(|limit| start.checked_add(limit));
        while !self.budget_exhausted(budget, deadline) {
            if self.tree.root_node().exhausted {
                debug!("Search tree exhausted after {} iterations", self.stats.iterations);
                break;
            }
            self.iteration(state, budget.max_depth)?;
            self.stats.iterations += 1;
        }

        let root = self.tree.root_node();
        Ok(root
            .most_trusted_edge(self.maximising)
            .map(|idx| root.edges[idx].mv.clone()))
    }

    fn budget_exhausted(&self, budget: &SearchBudget, deadline: Option<Instant>) -> bool {
        budget
            .max_iterations
            .is_some_and(|limit| self.stats.iterations >= limit)
            || deadline.is_some_and(|deadline| Instant::now() >= deadline)
            || self.tree.len() >= self.config.max_nodes
    }

    /// Single iteration: descend, evaluate one new node, back up.
    fn iteration(
        &mut self,
        root_state: &E::State,
        max_depth: Option<u16>,
    ) -> Result<(), SearchError> {
        let mut state = root_state.clone();
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut label = NodeLabel::root();
        let mut current = self.tree.root();

        while self.tree.get(current).expanded {
            let Some(edge_idx) = self.select_edge(current) else {
                break;
            };
            let mv = self.tree.get(current).edges[edge_idx].mv.clone();
            self.engine.apply_move(&mut state, &mv);
            path.push((current, edge_idx));
            label.push(edge_idx);
            current = self.ensure_child(current, edge_idx, &state);
        }

        let node = self.tree.get(current);
        let leaf_value = if node.evaluated {
            node.value
        } else {
            let depth = node.depth;
            self.evaluate_leaf(current, &state, &label, depth, max_depth)?
        };

        self.tree.get_mut(current).visits += 1;
        self.backpropagate(&path, leaf_value);
        Ok(())
    }

    /// Pick the open edge to descend through, `None` if all are exhausted.
    fn select_edge(&mut self, node_id: NodeId) -> Option<usize> {
        let epsilon = self.config.exploration_epsilon;
        if epsilon > 0.0 && self.rng.gen_bool(epsilon) {
            let open: Vec<usize> = self.tree.get(node_id).open_edges().collect();
            if open.len() > 1 {
                return Some(open[self.rng.gen_range_usize(0..open.len())]);
            }
        }
        self.tree.get(node_id).best_open_edge(self.maximising)
    }

    /// Evaluate a node reached for the first time.
    fn evaluate_leaf(
        &mut self,
        node_id: NodeId,
        state: &E::State,
        label: &NodeLabel,
        depth: u16,
        max_depth: Option<u16>,
    ) -> Result<f32, SearchError> {
        if let Some(result) = self.engine.is_terminal(state) {
            let value = result.utility(self.maximising) * self.config.win_score;
            self.stats.terminal_hits += 1;

            let node = self.tree.get_mut(node_id);
            node.is_terminal = true;
            node.evaluated = true;
            node.exhausted = true;
            node.value = value;
            return Ok(value);
        }

        let at_depth_limit = max_depth.is_some_and(|limit| depth >= limit);
        let legal = if at_depth_limit {
            Vec::new()
        } else {
            self.engine.legal_moves(state)
        };

        if legal.is_empty() {
            let (alpha, beta) = self.config.bounds();
            let value = self
                .estimator
                .heuristic_value(&self.engine, state, self.maximising, alpha, beta);
            self.stats.leaf_evaluations += 1;

            let node = self.tree.get_mut(node_id);
            node.evaluated = true;
            node.exhausted = true;
            node.value = value;
            return Ok(value);
        }

        self.expand(node_id, state, legal, label)
    }

    /// Score the legal moves of a node and store them as edges.
    fn expand(
        &mut self,
        node_id: NodeId,
        state: &E::State,
        legal: Vec<E::Move>,
        label: &NodeLabel,
    ) -> Result<f32, SearchError> {
        let (alpha, beta) = self.config.bounds();
        let request = NodeRequest {
            state,
            legal_moves: &legal,
            maximising: self.maximising,
            alpha,
            beta,
            label,
        };
        let mut sink = EstimateSink {
            analytics: &mut self.analytics,
            rng: &mut self.rng,
            tree_description: if self.config.save_tree_description {
                Some(&mut self.tree_description)
            } else {
                None
            },
        };
        let scores = self.estimator.estimate(&self.engine, &request, &mut sink)?;

        let maximising = self.maximising;
        let node = self.tree.get_mut(node_id);
        node.edges = legal
            .into_iter()
            .zip(scores)
            .map(|(mv, score)| Edge::new(mv, score))
            .collect();
        node.expanded = true;
        node.evaluated = true;
        let value = node.best_value(maximising).unwrap_or(0.0);
        node.value = value;

        self.stats.nodes_expanded += 1;
        Ok(value)
    }

    /// Ensure a child exists for the edge, creating if needed.
    fn ensure_child(&mut self, parent_id: NodeId, edge_idx: usize, state: &E::State) -> NodeId {
        let child = self.tree.get(parent_id).edges[edge_idx].child;
        if !child.is_none() {
            return child;
        }

        let depth = self.tree.get(parent_id).depth.saturating_add(1);
        if depth > self.stats.max_depth {
            self.stats.max_depth = depth;
        }

        let mover = self.engine.mover(state);
        let child_id = self.tree.alloc(SearchNode::new(mover, depth));
        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;
        child_id
    }

    /// Minimax backup: each edge on the path takes its child's value and
    /// its child's exhaustion.
    fn backpropagate(&mut self, path: &[(NodeId, usize)], leaf_value: f32) {
        let maximising = self.maximising;
        let mut value = leaf_value;

        for &(node_id, edge_idx) in path.iter().rev() {
            let child = self.tree.get(node_id).edges[edge_idx].child;
            let child_exhausted = self.tree.get(child).exhausted;

            let node = self.tree.get_mut(node_id);
            node.visits += 1;

            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;
            edge.score = value;
            edge.exhausted = child_exhausted;

            node.exhausted = node.edges.iter().all(|e| e.exhausted);
            value = node.best_value(maximising).unwrap_or(value);
            node.value = value;
        }
    }

    /// Summarize and persist the analytics of the finished search.
    fn finish_analysis(&mut self) {
        if !self.config.estimator.perform_analysis {
            return;
        }

        let summary = match self.analytics.summarize() {
            Ok(summary) => summary,
            Err(e) => {
                debug!("Skipping analytics summary: {}", e);
                return;
            }
        };

        info!("Search analytics:\n{}", summary);
        self.analytics_log.push(&summary);

        if let Some(path) = &self.config.analytics_path {
            if let Err(e) = self.analytics_log.write(path) {
                warn!("Failed to write analytics to {}: {}", path.display(), e);
            }
        }
    }

    fn write_tree_description(&self) {
        if !self.config.save_tree_description {
            return;
        }
        if let Some(path) = &self.config.tree_description_path {
            if let Err(e) = self.tree_description.write(path) {
                warn!("Failed to write tree description to {}: {}", path.display(), e);
            }
        }
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &SearchTree<E::Move> {
        &self.tree
    }

    /// Samples recorded during the last search.
    #[must_use]
    pub fn analytics(&self) -> &AnalyticsRecorder {
        &self.analytics
    }

    /// Summary tuples of every analysed search so far.
    #[must_use]
    pub fn analytics_log(&self) -> &AnalyticsLog {
        &self.analytics_log
    }

    /// Nodes evaluated during the last search, when recording is enabled.
    #[must_use]
    pub fn tree_description(&self) -> &SearchTreeDescription {
        &self.tree_description
    }

    /// Get (move, score) pairs at the root of the last search.
    pub fn root_scores(&self) -> Vec<(E::Move, f32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.mv.clone(), e.score))
            .collect()
    }

    /// Best line found by the last search.
    pub fn principal_variation(&self) -> Vec<E::Move> {
        self.tree
            .principal_variation(self.maximising)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Get the engine reference.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
