//! Move value estimation.
//!
//! When a node is expanded every legal move receives an initial score:
//!
//! ```text
//! score(move) = heuristic(state) + sign * weight * action_value(state, move)
//! ```
//!
//! where `sign` is `+1` when the maximizing player moves at the node and `-1`
//! otherwise. The heuristic is evaluated once per node, not once per move.
//!
//! ## Analysis
//!
//! With `perform_analysis` enabled the estimator also evaluates the state
//! reached by every move and records, per move, the signed action value and
//! the clamped heuristic change, plus one rank correlation per node with at
//! least two moves. This is measurement only and never changes the scores.

use tracing::trace;

use super::config::EstimatorConfig;
use super::description::SearchTreeDescription;
use super::node::NodeLabel;
use crate::analytics::{clamp_score, rank_correlation, AnalyticsRecorder};
use crate::core::{GameRng, PlayerId};
use crate::error::SearchError;
use crate::eval::{ActionScorer, HeuristicEvaluator, ZeroScorer};
use crate::rules::RulesEngine;

/// A node whose moves need scores.
pub struct NodeRequest<'a, E: RulesEngine> {
    /// State at the node.
    pub state: &'a E::State,

    /// Legal moves at the node, in the engine's order.
    pub legal_moves: &'a [E::Move],

    /// The player the search maximizes for.
    pub maximising: PlayerId,

    pub alpha: f32,
    pub beta: f32,

    /// Path of the node from the root.
    pub label: &'a NodeLabel,
}

/// Mutable outputs of an estimation besides the scores.
pub struct EstimateSink<'a> {
    /// Receives analysis samples when analysis is enabled.
    pub analytics: &'a mut AnalyticsRecorder,

    /// Source of rank tie-breaking.
    pub rng: &'a mut GameRng,

    /// Receives one line per evaluated node when present.
    pub tree_description: Option<&'a mut SearchTreeDescription>,
}

/// Blends a heuristic with a learned action scorer into per-move scores.
pub struct MoveValueEstimator<E: RulesEngine> {
    heuristic: Box<dyn HeuristicEvaluator<E>>,
    scorer: Box<dyn ActionScorer<E>>,
    config: EstimatorConfig,
}

impl<E: RulesEngine> MoveValueEstimator<E> {
    /// Create an estimator with the zero action scorer.
    pub fn new(heuristic: impl HeuristicEvaluator<E> + 'static, config: EstimatorConfig) -> Self {
        Self {
            heuristic: Box::new(heuristic),
            scorer: Box::new(ZeroScorer),
            config,
        }
    }

    /// Replace the action scorer.
    pub fn with_scorer(mut self, scorer: impl ActionScorer<E> + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EstimatorConfig {
        &mut self.config
    }

    /// Heuristic value of a state, as the estimator sees it.
    pub fn heuristic_value(
        &self,
        engine: &E,
        state: &E::State,
        maximising: PlayerId,
        alpha: f32,
        beta: f32,
    ) -> f32 {
        let mover = engine.mover(state);
        self.heuristic.evaluate(engine, state, maximising, mover, alpha, beta)
    }

    /// Score every legal move of a node.
    ///
    /// The returned vector is aligned with `node.legal_moves`. Fails with
    /// [`SearchError::InvalidArgument`] when the move list is empty or the
    /// action scorer does not return one value per move.
    pub fn estimate(
        &self,
        engine: &E,
        node: &NodeRequest<'_, E>,
        sink: &mut EstimateSink<'_>,
    ) -> Result<Vec<f32>, SearchError> {
        let n = node.legal_moves.len();
        if n == 0 {
            return Err(SearchError::InvalidArgument("cannot estimate a node without legal moves"));
        }

        let mover = engine.mover(node.state);
        let mover_is_maximising = mover == node.maximising;
        let heuristic_score = self.heuristic.evaluate(
            engine,
            node.state,
            node.maximising,
            mover,
            node.alpha,
            node.beta,
        );

        if let Some(description) = sink.tree_description.as_deref_mut() {
            description.record(node.label, heuristic_score, mover_is_maximising);
        }

        let weight = self.config.action_evaluation_weight;
        if weight == 0.0 && !self.config.perform_analysis {
            trace!(node = %node.label, moves = n, heuristic = heuristic_score, "heuristic-only estimate");
            return Ok(vec![heuristic_score; n]);
        }

        let action_values = self.scorer.score_all(engine, node.state, node.legal_moves);
        if action_values.len() != n {
            return Err(SearchError::InvalidArgument(
                "action scorer must return one value per legal move",
            ));
        }

        if self.config.perform_analysis {
            self.analyse(engine, node, mover, heuristic_score, &action_values, sink);
        }

        if weight == 0.0 {
            return Ok(vec![heuristic_score; n]);
        }

        let sign = if mover_is_maximising { 1.0 } else { -1.0 };
        let scores = action_values
            .iter()
            .map(|&value| heuristic_score + sign * weight * value)
            .collect();

        trace!(node = %node.label, moves = n, heuristic = heuristic_score, "blended estimate");
        Ok(scores)
    }

    fn analyse(
        &self,
        engine: &E,
        node: &NodeRequest<'_, E>,
        mover: PlayerId,
        heuristic_score: f32,
        action_values: &[f32],
        sink: &mut EstimateSink<'_>,
    ) {
        let bound = self.config.score_bound;
        let mover_is_maximising = mover == node.maximising;
        let sign = if mover_is_maximising { 1.0 } else { -1.0 };
        let current = clamp_score(heuristic_score, bound);

        let mut outcome_scores = Vec::with_capacity(action_values.len());
        for (mv, &action_value) in node.legal_moves.iter().zip(action_values) {
            let next = engine.successor(node.state, mv);
            let next_score = self.heuristic.evaluate(
                engine,
                &next,
                node.maximising,
                mover,
                node.alpha,
                node.beta,
            );
            outcome_scores.push(next_score);
            sink.analytics
                .record(sign * action_value, clamp_score(next_score, bound) - current);
        }

        if let Some(correlation) =
            rank_correlation(action_values, &outcome_scores, mover_is_maximising, sink.rng)
        {
            sink.analytics.record_rank_correlation(correlation);
        }
    }
}
