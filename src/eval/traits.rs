//! Evaluation traits consumed by the search.
//!
//! - `HeuristicEvaluator`: static value of a state for the maximizing player
//! - `ActionScorer`: learned logit for a (state, move) pair
//!
//! Both are injected into the move value estimator as trait objects, so
//! games can plug in hand-written heuristics or trained models.

use crate::core::PlayerId;
use crate::rules::RulesEngine;

/// Static evaluation of a state.
///
/// Values are expected to lie roughly in `[-score_bound, score_bound]`
/// (5.0 by default). The search does not clamp the returned value; only the
/// score-evolution analytics do.
pub trait HeuristicEvaluator<E: RulesEngine>: Send + Sync {
    /// Evaluate `state` from `maximising`'s point of view.
    ///
    /// `mover` is the player to move at the node being scored and
    /// `alpha`/`beta` are the search bounds at that node.
    fn evaluate(
        &self,
        engine: &E,
        state: &E::State,
        maximising: PlayerId,
        mover: PlayerId,
        alpha: f32,
        beta: f32,
    ) -> f32;
}

/// Learned action evaluation.
///
/// Returns an unbounded logit. Implementations must not mutate the state
/// and should be deterministic for analytics to be reproducible.
pub trait ActionScorer<E: RulesEngine>: Send + Sync {
    /// Score a single candidate move.
    fn score(&self, engine: &E, state: &E::State, mv: &E::Move) -> f32;

    /// Score every move of a node (optional optimization).
    fn score_all(&self, engine: &E, state: &E::State, moves: &[E::Move]) -> Vec<f32> {
        moves.iter().map(|mv| self.score(engine, state, mv)).collect()
    }
}

/// Scorer returning 0 for every move (baseline, pure heuristic search).
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroScorer;

impl<E: RulesEngine> ActionScorer<E> for ZeroScorer {
    fn score(&self, _engine: &E, _state: &E::State, _mv: &E::Move) -> f32 {
        0.0
    }
}

/// Scorer backed by a closure over `(state, move)`.
#[derive(Clone, Copy, Debug)]
pub struct FnScorer<F>(pub F);

impl<E, F> ActionScorer<E> for FnScorer<F>
where
    E: RulesEngine,
    F: Fn(&E::State, &E::Move) -> f32 + Send + Sync,
{
    fn score(&self, _engine: &E, state: &E::State, mv: &E::Move) -> f32 {
        (self.0)(state, mv)
    }
}

/// Linear model over per-move features: `logit = weights · features(state, move)`.
///
/// Missing trailing features or weights count as zero.
#[derive(Clone, Debug)]
pub struct LinearScorer<F> {
    weights: Vec<f32>,
    features: F,
}

impl<F> LinearScorer<F> {
    /// Create a linear scorer from trained weights and a feature extractor.
    pub fn new(weights: Vec<f32>, features: F) -> Self {
        Self { weights, features }
    }

    /// The trained weights.
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

impl<E, F> ActionScorer<E> for LinearScorer<F>
where
    E: RulesEngine,
    F: Fn(&E, &E::State, &E::Move) -> Vec<f32> + Send + Sync,
{
    fn score(&self, engine: &E, state: &E::State, mv: &E::Move) -> f32 {
        (self.features)(engine, state, mv)
            .iter()
            .zip(&self.weights)
            .map(|(f, w)| f * w)
            .sum()
    }
}

/// Heuristic backed by a closure over `(state, maximising)`.
#[derive(Clone, Copy, Debug)]
pub struct FnHeuristic<F>(pub F);

impl<E, F> HeuristicEvaluator<E> for FnHeuristic<F>
where
    E: RulesEngine,
    F: Fn(&E::State, PlayerId) -> f32 + Send + Sync,
{
    fn evaluate(
        &self,
        _engine: &E,
        state: &E::State,
        maximising: PlayerId,
        _mover: PlayerId,
        _alpha: f32,
        _beta: f32,
    ) -> f32 {
        (self.0)(state, maximising)
    }
}

/// Wraps a heuristic so finished games score their true outcome.
///
/// Terminal states evaluate to `utility(maximising) * win_score`; every
/// other state is delegated to the inner heuristic.
#[derive(Clone, Debug)]
pub struct TerminalAware<H> {
    inner: H,
    win_score: f32,
}

impl<H> TerminalAware<H> {
    /// Wrap `inner`, scoring wins as `win_score` and losses as `-win_score`.
    pub fn new(inner: H, win_score: f32) -> Self {
        Self { inner, win_score }
    }

    /// The wrapped heuristic.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<E, H> HeuristicEvaluator<E> for TerminalAware<H>
where
    E: RulesEngine,
    H: HeuristicEvaluator<E>,
{
    fn evaluate(
        &self,
        engine: &E,
        state: &E::State,
        maximising: PlayerId,
        mover: PlayerId,
        alpha: f32,
        beta: f32,
    ) -> f32 {
        match engine.is_terminal(state) {
            Some(result) => result.utility(maximising) * self.win_score,
            None => self.inner.evaluate(engine, state, maximising, mover, alpha, beta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::subtraction::{PileHeuristic, PileState, SubtractionGame, Take};

    #[test]
    fn test_zero_scorer() {
        let game = SubtractionGame::new(3);
        let state = game.initial_state(10);
        let moves = game.legal_moves(&state);

        let scores = ZeroScorer.score_all(&game, &state, &moves);

        assert_eq!(scores.len(), moves.len());
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_fn_scorer() {
        let game = SubtractionGame::new(3);
        let state = game.initial_state(10);
        let scorer = FnScorer(|_: &PileState, mv: &Take| mv.0 as f32 * 0.5);

        assert_eq!(ActionScorer::<SubtractionGame>::score(&scorer, &game, &state, &Take(2)), 1.0);
    }

    #[test]
    fn test_linear_scorer_dot_product() {
        let game = SubtractionGame::new(3);
        let state = game.initial_state(10);
        let scorer = LinearScorer::new(vec![2.0, -1.0], |_: &SubtractionGame, _: &PileState, mv: &Take| {
            vec![mv.0 as f32, 1.0]
        });

        // 2 * 3 - 1 * 1
        assert_eq!(scorer.score(&game, &state, &Take(3)), 5.0);
        assert_eq!(scorer.weights(), &[2.0, -1.0]);
    }

    #[test]
    fn test_linear_scorer_ignores_extra_features() {
        let game = SubtractionGame::new(3);
        let state = game.initial_state(10);
        let scorer = LinearScorer::new(vec![1.0], |_: &SubtractionGame, _: &PileState, _: &Take| {
            vec![4.0, 100.0]
        });

        assert_eq!(scorer.score(&game, &state, &Take(1)), 4.0);
    }

    #[test]
    fn test_fn_heuristic() {
        let game = SubtractionGame::new(3);
        let state = game.initial_state(7);
        let heuristic = FnHeuristic(|s: &PileState, _: PlayerId| s.pile as f32);

        let value = heuristic.evaluate(&game, &state, PlayerId::new(0), PlayerId::new(0), -1.0, 1.0);
        assert_eq!(value, 7.0);
    }

    #[test]
    fn test_terminal_aware_scores_outcome() {
        let game = SubtractionGame::new(3);
        let mut state = game.initial_state(1);
        game.apply_move(&mut state, &Take(1));
        assert!(game.is_terminal(&state).is_some());

        let heuristic = TerminalAware::new(PileHeuristic::default(), 100.0);
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        // Player 0 took the last stone
        assert_eq!(heuristic.evaluate(&game, &state, p0, p1, -100.0, 100.0), 100.0);
        assert_eq!(heuristic.evaluate(&game, &state, p1, p1, -100.0, 100.0), -100.0);
    }

    #[test]
    fn test_terminal_aware_delegates_when_running() {
        let game = SubtractionGame::new(3);
        let state = game.initial_state(9);
        let inner = PileHeuristic::default();
        let wrapped = TerminalAware::new(inner.clone(), 100.0);
        let p0 = PlayerId::new(0);

        assert_eq!(
            wrapped.evaluate(&game, &state, p0, p0, -100.0, 100.0),
            inner.evaluate(&game, &state, p0, p0, -100.0, 100.0)
        );
    }
}
