//! Subtraction game implementation.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::eval::HeuristicEvaluator;
use crate::rules::{GameResult, RulesEngine};

/// Take this many stones from the pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Take(pub u32);

/// Subtraction game state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileState {
    /// Stones left.
    pub pile: u32,

    /// Player to move.
    pub to_move: PlayerId,

    /// Player who took the most recent stones.
    pub last_taker: Option<PlayerId>,
}

/// Subtraction game rules.
#[derive(Clone, Copy, Debug)]
pub struct SubtractionGame {
    max_take: u32,
    player_count: usize,
}

impl SubtractionGame {
    /// Two-player game where up to `max_take` stones are taken per turn.
    pub fn new(max_take: u32) -> Self {
        assert!(max_take >= 1, "max_take must be at least 1");
        Self {
            max_take,
            player_count: 2,
        }
    }

    pub fn with_player_count(mut self, count: usize) -> Self {
        assert!((2..=8).contains(&count), "Player count must be 2-8");
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn max_take(&self) -> u32 {
        self.max_take
    }

    /// Starting state with `pile` stones and player 0 to move.
    #[must_use]
    pub fn initial_state(&self, pile: u32) -> PileState {
        PileState {
            pile,
            to_move: PlayerId::new(0),
            last_taker: None,
        }
    }
}

impl RulesEngine for SubtractionGame {
    type State = PileState;
    type Move = Take;

    fn mover(&self, state: &PileState) -> PlayerId {
        state.to_move
    }

    fn legal_moves(&self, state: &PileState) -> Vec<Take> {
        (1..=self.max_take.min(state.pile)).map(Take).collect()
    }

    fn apply_move(&self, state: &mut PileState, mv: &Take) {
        state.pile = state.pile.saturating_sub(mv.0);
        state.last_taker = Some(state.to_move);
        state.to_move = state.to_move.next(self.player_count);
    }

    fn is_terminal(&self, state: &PileState) -> Option<GameResult> {
        if state.pile > 0 {
            return None;
        }
        Some(match state.last_taker {
            Some(winner) => GameResult::Winner(winner),
            None => GameResult::Draw,
        })
    }
}

/// Exact two-player evaluation: `scale` when the maximizing player is
/// winning with perfect play, `-scale` when losing.
#[derive(Clone, Debug)]
pub struct PileHeuristic {
    scale: f32,
}

impl Default for PileHeuristic {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl PileHeuristic {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl HeuristicEvaluator<SubtractionGame> for PileHeuristic {
    fn evaluate(
        &self,
        engine: &SubtractionGame,
        state: &PileState,
        maximising: PlayerId,
        _mover: PlayerId,
        _alpha: f32,
        _beta: f32,
    ) -> f32 {
        if let Some(result) = engine.is_terminal(state) {
            return result.utility(maximising) * self.scale;
        }

        let mover_wins = state.pile % (engine.max_take() + 1) != 0;
        let mover_value = if mover_wins { self.scale } else { -self.scale };
        if state.to_move == maximising {
            mover_value
        } else {
            -mover_value
        }
    }
}
