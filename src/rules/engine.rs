//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - Whose turn it is
//! - What moves are legal
//! - How moves modify state
//! - Win/loss conditions

use std::fmt::Debug;

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    /// Outcome for `player` in `[-1, 1]`: 1 for a win, -1 for a loss, 0 for a draw.
    #[must_use]
    pub fn utility(&self, player: PlayerId) -> f32 {
        match self {
            GameResult::Draw => 0.0,
            _ if self.is_winner(player) => 1.0,
            _ => -1.0,
        }
    }
}

/// Rules engine trait.
///
/// The search treats states and moves as opaque: it clones states, applies
/// moves to the clones, and asks the engine whose turn it is.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Return empty vec if the mover can't act
/// - `apply_move`: Must be deterministic so search results are reproducible
/// - `is_terminal`: Return None if game continues
pub trait RulesEngine: Send + Sync {
    /// Complete game state. Cloned once per explored tree edge.
    type State: Clone + Debug;

    /// A legal transition between states.
    type Move: Clone + Debug + PartialEq;

    /// The player to move in `state`.
    fn mover(&self, state: &Self::State) -> PlayerId;

    /// All legal moves for the player to move, in a stable order.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Apply a move to the state.
    fn apply_move(&self, state: &mut Self::State, mv: &Self::Move);

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &Self::State) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Clone `state` and apply `mv` to the copy.
    fn successor(&self, state: &Self::State, mv: &Self::Move) -> Self::State {
        let mut next = state.clone();
        self.apply_move(&mut next, mv);
        next
    }
}
