//! Subtraction game for testing the search.
//!
//! A pile of stones sits between the players:
//! - On your turn take between 1 and `max_take` stones
//! - Whoever takes the last stone wins, everyone else loses
//!
//! With two players the player to move wins exactly when the pile is not a
//! multiple of `max_take + 1`, which `PileHeuristic` scores perfectly.

mod game;

pub use game::{PileHeuristic, PileState, SubtractionGame, Take};
