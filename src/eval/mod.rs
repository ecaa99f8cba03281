//! Evaluation signals for the search.
//!
//! ## Overview
//!
//! - **Traits**: `HeuristicEvaluator`, `ActionScorer`
//! - **Adapters**: `FnHeuristic`, `FnScorer`, `LinearScorer`
//! - **Baselines**: `ZeroScorer` for pure heuristic search
//! - **Wrappers**: `TerminalAware` scores finished games by their outcome
//!
//! ## Usage
//!
//! ```rust
//! use lazy_bfs::eval::{FnScorer, TerminalAware};
//! use lazy_bfs::games::subtraction::{PileHeuristic, PileState, SubtractionGame, Take};
//! use lazy_bfs::search::{BestFirstSearch, SearchConfig};
//!
//! let game = SubtractionGame::new(3);
//! let heuristic = TerminalAware::new(PileHeuristic::default(), 100.0);
//! let search = BestFirstSearch::new(game, heuristic, SearchConfig::default())
//!     .with_scorer(FnScorer(|_: &PileState, mv: &Take| mv.0 as f32));
//! ```

pub mod traits;

pub use traits::{
    ActionScorer, FnHeuristic, FnScorer, HeuristicEvaluator, LinearScorer, TerminalAware,
    ZeroScorer,
};
