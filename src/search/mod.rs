//! Lazy best-first search.
//!
//! ## Overview
//!
//! - **Search**: `BestFirstSearch` grows a minimax tree one node per iteration
//! - **Estimator**: `MoveValueEstimator` blends heuristic and action scores
//! - **Tree**: arena-allocated `SearchTree` of `SearchNode`s
//! - **Config**: `SearchConfig`, `EstimatorConfig` and per-call `SearchBudget`
//!
//! ## Usage
//!
//! ```rust
//! use lazy_bfs::games::subtraction::{PileHeuristic, SubtractionGame, Take};
//! use lazy_bfs::search::{BestFirstSearch, SearchBudget, SearchConfig};
//!
//! let game = SubtractionGame::new(3);
//! let state = game.initial_state(10);
//!
//! let mut search = BestFirstSearch::new(game, PileHeuristic::default(), SearchConfig::default());
//! let mv = search.select_move(&state, &SearchBudget::iterations(200)).unwrap();
//!
//! assert_eq!(mv, Some(Take(2)));
//! ```

pub mod config;
pub mod description;
pub mod estimator;
pub mod node;
#[allow(clippy::module_inception)]
pub mod search;
pub mod stats;
pub mod tree;

pub use config::{EstimatorConfig, SearchBudget, SearchConfig};
pub use description::SearchTreeDescription;
pub use estimator::{EstimateSink, MoveValueEstimator, NodeRequest};
pub use node::{Edge, NodeId, NodeLabel, SearchNode};
pub use search::BestFirstSearch;
pub use stats::SearchStats;
pub use tree::SearchTree;
