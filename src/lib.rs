//! # lazy-bfs
//!
//! A lazy best-first game-tree search whose move values blend a static
//! heuristic with a learned action evaluation.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Games plug in through the `RulesEngine` trait.
//!    States and moves are opaque to the search.
//!
//! 2. **Lazy Move Values**: A node's moves are scored once, from the node's
//!    own heuristic plus a weighted action evaluation, and only replaced
//!    when the search expands the resulting state.
//!
//! 3. **Measurable**: An optional analysis mode records how well action
//!    evaluations predict heuristic changes and persists one summary per
//!    search.
//!
//! 4. **Reproducible**: All randomness flows through a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Players and RNG
//! - `rules`: RulesEngine trait for game implementations
//! - `eval`: Heuristic and action scorer traits with adapters
//! - `analytics`: Analytics recorder, statistics and persisted log
//! - `search`: Move value estimator and best-first search driver
//! - `games`: Sample games used by tests and benchmarks
//! - `error`: Error types

pub mod core;
pub mod rules;
pub mod eval;
pub mod analytics;
pub mod search;
pub mod games;
pub mod error;

// Re-export commonly used types
pub use crate::core::{GameRng, PlayerId};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::eval::{
    ActionScorer, FnHeuristic, FnScorer, HeuristicEvaluator, LinearScorer, TerminalAware,
    ZeroScorer,
};

pub use crate::analytics::{AnalyticsLog, AnalyticsRecorder, AnalyticsSummary};

pub use crate::search::{
    BestFirstSearch, EstimatorConfig, MoveValueEstimator, NodeLabel, SearchBudget, SearchConfig,
    SearchStats,
};

pub use crate::error::{AnalyticsError, ConfigError, SearchError};
