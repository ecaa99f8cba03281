//! Analytics comparing learned action evaluations with heuristic outcomes.
//!
//! During a search with analysis enabled, the move value estimator records,
//! for every scored move, the (mover-signed) action evaluation and the
//! clamped change in heuristic score the move causes, plus one rank
//! correlation per node with at least two moves. At the end of the search
//! the recorder is summarized and the summary tuple is appended to an
//! [`AnalyticsLog`].
//!
//! ```
//! use lazy_bfs::analytics::{AnalyticsLog, AnalyticsRecorder};
//!
//! let mut recorder = AnalyticsRecorder::new();
//! recorder.record(1.0, 0.1);
//! recorder.record(2.0, 0.2);
//! recorder.record_rank_correlation(1.0);
//!
//! let summary = recorder.summarize().unwrap();
//! assert!((summary.correlation - 1.0).abs() < 1e-5);
//!
//! let mut log = AnalyticsLog::new();
//! log.push(&summary);
//! assert_eq!(log.len(), 1);
//! ```

pub mod log;
pub mod recorder;
pub mod stats;

pub use log::AnalyticsLog;
pub use recorder::{AnalyticsRecorder, AnalyticsSummary};
pub use stats::{clamp_score, mean, pearson, rank_correlation, ScoredIndex};
