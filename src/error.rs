//! Error types for search, analytics and configuration.

use thiserror::Error;

/// Errors raised by the search driver and the move value estimator.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A caller broke the input contract (e.g. an empty legal move list).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Neither a time limit nor an iteration limit was given.
    #[error("search budget needs a time or iteration limit")]
    UnboundedBudget,

    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

/// Errors raised while summarizing or persisting search analytics.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// `summarize` was called before any sample was recorded.
    #[error("no analytic data available")]
    NoData,

    #[error("failed to access analytics file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed analytics data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading a search configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
