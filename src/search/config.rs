//! Search configuration parameters and budgets.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Move value estimator parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Weight of the action evaluation when linearly combined with the
    /// heuristic score (0 = pure heuristic).
    pub action_evaluation_weight: f32,

    /// Record analytics comparing action evaluations with heuristic
    /// outcomes. Costs one state clone and one heuristic call per move.
    pub perform_analysis: bool,

    /// Heuristic scores are clamped to `[-score_bound, score_bound]` before
    /// computing score evolutions.
    pub score_bound: f32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            action_evaluation_weight: 0.0,
            perform_analysis: false,
            score_bound: 5.0,
        }
    }
}

impl EstimatorConfig {
    /// Set the action evaluation blend weight.
    pub fn with_action_evaluation_weight(mut self, weight: f32) -> Self {
        self.action_evaluation_weight = weight;
        self
    }

    /// Enable or disable analytics recording.
    pub fn with_analysis(mut self, enabled: bool) -> Self {
        self.perform_analysis = enabled;
        self
    }

    /// Set the clamp bound used for score evolutions.
    pub fn with_score_bound(mut self, bound: f32) -> Self {
        self.score_bound = bound;
        self
    }
}

/// Best-first search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Move value estimator parameters.
    pub estimator: EstimatorConfig,

    /// Random seed for rank tie-breaking and exploration.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Maximum nodes to allocate in the tree.
    pub max_nodes: usize,

    /// Probability of descending through a random edge instead of the best
    /// one (0 = pure best-first).
    pub exploration_epsilon: f64,

    /// Value of a won game for the maximizing player; losses score
    /// `-win_score`. Also the alpha/beta window handed to the heuristic.
    pub win_score: f32,

    /// File the analytics log is rewritten to after every search.
    pub analytics_path: Option<PathBuf>,

    /// Keep a textual description of every evaluated node.
    pub save_tree_description: bool,

    /// File the tree description is rewritten to after every search.
    pub tree_description_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorConfig::default(),
            seed: 42,
            max_nodes: 100_000,
            exploration_epsilon: 0.0,
            win_score: 1000.0,
            analytics_path: None,
            save_tree_description: false,
            tree_description_path: None,
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The alpha/beta window passed to heuristic evaluations.
    #[must_use]
    pub fn bounds(&self) -> (f32, f32) {
        (-self.win_score, self.win_score)
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom node capacity.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Create a new config with epsilon-greedy descent.
    pub fn with_exploration_epsilon(mut self, epsilon: f64) -> Self {
        self.exploration_epsilon = epsilon;
        self
    }

    /// Create a new config with a custom terminal win score.
    pub fn with_win_score(mut self, win_score: f32) -> Self {
        self.win_score = win_score;
        self
    }

    /// Create a new config with a custom action evaluation weight.
    pub fn with_action_evaluation_weight(mut self, weight: f32) -> Self {
        self.estimator.action_evaluation_weight = weight;
        self
    }

    /// Create a new config with analytics recording toggled.
    pub fn with_analysis(mut self, enabled: bool) -> Self {
        self.estimator.perform_analysis = enabled;
        self
    }

    /// Create a new config writing analytics to `path`.
    pub fn with_analytics_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.analytics_path = Some(path.into());
        self
    }

    /// Create a new config recording the search tree description.
    pub fn with_tree_description(mut self, enabled: bool) -> Self {
        self.save_tree_description = enabled;
        self
    }

    /// Create a new config recording the tree description into `path`.
    pub fn with_tree_description_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_tree_description = true;
        self.tree_description_path = Some(path.into());
        self
    }
}

/// Limits of one top-level search. The first limit reached stops the search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Wall-clock limit.
    pub max_time: Option<Duration>,

    /// Maximum number of expansion iterations. The root is expanded before
    /// the first iteration and is not counted, so `n` iterations evaluate
    /// up to `n + 1` nodes.
    pub max_iterations: Option<u32>,

    /// Nodes at this depth are evaluated but never expanded.
    pub max_depth: Option<u16>,
}

impl SearchBudget {
    /// Budget limited by iteration count only.
    #[must_use]
    pub fn iterations(max_iterations: u32) -> Self {
        Self {
            max_iterations: Some(max_iterations),
            ..Self::default()
        }
    }

    /// Budget limited by wall-clock time only.
    #[must_use]
    pub fn time(max_time: Duration) -> Self {
        Self {
            max_time: Some(max_time),
            ..Self::default()
        }
    }

    /// Build a budget from raw limits where non-positive values mean
    /// "unlimited". A time too large for a `Duration` is unlimited too, and
    /// depths beyond `u16::MAX` saturate.
    ///
    /// ```
    /// use lazy_bfs::search::SearchBudget;
    ///
    /// let budget = SearchBudget::from_limits(0.5, -1, 4);
    /// assert_eq!(budget.max_iterations, None);
    /// assert_eq!(budget.max_depth, Some(4));
    /// ```
    #[must_use]
    pub fn from_limits(max_seconds: f64, max_iterations: i32, max_depth: i32) -> Self {
        Self {
            max_time: (max_seconds > 0.0)
                .then(|| Duration::try_from_secs_f64(max_seconds).ok())
                .flatten(),
            max_iterations: u32::try_from(max_iterations).ok().filter(|&n| n > 0),
            max_depth: (max_depth > 0).then(|| u16::try_from(max_depth).unwrap_or(u16::MAX)),
        }
    }

    /// Add a wall-clock limit.
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Add an iteration limit.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Add a depth limit.
    pub fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Whether the budget can stop a search on its own.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.max_time.is_some() || self.max_iterations.is_some()
    }
}
