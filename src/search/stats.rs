//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one best-first search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed.
    pub iterations: u32,

    /// Nodes whose legal moves were scored by the estimator.
    pub nodes_expanded: u32,

    /// Depth-limited leaves evaluated by the heuristic alone.
    pub leaf_evaluations: u32,

    /// Terminal states reached.
    pub terminal_hits: u32,

    /// Maximum depth reached during search.
    pub max_depth: u16,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate average expansions per iteration.
    #[must_use]
    pub fn avg_nodes_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / self.iterations as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.nodes_expanded, 0);
        assert_eq!(stats.iterations_per_second(), 0.0);
        assert_eq!(stats.avg_nodes_per_iteration(), 0.0);
    }

    #[test]
    fn test_stats_rates() {
        let mut stats = SearchStats::new();
        stats.iterations = 1000;
        stats.nodes_expanded = 500;
        stats.time_us = 1_000_000;

        assert_eq!(stats.iterations_per_second(), 1000.0);
        assert_eq!(stats.avg_nodes_per_iteration(), 0.5);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.iterations = 100;
        stats.terminal_hits = 50;

        stats.reset();

        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.terminal_hits, 0);
    }
}
