//! Per-search accumulation of action-evaluation analytics.

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

use super::stats::{mean, pearson};

/// Samples recorded by the move value estimator during one top-level search.
///
/// `action_evaluations` and `score_evolutions` always have the same length:
/// they are only ever appended together through [`record`](Self::record).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalyticsRecorder {
    /// Action scores, negated at nodes where the mover is not the maximizer.
    action_evaluations: Vec<f32>,

    /// Clamped heuristic change caused by each scored move.
    score_evolutions: Vec<f32>,

    /// One rank correlation per node that had at least two legal moves.
    ranking_correlations: Vec<f32>,
}

impl AnalyticsRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded samples.
    pub fn reset(&mut self) {
        self.action_evaluations.clear();
        self.score_evolutions.clear();
        self.ranking_correlations.clear();
    }

    /// Record one scored move.
    pub fn record(&mut self, action_evaluation: f32, score_evolution: f32) {
        self.action_evaluations.push(action_evaluation);
        self.score_evolutions.push(score_evolution);
    }

    /// Record the rank correlation of one node.
    pub fn record_rank_correlation(&mut self, correlation: f32) {
        self.ranking_correlations.push(correlation);
    }

    /// Number of recorded (action evaluation, score evolution) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.action_evaluations.len()
    }

    /// Check if no pair has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.action_evaluations.is_empty()
    }

    #[must_use]
    pub fn action_evaluations(&self) -> &[f32] {
        &self.action_evaluations
    }

    #[must_use]
    pub fn score_evolutions(&self) -> &[f32] {
        &self.score_evolutions
    }

    #[must_use]
    pub fn ranking_correlations(&self) -> &[f32] {
        &self.ranking_correlations
    }

    /// Summarize the recorded samples.
    ///
    /// Fails with [`AnalyticsError::NoData`] when nothing was recorded.
    /// Statistics that are undefined for the data (zero variance, zero
    /// action magnitude, no node with two or more moves) are `NaN`.
    pub fn summarize(&self) -> Result<AnalyticsSummary, AnalyticsError> {
        debug_assert_eq!(self.action_evaluations.len(), self.score_evolutions.len());

        let entries = self.len();
        let mean_action_evaluation = mean(&self.action_evaluations).ok_or(AnalyticsError::NoData)?;
        let mean_score_evolution = mean(&self.score_evolutions).ok_or(AnalyticsError::NoData)?;

        let action_abs_sum: f32 = self.action_evaluations.iter().map(|v| v.abs()).sum();
        let score_abs_sum: f32 = self.score_evolutions.iter().map(|v| v.abs()).sum();

        let ratio = if action_abs_sum == 0.0 {
            f32::NAN
        } else {
            score_abs_sum / action_abs_sum
        };

        Ok(AnalyticsSummary {
            entries,
            mean_action_evaluation,
            mean_score_evolution,
            mean_abs_action_evaluation: action_abs_sum / entries as f32,
            mean_abs_score_evolution: score_abs_sum / entries as f32,
            correlation: pearson(&self.action_evaluations, &self.score_evolutions)
                .unwrap_or(f32::NAN),
            ratio,
            mean_rank_correlation: mean(&self.ranking_correlations).unwrap_or(f32::NAN),
            ranked_nodes: self.ranking_correlations.len(),
        })
    }
}

/// Summary statistics of one search's analytics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Number of (action evaluation, score evolution) pairs.
    pub entries: usize,

    pub mean_action_evaluation: f32,

    pub mean_score_evolution: f32,

    pub mean_abs_action_evaluation: f32,

    pub mean_abs_score_evolution: f32,

    /// Pearson correlation between action evaluations and score evolutions.
    pub correlation: f32,

    /// Mean absolute score evolution over mean absolute action evaluation.
    pub ratio: f32,

    /// Mean rank correlation over all ranked nodes.
    pub mean_rank_correlation: f32,

    /// Number of nodes that contributed a rank correlation.
    pub ranked_nodes: usize,
}

impl AnalyticsSummary {
    /// The persisted tuple:
    /// `[meanActionEval, meanScoreEvolution, pearsonR, meanRankCorrelation]`.
    #[must_use]
    pub fn to_record(&self) -> [f32; 4] {
        [
            self.mean_action_evaluation,
            self.mean_score_evolution,
            self.correlation,
            self.mean_rank_correlation,
        ]
    }
}

impl std::fmt::Display for AnalyticsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of action evaluation entries: {}", self.entries)?;
        writeln!(f, "Average abs action evaluation: {}", self.mean_abs_action_evaluation)?;
        writeln!(f, "Average abs score evolution: {}", self.mean_abs_score_evolution)?;
        writeln!(f, "Correlation coefficient: {}", self.correlation)?;
        writeln!(f, "Ratio: {}", self.ratio)?;
        write!(f, "Ranking correlation: {}", self.mean_rank_correlation)
    }
}
