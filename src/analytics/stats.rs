//! Numeric helpers for search analytics.
//!
//! - Score clamping used by the score-evolution metric
//! - Population Pearson correlation
//! - Rank correlation between two orderings of the same move set

use std::cmp::Ordering;

use crate::core::GameRng;

/// Clamp a heuristic score into `[-bound, bound]`.
///
/// ```
/// use lazy_bfs::analytics::clamp_score;
///
/// assert_eq!(clamp_score(7.5, 5.0), 5.0);
/// assert_eq!(clamp_score(-9.0, 5.0), -5.0);
/// assert_eq!(clamp_score(1.25, 5.0), 1.25);
/// ```
#[must_use]
pub fn clamp_score(score: f32, bound: f32) -> f32 {
    let bound = bound.abs();
    score.clamp(-bound, bound)
}

/// Arithmetic mean, `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}

/// Pearson correlation coefficient using population (divide by n) moments.
///
/// Returns `None` when the slices are empty, differ in length, or either
/// one has zero variance.
#[must_use]
pub fn pearson(xs: &[f32], ys: &[f32]) -> Option<f32> {
    if xs.len() != ys.len() {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = f64::from(mean(xs)?);
    let mean_y = f64::from(mean(ys)?);

    let mut covariance_sum = 0.0;
    let mut variance_sum_x = 0.0;
    let mut variance_sum_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = f64::from(x) - mean_x;
        let dy = f64::from(y) - mean_y;
        covariance_sum += dx * dy;
        variance_sum_x += dx * dx;
        variance_sum_y += dy * dy;
    }

    let covariance = covariance_sum / n;
    let variance_x = variance_sum_x / n;
    let variance_y = variance_sum_y / n;
    let denominator = (variance_x * variance_y).sqrt();
    if denominator == 0.0 {
        return None;
    }
    Some((covariance / denominator) as f32)
}

/// A move's position in the legal move list paired with a score.
///
/// Ordered best-first: a higher score sorts earlier.
#[derive(Clone, Copy, Debug)]
pub struct ScoredIndex {
    pub index: usize,
    pub score: f32,
}

impl ScoredIndex {
    #[must_use]
    pub const fn new(index: usize, score: f32) -> Self {
        Self { index, score }
    }
}

impl PartialEq for ScoredIndex {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredIndex {}

impl PartialOrd for ScoredIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        other.score.total_cmp(&self.score)
    }
}

/// Rank correlation between moves ranked by action evaluation and moves
/// ranked by the heuristic score of the resulting states.
///
/// When the mover is not the maximizing player the heuristic ranking is
/// reversed, so both rankings express "best for the mover". Ties are broken
/// by one random permutation shared by both rankings, applied before a
/// stable sort. Rank `r` of `n` maps to `r / (n - 1) - 0.5`; the result is
/// the rank covariance over the square root of the product of the rank
/// variances, which lies in `[-1, 1]`.
///
/// Returns `None` for fewer than two moves or mismatched lengths.
pub fn rank_correlation(
    action_scores: &[f32],
    outcome_scores: &[f32],
    mover_is_maximising: bool,
    rng: &mut GameRng,
) -> Option<f32> {
    let n = action_scores.len();
    if n < 2 || outcome_scores.len() != n {
        return None;
    }

    let order = rng.permutation(n);
    let mut by_action: Vec<ScoredIndex> = order
        .iter()
        .map(|&i| ScoredIndex::new(i, action_scores[i]))
        .collect();
    let mut by_outcome: Vec<ScoredIndex> = order
        .iter()
        .map(|&i| ScoredIndex::new(i, outcome_scores[i]))
        .collect();

    by_action.sort();
    if mover_is_maximising {
        by_outcome.sort();
    } else {
        by_outcome.sort_by(|a, b| b.cmp(a));
    }

    let mut action_rank = vec![0usize; n];
    for (rank, scored) in by_action.iter().enumerate() {
        action_rank[scored.index] = rank;
    }

    let scale = (n - 1) as f64;
    let mut covariance_sum = 0.0;
    let mut variance_sum_outcome = 0.0;
    let mut variance_sum_action = 0.0;
    for (rank, scored) in by_outcome.iter().enumerate() {
        let x = rank as f64 / scale - 0.5;
        let y = action_rank[scored.index] as f64 / scale - 0.5;
        covariance_sum += x * y;
        variance_sum_outcome += x * x;
        variance_sum_action += y * y;
    }

    // Both rank sets are permutations of 0..n, so neither variance is zero for n >= 2.
    Some((covariance_sum / (variance_sum_outcome * variance_sum_action).sqrt()) as f32)
}
