//! Deterministic random number generation for search.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Explicit**: Passed by `&mut` into every routine that needs randomness,
//!   so rank tie-breaking and exploration are reproducible in tests
//!
//! ```
//! use lazy_bfs::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//! assert_eq!(rng.permutation(8), rng2.permutation(8));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used by the search driver and the move value estimator.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    ///
    /// Probabilities outside `[0, 1]` are clamped.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// A uniformly random permutation of `0..n`.
    #[must_use]
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..n).collect();
        self.shuffle(&mut indices);
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_permutation_contains_every_index() {
        let mut rng = GameRng::new(7);
        let mut perm = rng.permutation(10);

        assert_eq!(perm.len(), 10);
        perm.sort_unstable();
        assert_eq!(perm, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_permutation_degenerate_sizes() {
        let mut rng = GameRng::new(7);
        assert!(rng.permutation(0).is_empty());
        assert_eq!(rng.permutation(1), vec![0]);
    }

    #[test]
    fn test_gen_bool_extremes() {
        let mut rng = GameRng::new(3);
        for _ in 0..20 {
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
            assert!(!rng.gen_bool(-0.5));
        }
    }
}
