//! Deterministic random number generation.
//!
//! Wraps PCG (Permuted Congruential Generator) so that every run is fully
//! determined by its master seed.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, all random number sequences will be
//! bitwise-identical across:
//! - Different runs
//! - Different platforms

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct SimRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Number of values drawn so far.
    draws: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            draws: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Number of values drawn since construction.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.draws += 1;
        self.rng.gen()
    }

    /// Generate a random f64 in `[min, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        assert!(min <= max, "Invalid range: min > max");
        min + (max - min) * self.gen_f64()
    }

    /// Generate a random integer in `[low, high)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    pub fn gen_range_i64(&mut self, low: i64, high: i64) -> i64 {
        assert!(low < high, "Invalid range: empty integer range");
        self.draws += 1;
        self.rng.gen_range(low..high)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Reproducibility holds for any seed.
        #[test]
        fn prop_reproducibility(seed in 0u64..u64::MAX) {
            let mut rng1 = SimRng::new(seed);
            let mut rng2 = SimRng::new(seed);

            let seq1: Vec<i64> = (0..100).map(|_| rng1.gen_range_i64(-100, 100)).collect();
            let seq2: Vec<i64> = (0..100).map(|_| rng2.gen_range_i64(-100, 100)).collect();

            prop_assert_eq!(seq1, seq2);
        }

        /// Values stay in [0, 1) for any seed.
        #[test]
        fn prop_unit_interval(seed in 0u64..u64::MAX) {
            let mut rng = SimRng::new(seed);

            for _ in 0..100 {
                let v = rng.gen_f64();
                prop_assert!((0.0..1.0).contains(&v), "Value {} not in [0, 1)", v);
            }
        }
    }
}
