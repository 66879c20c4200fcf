//! Fixed-seed row sampling for oversized listing tables.
//!
//! Large cities can carry far more listings than a single rendered page
//! should hold. When a table exceeds the cap, a reproducible random subset
//! replaces it: the seed is fixed, so the same input file always yields the
//! same rows.

use rand::SeedableRng as _;
use rand::rngs::StdRng;

/// Default maximum number of rows kept per table.
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// Default sampling seed.
pub const DEFAULT_SEED: u64 = 27;

/// Size cap applied to a loaded listing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePolicy {
    /// Whether the cap is enforced at all.
    pub enabled: bool,
    /// Maximum number of rows to keep.
    pub max_rows: usize,
    /// Seed for the sampling RNG.
    pub seed: u64,
}

impl Default for SamplePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_rows: DEFAULT_MAX_ROWS,
            seed: DEFAULT_SEED,
        }
    }
}

impl SamplePolicy {
    /// Applies the cap to `rows`.
    ///
    /// Tables at or under the cap are returned untouched. Larger tables are
    /// reduced to exactly `max_rows` rows chosen with a seeded RNG; the kept
    /// rows stay in their original order.
    #[must_use]
    pub fn apply<T>(&self, rows: Vec<T>) -> Vec<T> {
        if !self.enabled || rows.len() <= self.max_rows {
            return rows;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut keep = vec![false; rows.len()];
        for idx in rand::seq::index::sample(&mut rng, rows.len(), self.max_rows) {
            keep[idx] = true;
        }

        rows.into_iter()
            .zip(keep)
            .filter_map(|(row, kept)| kept.then_some(row))
            .collect()
    }
}
