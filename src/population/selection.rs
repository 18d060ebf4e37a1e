//! Pool sizing and parent selection.
//!
//! Both algorithms split a ranked population into pools whose sizes are
//! fractions of the population size. [`pool_count`] turns a fraction into a
//! whole number of individuals; [`PoolSizes`] partitions a population into
//! the exclusive elite, mutation and crossover pools.
//!
//! Parents are drawn uniformly, with replacement, from the elite pool.

use rand::Rng;

/// Pool sizes this close above a whole count are rounded down to it,
/// so `(1.0 / n) * n` counts as exactly one individual.
const FRACTION_TOLERANCE: f64 = 1e-9;

/// Number of individuals covered by `fraction` of a population of `size`.
///
/// Rounds up, clamps to `[0, size]`, and treats negative or NaN fractions as zero.
pub fn pool_count(fraction: f64, size: usize) -> usize {
    if fraction.is_nan() || fraction <= 0.0 {
        return 0;
    }
    let exact = fraction * size as f64;
    let count = (exact - FRACTION_TOLERANCE).ceil().max(0.0) as usize;
    count.min(size)
}

/// Exclusive pool sizes for one round. The three counts always sum to the
/// population size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSizes {
    pub elite: usize,
    pub mutation: usize,
    pub crossover: usize,
}

impl PoolSizes {
    /// Partitions a population of `size` individuals.
    ///
    /// The elite pool gets the remaining fraction
    /// `1 - mutation_fraction - crossover_fraction`, rounded up and never
    /// smaller than one individual for a non-empty population, because the
    /// other two pools draw their parents from it. The mutation pool is
    /// sized next and the crossover pool takes whatever is left.
    pub fn partition(size: usize, mutation_fraction: f64, crossover_fraction: f64) -> Self {
        if size == 0 {
            return Self {
                elite: 0,
                mutation: 0,
                crossover: 0,
            };
        }
        let elite_fraction = 1.0 - mutation_fraction - crossover_fraction;
        let elite = pool_count(elite_fraction, size).max(1);
        let mutation = pool_count(mutation_fraction, size).min(size - elite);
        let crossover = size - elite - mutation;
        Self {
            elite,
            mutation,
            crossover,
        }
    }
}

/// Picks one parent index uniformly from `0..candidates`.
///
/// # Panics
/// Panics if `candidates` is zero.
pub fn select_parent<R: Rng>(candidates: usize, rng: &mut R) -> usize {
    assert!(candidates > 0, "cannot select from an empty pool");
    rng.random_range(0..candidates)
}

/// Picks two parent indices independently and uniformly from `0..candidates`.
///
/// The same index may be drawn twice.
///
/// # Panics
/// Panics if `candidates` is zero.
pub fn select_parent_pair<R: Rng>(candidates: usize, rng: &mut R) -> (usize, usize) {
    let first = select_parent(candidates, rng);
    let second = select_parent(candidates, rng);
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_pool_count_one_over_n_is_one() {
        for n in 1..=1000 {
            assert_eq!(pool_count(1.0 / n as f64, n), 1, "n = {n}");
        }
    }

    #[test]
    fn test_pool_count_rounds_up() {
        assert_eq!(pool_count(0.25, 10), 3);
        assert_eq!(pool_count(0.5, 10), 5);
        assert_eq!(pool_count(0.01, 10), 1);
    }

    #[test]
    fn test_pool_count_clamps() {
        assert_eq!(pool_count(0.0, 10), 0);
        assert_eq!(pool_count(-0.5, 10), 0);
        assert_eq!(pool_count(f64::NAN, 10), 0);
        assert_eq!(pool_count(1.0, 10), 10);
        assert_eq!(pool_count(3.0, 10), 10);
        assert_eq!(pool_count(0.5, 0), 0);
    }

    #[test]
    fn test_partition_sums_to_size() {
        for size in 0..50 {
            for (m, c) in [(0.25, 0.25), (0.0, 0.0), (0.5, 0.5), (0.1, 0.7), (0.33, 0.33)] {
                let pools = PoolSizes::partition(size, m, c);
                assert_eq!(pools.elite + pools.mutation + pools.crossover, size);
                if size > 0 {
                    assert!(pools.elite >= 1);
                }
            }
        }
    }

    #[test]
    fn test_partition_typical() {
        let pools = PoolSizes::partition(100, 0.25, 0.25);
        assert_eq!(
            pools,
            PoolSizes {
                elite: 50,
                mutation: 25,
                crossover: 25
            }
        );
    }

    #[test]
    fn test_partition_full_replacement_keeps_one_elite() {
        let pools = PoolSizes::partition(10, 0.5, 0.5);
        assert_eq!(pools.elite, 1);
        assert_eq!(pools.mutation, 5);
        assert_eq!(pools.crossover, 4);
    }

    #[test]
    fn test_select_parent_is_roughly_uniform() {
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[select_parent(4, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_select_parent_pair_in_range() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (a, b) = select_parent_pair(3, &mut rng);
            assert!(a < 3 && b < 3);
        }
        assert_eq!(select_parent_pair(1, &mut rng), (0, 0));
    }

    #[test]
    #[should_panic(expected = "cannot select from an empty pool")]
    fn test_empty_pool_panics() {
        let mut rng = create_rng(42);
        select_parent(0, &mut rng);
    }
}
