//! Genetic algorithms.
//!
//! A [`GeneticAlgorithm`] turns one population into the next generation,
//! evaluated under the same metric. Two algorithms exist:
//!
//! - [`RandomAlgorithm`]: keep an elite, replace the rest with random chromosomes
//! - [`GenerationalElitistWithExclusivePools`] (GEWEP): exclusive elite,
//!   mutation and crossover pools
//!
//! [`Strategy`] holds whichever one the configuration selected.
//!
//! # Reproducibility
//!
//! Algorithms hold no mutable state. All randomness comes from the `rng`
//! passed to [`advance`](GeneticAlgorithm::advance), so the same seed and
//! input population give the same next generation.

mod config;
mod gewep;
mod random;

use rand::Rng;

use crate::error::PhaserError;
use crate::population::Population;

pub use config::{
    default_elite_pool_size, default_gene_probability, GewepOptions, RandomAlgorithmOptions,
};
pub use gewep::{GenerationalElitistWithExclusivePools, MutationKind};
pub use random::RandomAlgorithm;

/// Produces the next generation from the current one.
pub trait GeneticAlgorithm {
    /// Consumes `population` and returns its successor.
    ///
    /// Fails with [`PhaserError::InvariantViolation`] on an empty population.
    fn advance<R: Rng>(&self, population: Population, rng: &mut R) -> Result<Population, PhaserError>;
}

/// The algorithm selected for a run.
#[derive(Debug, Clone)]
pub enum Strategy {
    Random(RandomAlgorithm),
    Gewep(GenerationalElitistWithExclusivePools),
}

impl GeneticAlgorithm for Strategy {
    fn advance<R: Rng>(&self, population: Population, rng: &mut R) -> Result<Population, PhaserError> {
        match self {
            Strategy::Random(algorithm) => algorithm.advance(population, rng),
            Strategy::Gewep(algorithm) => algorithm.advance(population, rng),
        }
    }
}

impl From<RandomAlgorithm> for Strategy {
    fn from(algorithm: RandomAlgorithm) -> Self {
        Strategy::Random(algorithm)
    }
}

impl From<GenerationalElitistWithExclusivePools> for Strategy {
    fn from(algorithm: GenerationalElitistWithExclusivePools) -> Self {
        Strategy::Gewep(algorithm)
    }
}
