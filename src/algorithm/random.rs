//! Random-elitist algorithm.

use log::debug;
use rand::Rng;

use super::config::RandomAlgorithmOptions;
use super::GeneticAlgorithm;
use crate::error::PhaserError;
use crate::population::{pool_count, Population};

/// Keeps the best individuals and replaces everyone else with random
/// chromosomes.
///
/// Each round the population is ranked, the top
/// `ceil(elite_pool_size * size)` individuals are carried over unchanged and
/// every remaining slot gets a fresh chromosome with a length drawn from
/// `[min_chromosome_length, max_chromosome_length]`.
#[derive(Debug, Clone)]
pub struct RandomAlgorithm {
    options: RandomAlgorithmOptions,
}

impl RandomAlgorithm {
    /// Validates `options` and builds the algorithm.
    pub fn new(options: RandomAlgorithmOptions) -> Result<Self, PhaserError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &RandomAlgorithmOptions {
        &self.options
    }
}

impl GeneticAlgorithm for RandomAlgorithm {
    fn advance<R: Rng>(&self, population: Population, rng: &mut R) -> Result<Population, PhaserError> {
        if population.is_empty() {
            return Err(PhaserError::InvariantViolation(
                "random algorithm received an empty population".into(),
            ));
        }

        let size = population.len();
        let metric = population.fitness_metric().clone();
        let elite_count = pool_count(self.options.elite_pool_size, size);
        debug!("random round: {elite_count} elite, {} replaced", size - elite_count);

        let ranked = population.into_ranked();
        let elite = Population::from_individuals(
            metric.clone(),
            ranked.individuals()[..elite_count].to_vec(),
        );
        let replacements = Population::make_random(
            metric,
            size - elite_count,
            self.options.min_chromosome_length,
            self.options.max_chromosome_length,
            rng,
        );
        elite.union(replacements)
    }
}
