//! Algorithm options.
//!
//! Options are plain structs with `with_*` builders. Builders clamp
//! fractions and probabilities into `[0, 1]`; [`validate`](GewepOptions::validate)
//! rejects combinations that cannot describe a valid round.
//!
//! Values that depend on other configuration (population size, maximum
//! chromosome length) are derived once, up front, by [`default_elite_pool_size`]
//! and [`default_gene_probability`].

use crate::error::PhaserError;

/// Elite pool fraction that keeps exactly one individual of a population
/// of `population_size`.
pub fn default_elite_pool_size(population_size: usize) -> f64 {
    1.0 / population_size as f64
}

/// Per-gene mutation probability that changes one gene on average in a
/// chromosome of `max_chromosome_length` steps.
pub fn default_gene_probability(max_chromosome_length: usize) -> f64 {
    1.0 / max_chromosome_length as f64
}

fn check_probability(name: &str, value: f64) -> Result<(), PhaserError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PhaserError::Configuration(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

fn check_lengths(min: usize, max: usize) -> Result<(), PhaserError> {
    if min > max {
        return Err(PhaserError::Configuration(format!(
            "min chromosome length ({min}) must not exceed max chromosome length ({max})"
        )));
    }
    Ok(())
}

/// Options of the [`RandomAlgorithm`](super::RandomAlgorithm).
///
/// # Examples
///
/// ```
/// use u_phaser::algorithm::RandomAlgorithmOptions;
///
/// let options = RandomAlgorithmOptions::for_population(100, 12, 30);
/// assert_eq!(options.elite_pool_size, 0.01);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomAlgorithmOptions {
    /// Fraction of the population carried over unchanged each round.
    pub elite_pool_size: f64,

    /// Bounds for the freshly generated chromosomes.
    pub min_chromosome_length: usize,
    pub max_chromosome_length: usize,
}

impl RandomAlgorithmOptions {
    /// Options keeping a single elite individual of `population_size`.
    pub fn for_population(
        population_size: usize,
        min_chromosome_length: usize,
        max_chromosome_length: usize,
    ) -> Self {
        Self {
            elite_pool_size: default_elite_pool_size(population_size),
            min_chromosome_length,
            max_chromosome_length,
        }
    }

    pub fn with_elite_pool_size(mut self, fraction: f64) -> Self {
        self.elite_pool_size = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn validate(&self) -> Result<(), PhaserError> {
        check_probability("elite pool size", self.elite_pool_size)?;
        check_lengths(self.min_chromosome_length, self.max_chromosome_length)
    }
}

/// Options of [`GenerationalElitistWithExclusivePools`](super::GenerationalElitistWithExclusivePools).
///
/// The elite pool is the fraction left after the mutation and crossover pools:
/// `1 - mutation_pool_size - crossover_pool_size`.
///
/// # Examples
///
/// ```
/// use u_phaser::algorithm::GewepOptions;
///
/// let options = GewepOptions::new(30)
///     .with_mutation_pool_size(0.3)
///     .with_crossover_pool_size(0.2)
///     .with_randomisation_chance(0.8);
/// assert!(options.validate().is_ok());
/// assert!((options.elite_pool_size() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GewepOptions {
    /// Fraction of the population regenerated by mutation each round.
    pub mutation_pool_size: f64,

    /// Fraction of the population regenerated by crossover each round.
    pub crossover_pool_size: f64,

    /// Probability that a mutation child comes from gene randomisation
    /// rather than a structural edit.
    pub randomisation_chance: f64,

    /// Probability that a structural edit is a deletion rather than an addition.
    pub deletion_vs_addition_chance: f64,

    /// Per-gene replacement probability during gene randomisation.
    pub percent_genes_to_randomise: f64,

    /// Per-gene probability of an addition or deletion.
    pub percent_genes_to_add_or_delete: f64,
}

impl GewepOptions {
    /// Creates options with the tool defaults: pools of 0.25 each,
    /// randomisation chance 0.9, deletion-vs-addition 0.5 and per-gene
    /// probabilities of `1 / max_chromosome_length`.
    pub fn new(max_chromosome_length: usize) -> Self {
        let gene_probability = default_gene_probability(max_chromosome_length);
        Self {
            mutation_pool_size: 0.25,
            crossover_pool_size: 0.25,
            randomisation_chance: 0.9,
            deletion_vs_addition_chance: 0.5,
            percent_genes_to_randomise: gene_probability,
            percent_genes_to_add_or_delete: gene_probability,
        }
    }

    pub fn with_mutation_pool_size(mut self, fraction: f64) -> Self {
        self.mutation_pool_size = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_crossover_pool_size(mut self, fraction: f64) -> Self {
        self.crossover_pool_size = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_randomisation_chance(mut self, chance: f64) -> Self {
        self.randomisation_chance = chance.clamp(0.0, 1.0);
        self
    }

    pub fn with_deletion_vs_addition_chance(mut self, chance: f64) -> Self {
        self.deletion_vs_addition_chance = chance.clamp(0.0, 1.0);
        self
    }

    pub fn with_percent_genes_to_randomise(mut self, chance: f64) -> Self {
        self.percent_genes_to_randomise = chance.clamp(0.0, 1.0);
        self
    }

    pub fn with_percent_genes_to_add_or_delete(mut self, chance: f64) -> Self {
        self.percent_genes_to_add_or_delete = chance.clamp(0.0, 1.0);
        self
    }

    /// Fraction of the population kept unchanged each round.
    pub fn elite_pool_size(&self) -> f64 {
        1.0 - self.mutation_pool_size - self.crossover_pool_size
    }

    /// Validates the options.
    ///
    /// Fails if any fraction or probability lies outside `[0, 1]` or the
    /// mutation and crossover pools together exceed the whole population.
    pub fn validate(&self) -> Result<(), PhaserError> {
        check_probability("mutation pool size", self.mutation_pool_size)?;
        check_probability("crossover pool size", self.crossover_pool_size)?;
        check_probability("randomisation chance", self.randomisation_chance)?;
        check_probability("deletion vs addition chance", self.deletion_vs_addition_chance)?;
        check_probability("percent of genes to randomise", self.percent_genes_to_randomise)?;
        check_probability(
            "percent of genes to add or delete",
            self.percent_genes_to_add_or_delete,
        )?;
        if self.mutation_pool_size + self.crossover_pool_size > 1.0 {
            return Err(PhaserError::Configuration(format!(
                "mutation pool size ({}) + crossover pool size ({}) must not exceed 1",
                self.mutation_pool_size, self.crossover_pool_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_elite_pool_size() {
        assert_eq!(default_elite_pool_size(100), 1.0 / 100.0);
        assert_eq!(default_elite_pool_size(1), 1.0);
    }

    #[test]
    fn test_default_gene_probability() {
        assert_eq!(default_gene_probability(125), 1.0 / 125.0);
    }

    #[test]
    fn test_random_options_for_population() {
        let options = RandomAlgorithmOptions::for_population(100, 5, 10);
        assert_eq!(options.elite_pool_size, 1.0 / 100.0);
        assert_eq!(options.min_chromosome_length, 5);
        assert_eq!(options.max_chromosome_length, 10);
    }

    #[test]
    fn test_random_options_validate() {
        assert!(RandomAlgorithmOptions::for_population(10, 5, 10).validate().is_ok());
        assert!(RandomAlgorithmOptions::for_population(10, 11, 10).validate().is_err());

        let mut options = RandomAlgorithmOptions::for_population(10, 0, 0);
        options.elite_pool_size = 1.5;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_random_options_clamp() {
        let options = RandomAlgorithmOptions::for_population(10, 0, 0).with_elite_pool_size(2.0);
        assert_eq!(options.elite_pool_size, 1.0);
    }

    #[test]
    fn test_gewep_defaults() {
        let options = GewepOptions::new(30);
        assert_eq!(options.mutation_pool_size, 0.25);
        assert_eq!(options.crossover_pool_size, 0.25);
        assert_eq!(options.randomisation_chance, 0.9);
        assert_eq!(options.deletion_vs_addition_chance, 0.5);
        assert_eq!(options.percent_genes_to_randomise, 1.0 / 30.0);
        assert_eq!(options.percent_genes_to_add_or_delete, 1.0 / 30.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_gewep_clamp() {
        let options = GewepOptions::new(10)
            .with_mutation_pool_size(-1.0)
            .with_crossover_pool_size(1.5)
            .with_randomisation_chance(2.0)
            .with_deletion_vs_addition_chance(-0.1)
            .with_percent_genes_to_randomise(7.0)
            .with_percent_genes_to_add_or_delete(-7.0);
        assert_eq!(options.mutation_pool_size, 0.0);
        assert_eq!(options.crossover_pool_size, 1.0);
        assert_eq!(options.randomisation_chance, 1.0);
        assert_eq!(options.deletion_vs_addition_chance, 0.0);
        assert_eq!(options.percent_genes_to_randomise, 1.0);
        assert_eq!(options.percent_genes_to_add_or_delete, 0.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_gewep_pools_exceeding_population() {
        let options = GewepOptions::new(10)
            .with_mutation_pool_size(0.6)
            .with_crossover_pool_size(0.5);
        let err = options.validate().unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_gewep_zero_max_length_fails_validation() {
        assert!(GewepOptions::new(0).validate().is_err());
    }
}
