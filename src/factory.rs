//! Configuration resolution.
//!
//! Each factory turns a plain options struct into a ready-to-run component.
//! Defaults that depend on other configuration are resolved here, once,
//! before the first round:
//!
//! - the random algorithm's elite pool defaults to one survivor
//!   ([`default_elite_pool_size`])
//! - GEWEP's per-gene probabilities default to one gene per chromosome
//!   ([`default_gene_probability`])

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use log::info;
use rand::Rng;

use crate::algorithm::{
    default_elite_pool_size, default_gene_probability, GenerationalElitistWithExclusivePools,
    GewepOptions, RandomAlgorithm, RandomAlgorithmOptions, Strategy,
};
use crate::chromosome::Chromosome;
use crate::error::PhaserError;
use crate::fitness::{FitnessMetric, ProgramSize};
use crate::population::file::read_chromosomes;
use crate::population::Population;
use crate::program::Program;

/// Which genetic algorithm drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Random,
    #[default]
    Gewep,
}

impl FromStr for Algorithm {
    type Err = PhaserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Algorithm::Random),
            "gewep" => Ok(Algorithm::Gewep),
            _ => Err(PhaserError::Configuration(format!(
                "unknown algorithm {s:?}, expected \"random\" or \"GEWEP\""
            ))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Random => write!(f, "random"),
            Algorithm::Gewep => write!(f, "GEWEP"),
        }
    }
}

/// Algorithm configuration as supplied by the user.
///
/// `None` fields are derived by [`GeneticAlgorithmFactory::build`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmFactoryOptions {
    pub algorithm: Algorithm,
    pub min_chromosome_length: usize,
    pub max_chromosome_length: usize,
    pub random_elite_pool_size: Option<f64>,
    pub gewep_mutation_pool_size: f64,
    pub gewep_crossover_pool_size: f64,
    pub gewep_randomisation_chance: f64,
    pub gewep_deletion_vs_addition_chance: f64,
    pub gewep_genes_to_randomise: Option<f64>,
    pub gewep_genes_to_add_or_delete: Option<f64>,
}

impl Default for AlgorithmFactoryOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Gewep,
            min_chromosome_length: 12,
            max_chromosome_length: 30,
            random_elite_pool_size: None,
            gewep_mutation_pool_size: 0.25,
            gewep_crossover_pool_size: 0.25,
            gewep_randomisation_chance: 0.9,
            gewep_deletion_vs_addition_chance: 0.5,
            gewep_genes_to_randomise: None,
            gewep_genes_to_add_or_delete: None,
        }
    }
}

pub struct GeneticAlgorithmFactory;

impl GeneticAlgorithmFactory {
    /// Builds the selected algorithm for a population of `population_size`.
    ///
    /// Out-of-range values are rejected rather than clamped.
    pub fn build(
        options: &AlgorithmFactoryOptions,
        population_size: usize,
    ) -> Result<Strategy, PhaserError> {
        if population_size == 0 {
            return Err(PhaserError::Configuration("initial population is empty".into()));
        }

        let strategy = match options.algorithm {
            Algorithm::Random => {
                let elite_pool_size = options
                    .random_elite_pool_size
                    .unwrap_or_else(|| default_elite_pool_size(population_size));
                let algorithm = RandomAlgorithm::new(RandomAlgorithmOptions {
                    elite_pool_size,
                    min_chromosome_length: options.min_chromosome_length,
                    max_chromosome_length: options.max_chromosome_length,
                })?;
                Strategy::Random(algorithm)
            }
            Algorithm::Gewep => {
                let gene_probability = || default_gene_probability(options.max_chromosome_length);
                let algorithm = GenerationalElitistWithExclusivePools::new(GewepOptions {
                    mutation_pool_size: options.gewep_mutation_pool_size,
                    crossover_pool_size: options.gewep_crossover_pool_size,
                    randomisation_chance: options.gewep_randomisation_chance,
                    deletion_vs_addition_chance: options.gewep_deletion_vs_addition_chance,
                    percent_genes_to_randomise: options
                        .gewep_genes_to_randomise
                        .unwrap_or_else(gene_probability),
                    percent_genes_to_add_or_delete: options
                        .gewep_genes_to_add_or_delete
                        .unwrap_or_else(gene_probability),
                })?;
                Strategy::Gewep(algorithm)
            }
        };

        info!("using the {} algorithm", options.algorithm);
        Ok(strategy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricFactoryOptions {
    /// How many times the chromosome runs on the program during evaluation.
    pub chromosome_repetitions: usize,
}

impl Default for MetricFactoryOptions {
    fn default() -> Self {
        Self {
            chromosome_repetitions: 1,
        }
    }
}

pub struct FitnessMetricFactory;

impl FitnessMetricFactory {
    /// Builds a [`ProgramSize`] metric over `program`.
    pub fn build(
        options: &MetricFactoryOptions,
        program: Program,
    ) -> Result<Arc<dyn FitnessMetric>, PhaserError> {
        Ok(Arc::new(ProgramSize::new(
            program,
            options.chromosome_repetitions,
        )?))
    }
}

/// Sources of the initial population.
///
/// All sources are combined: explicit chromosomes first, then the random
/// ones, then each file in order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationFactoryOptions {
    pub min_chromosome_length: usize,
    pub max_chromosome_length: usize,

    /// Chromosomes written as step abbreviations.
    pub population: Vec<String>,

    /// Counts of random chromosomes; the counts are summed.
    pub random_population: Vec<usize>,

    /// Files with one chromosome per line.
    pub population_from_file: Vec<PathBuf>,
}

pub struct PopulationFactory;

impl PopulationFactory {
    /// Builds the initial population from every configured source.
    ///
    /// Fails on the first unparsable chromosome or unreadable file.
    pub fn build<R: Rng>(
        options: &PopulationFactoryOptions,
        metric: Arc<dyn FitnessMetric>,
        rng: &mut R,
    ) -> Result<Population, PhaserError> {
        if options.min_chromosome_length > options.max_chromosome_length {
            return Err(PhaserError::Configuration(format!(
                "min chromosome length ({}) must not exceed max chromosome length ({})",
                options.min_chromosome_length, options.max_chromosome_length
            )));
        }

        let mut population = Self::build_from_strings(&options.population, metric.clone())?;

        let random_count: usize = options.random_population.iter().sum();
        population = population.union(Self::build_random(
            random_count,
            options.min_chromosome_length,
            options.max_chromosome_length,
            metric.clone(),
            rng,
        ))?;

        for path in &options.population_from_file {
            population = population.union(Self::build_from_file(path, metric.clone())?)?;
        }

        info!("initial population has {} individuals", population.len());
        Ok(population)
    }

    pub fn build_from_strings(
        chromosomes: &[String],
        metric: Arc<dyn FitnessMetric>,
    ) -> Result<Population, PhaserError> {
        let chromosomes = chromosomes
            .iter()
            .map(|s| s.parse::<Chromosome>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Population::new(metric, chromosomes))
    }

    pub fn build_random<R: Rng>(
        count: usize,
        min_length: usize,
        max_length: usize,
        metric: Arc<dyn FitnessMetric>,
        rng: &mut R,
    ) -> Population {
        Population::make_random(metric, count, min_length, max_length, rng)
    }

    pub fn build_from_file(
        path: &Path,
        metric: Arc<dyn FitnessMetric>,
    ) -> Result<Population, PhaserError> {
        Ok(Population::new(metric, read_chromosomes(path)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramFactoryOptions {
    pub input_file: PathBuf,
}

pub struct ProgramFactory;

impl ProgramFactory {
    /// Reads and parses the program in `options.input_file`.
    pub fn build(options: &ProgramFactoryOptions) -> Result<Program, PhaserError> {
        let path = &options.input_file;
        let source =
            fs::read_to_string(path).map_err(|source| PhaserError::file_access(path, source))?;
        Program::load(&source).map_err(|errors| PhaserError::ProgramLoad {
            path: path.display().to_string(),
            errors,
        })
    }
}
