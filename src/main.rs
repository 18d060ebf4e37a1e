//! `phaser`: command-line front end of the optimiser step sequence search.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use u_phaser::factory::{
    Algorithm, AlgorithmFactoryOptions, FitnessMetricFactory, GeneticAlgorithmFactory,
    MetricFactoryOptions, PopulationFactory, PopulationFactoryOptions, ProgramFactory,
    ProgramFactoryOptions,
};
use u_phaser::rng::{create_rng, generate_seed};
use u_phaser::runner::{AlgorithmRunner, RunnerOptions};
use u_phaser::PhaserError;

#[derive(Parser, Debug)]
#[command(name = "phaser")]
#[command(about = "Genetic search for good Yul optimiser step sequences")]
#[command(version)]
struct Cli {
    /// Program whose optimised size is minimised
    input_file: PathBuf,

    /// Seed for the random number generator; drawn from the OS if omitted
    #[arg(long)]
    seed: Option<u32>,

    /// Stop after this many rounds; run until interrupted if omitted
    #[arg(long)]
    rounds: Option<usize>,

    /// Genetic algorithm: "random" or "GEWEP"
    #[arg(long, default_value = "GEWEP")]
    algorithm: Algorithm,

    /// Keep duplicate chromosomes instead of replacing them with random ones
    #[arg(long)]
    no_randomise_duplicates: bool,

    #[arg(long, default_value_t = 12)]
    min_chromosome_length: usize,

    #[arg(long, default_value_t = 30)]
    max_chromosome_length: usize,

    /// Fraction of the population kept by the random algorithm
    /// [default: one individual]
    #[arg(long)]
    random_elite_pool_size: Option<f64>,

    /// Fraction of the population regenerated by mutation
    #[arg(long, default_value_t = 0.25)]
    gewep_mutation_pool_size: f64,

    /// Fraction of the population regenerated by crossover
    #[arg(long, default_value_t = 0.25)]
    gewep_crossover_pool_size: f64,

    /// Chance of gene randomisation rather than addition or deletion
    #[arg(long, default_value_t = 0.9)]
    gewep_randomisation_chance: f64,

    /// Chance of deletion rather than addition
    #[arg(long, default_value_t = 0.5)]
    gewep_deletion_vs_addition_chance: f64,

    /// Per-gene randomisation probability [default: 1 / max chromosome length]
    #[arg(long)]
    gewep_genes_to_randomise: Option<f64>,

    /// Per-gene addition or deletion probability [default: 1 / max chromosome length]
    #[arg(long)]
    gewep_genes_to_add_or_delete: Option<f64>,

    /// Chromosomes to include in the initial population
    #[arg(long, num_args = 1..)]
    population: Vec<String>,

    /// Number of random chromosomes to add to the initial population
    #[arg(long, num_args = 1..)]
    random_population: Vec<usize>,

    /// Files with chromosomes to add to the initial population, one per line
    #[arg(long, num_args = 1..)]
    population_from_file: Vec<PathBuf>,

    /// File overwritten with the population after every round
    #[arg(long)]
    population_autosave: Option<PathBuf>,

    /// Number of times each chromosome is applied to the program when
    /// measuring fitness
    #[arg(long, default_value_t = 1)]
    chromosome_repetitions: usize,
}

impl Cli {
    fn algorithm_options(&self) -> AlgorithmFactoryOptions {
        AlgorithmFactoryOptions {
            algorithm: self.algorithm,
            min_chromosome_length: self.min_chromosome_length,
            max_chromosome_length: self.max_chromosome_length,
            random_elite_pool_size: self.random_elite_pool_size,
            gewep_mutation_pool_size: self.gewep_mutation_pool_size,
            gewep_crossover_pool_size: self.gewep_crossover_pool_size,
            gewep_randomisation_chance: self.gewep_randomisation_chance,
            gewep_deletion_vs_addition_chance: self.gewep_deletion_vs_addition_chance,
            gewep_genes_to_randomise: self.gewep_genes_to_randomise,
            gewep_genes_to_add_or_delete: self.gewep_genes_to_add_or_delete,
        }
    }

    fn population_options(&self) -> PopulationFactoryOptions {
        PopulationFactoryOptions {
            min_chromosome_length: self.min_chromosome_length,
            max_chromosome_length: self.max_chromosome_length,
            population: self.population.clone(),
            random_population: self.random_population.clone(),
            population_from_file: self.population_from_file.clone(),
        }
    }

    fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            max_rounds: self.rounds,
            population_autosave_file: self.population_autosave.clone(),
            randomise_duplicates: !self.no_randomise_duplicates,
            min_chromosome_length: Some(self.min_chromosome_length),
            max_chromosome_length: Some(self.max_chromosome_length),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    run(&cli).map_err(with_usage_hint)
}

/// Points configuration errors back at the command-line options.
fn with_usage_hint(err: anyhow::Error) -> anyhow::Error {
    let is_configuration = err
        .downcast_ref::<PhaserError>()
        .is_some_and(PhaserError::is_configuration_error);
    if is_configuration {
        err.context("check the command-line options, see `phaser --help`")
    } else {
        err
    }
}

fn run(cli: &Cli) -> Result<()> {
    let seed = cli.seed.unwrap_or_else(generate_seed);
    println!("Random seed: {seed}");
    let mut rng = create_rng(seed);

    let program = ProgramFactory::build(&ProgramFactoryOptions {
        input_file: cli.input_file.clone(),
    })
    .context("failed to load the input program")?;

    let metric = FitnessMetricFactory::build(
        &MetricFactoryOptions {
            chromosome_repetitions: cli.chromosome_repetitions,
        },
        program,
    )
    .context("invalid fitness metric configuration")?;

    let population = PopulationFactory::build(&cli.population_options(), metric, &mut rng)
        .context("failed to build the initial population")?;

    let algorithm = GeneticAlgorithmFactory::build(&cli.algorithm_options(), population.len())
        .context("invalid algorithm configuration")?;

    info!(
        "starting {} with {} individuals",
        cli.algorithm,
        population.len()
    );
    let mut runner = AlgorithmRunner::new(population, cli.runner_options());
    let mut out = io::stdout().lock();
    runner
        .run(&algorithm, &mut rng, &mut out)
        .context("run aborted")?;

    Ok(())
}
