//! Round-by-round execution of a genetic algorithm.
//!
//! [`AlgorithmRunner`] owns the current population and repeats:
//! report → advance → randomise duplicates → autosave.

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use log::{debug, info};
use rand::Rng;

use crate::algorithm::GeneticAlgorithm;
use crate::chromosome::Chromosome;
use crate::error::PhaserError;
use crate::population::file::write_chromosomes;
use crate::population::{Individual, Population};

/// Options controlling a run.
///
/// # Examples
///
/// ```
/// use u_phaser::runner::RunnerOptions;
///
/// let options = RunnerOptions::default()
///     .with_max_rounds(100)
///     .with_randomise_duplicates(12, 30)
///     .with_population_autosave_file("population.txt");
/// assert_eq!(options.max_rounds, Some(100));
/// assert!(options.randomise_duplicates);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunnerOptions {
    /// Number of rounds after which the run stops. `None` runs until the
    /// process is interrupted.
    pub max_rounds: Option<usize>,

    /// File overwritten with the whole population after every round.
    pub population_autosave_file: Option<PathBuf>,

    /// Replace repeated chromosomes with random ones after every round.
    pub randomise_duplicates: bool,

    /// Length bounds for duplicate replacements. Required when
    /// `randomise_duplicates` is set.
    pub min_chromosome_length: Option<usize>,
    pub max_chromosome_length: Option<usize>,
}

impl RunnerOptions {
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    pub fn with_population_autosave_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.population_autosave_file = Some(path.into());
        self
    }

    /// Enables duplicate randomisation with replacements of
    /// `[min_length, max_length]` steps.
    pub fn with_randomise_duplicates(mut self, min_length: usize, max_length: usize) -> Self {
        self.randomise_duplicates = true;
        self.min_chromosome_length = Some(min_length);
        self.max_chromosome_length = Some(max_length);
        self
    }

    /// Length bounds for duplicate replacement, or `None` when disabled.
    ///
    /// Fails if randomisation is enabled without consistent bounds.
    fn duplicate_bounds(&self) -> Result<Option<(usize, usize)>, PhaserError> {
        if !self.randomise_duplicates {
            return Ok(None);
        }
        match (self.min_chromosome_length, self.max_chromosome_length) {
            (Some(min), Some(max)) if min <= max => Ok(Some((min, max))),
            (Some(min), Some(max)) => Err(PhaserError::Configuration(format!(
                "duplicate randomisation: min chromosome length ({min}) exceeds max ({max})"
            ))),
            _ => Err(PhaserError::Configuration(
                "duplicate randomisation requires min and max chromosome lengths".into(),
            )),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Number of rounds completed.
    pub rounds: usize,

    /// Lowest fitness seen after any round; `None` if no round ran.
    pub best_fitness: Option<usize>,
}

/// Drives a [`GeneticAlgorithm`] over an owned population.
///
/// The population is only ever replaced as a whole, after a round has fully
/// completed, so [`population`](Self::population) and the autosave file
/// always hold a fully evaluated generation.
///
/// # Usage
///
/// ```ignore
/// let mut runner = AlgorithmRunner::new(population, RunnerOptions::default().with_max_rounds(10));
/// let result = runner.run(&algorithm, &mut rng, &mut std::io::stdout())?;
/// ```
#[derive(Debug)]
pub struct AlgorithmRunner {
    population: Population,
    options: RunnerOptions,
}

impl AlgorithmRunner {
    pub fn new(initial_population: Population, options: RunnerOptions) -> Self {
        Self {
            population: initial_population,
            options,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Runs rounds until `max_rounds` is reached.
    ///
    /// Each round writes a report of the incoming population to `out`, asks
    /// `algorithm` for the next generation, randomises duplicates if enabled
    /// and finally autosaves. Any error aborts the run; the runner keeps the
    /// last completed generation.
    pub fn run<A, R, W>(&mut self, algorithm: &A, rng: &mut R, out: &mut W) -> Result<RunResult, PhaserError>
    where
        A: GeneticAlgorithm,
        R: Rng,
        W: Write,
    {
        let duplicate_bounds = self.options.duplicate_bounds()?;
        let mut best_fitness: Option<usize> = None;
        let mut round = 0;

        while self.options.max_rounds.map_or(true, |max| round < max) {
            self.report(round + 1, out)?;

            let mut next = algorithm.advance(self.population.clone(), rng)?;
            if let Some((min_length, max_length)) = duplicate_bounds {
                next = randomise_duplicates(next, min_length, max_length, rng);
            }
            self.population = next;
            round += 1;

            if let Some(best) = self.population.best() {
                debug!(
                    "round {round} complete, best fitness {}: {}",
                    best.fitness(),
                    step_names(best.chromosome())
                );
                let fitness = best.fitness();
                best_fitness = Some(best_fitness.map_or(fitness, |seen| seen.min(fitness)));
            }

            self.autosave()?;
        }

        info!("finished after {round} rounds");
        Ok(RunResult {
            rounds: round,
            best_fitness,
        })
    }

    fn report<W: Write>(&self, round: usize, out: &mut W) -> Result<(), PhaserError> {
        let write = |out: &mut W| -> std::io::Result<()> {
            writeln!(out)?;
            writeln!(out, "---------- ROUND {round} ----------")?;
            match self.population.best() {
                Some(best) => writeln!(out, "Best fitness: {}", best.fitness())?,
                None => writeln!(out, "Best fitness: -")?,
            }
            write!(out, "{}", self.population)?;
            out.flush()
        };
        write(out).map_err(PhaserError::Report)
    }

    fn autosave(&self) -> Result<(), PhaserError> {
        if let Some(path) = &self.options.population_autosave_file {
            write_chromosomes(path, self.population.chromosomes())?;
            debug!("population saved to {}", path.display());
        }
        Ok(())
    }
}

/// Full step names of `chromosome`, space separated.
fn step_names(chromosome: &Chromosome) -> String {
    chromosome
        .steps()
        .iter()
        .map(|step| step.name())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces every chromosome that repeats an earlier one in `population`
/// with a random chromosome of `[min_length, max_length]` steps.
///
/// Positions are preserved and only the replacements are evaluated. A
/// replacement that happens to collide with an existing chromosome is kept.
pub fn randomise_duplicates<R: Rng>(
    population: Population,
    min_length: usize,
    max_length: usize,
    rng: &mut R,
) -> Population {
    let metric = population.fitness_metric().clone();
    let mut seen: HashSet<&Chromosome> = HashSet::with_capacity(population.len());
    let mut replaced = 0;

    let individuals: Vec<Individual> = population
        .individuals()
        .iter()
        .map(|individual| {
            if seen.insert(individual.chromosome()) {
                individual.clone()
            } else {
                replaced += 1;
                let chromosome = Chromosome::random(rng, min_length, max_length);
                Individual::new(chromosome, metric.as_ref())
            }
        })
        .collect();

    if replaced > 0 {
        debug!("randomised {replaced} duplicate chromosomes");
    }
    Population::from_individuals(metric, individuals)
}
