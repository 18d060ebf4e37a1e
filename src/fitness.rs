//! Fitness metrics.
//!
//! A [`FitnessMetric`] maps a chromosome to a cost. Lower is better. Metrics
//! are pure: the same chromosome always yields the same cost, which lets
//! [`Individual`](crate::population::Individual)s cache their fitness.

use std::fmt;

use crate::chromosome::Chromosome;
use crate::error::PhaserError;
use crate::program::Program;

/// Evaluates chromosomes.
///
/// Implementations must be deterministic and hold no mutable state.
pub trait FitnessMetric: fmt::Debug + Send + Sync {
    /// Returns the cost of `chromosome`. Lower is better.
    fn evaluate(&self, chromosome: &Chromosome) -> usize;
}

/// Size of the program after running the chromosome's steps on it.
///
/// With a repetition count of `R` the whole step sequence is applied `R`
/// times in a row to the same, progressively optimised program.
#[derive(Debug, Clone)]
pub struct ProgramSize {
    program: Program,
    repetition_count: usize,
}

impl ProgramSize {
    /// Creates the metric.
    ///
    /// Returns `Err` if `repetition_count` is zero.
    pub fn new(program: Program, repetition_count: usize) -> Result<Self, PhaserError> {
        if repetition_count == 0 {
            return Err(PhaserError::Configuration(
                "chromosome repetition count must be at least 1".into(),
            ));
        }
        Ok(Self {
            program,
            repetition_count,
        })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn repetition_count(&self) -> usize {
        self.repetition_count
    }

    /// The program after running `chromosome` the configured number of times.
    pub fn optimised_program(&self, chromosome: &Chromosome) -> Program {
        (0..self.repetition_count).fold(self.program.clone(), |program, _| {
            program.optimise(chromosome.steps())
        })
    }
}

impl FitnessMetric for ProgramSize {
    fn evaluate(&self, chromosome: &Chromosome) -> usize {
        self.optimised_program(chromosome).code_size()
    }
}

/// Fitness equal to the chromosome length; shorter is better.
///
/// Handy wherever the program itself is irrelevant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromosomeLengthMetric;

impl FitnessMetric for ChromosomeLengthMetric {
    fn evaluate(&self, chromosome: &Chromosome) -> usize {
        chromosome.len()
    }
}
