//! Chromosomes: candidate optimiser pipelines.
//!
//! A [`Chromosome`] is an immutable sequence of [`OptimisationStep`]s drawn
//! from a fixed catalog. The [`operators`] submodule provides the stochastic
//! mutation and crossover operators used by the genetic algorithms.

pub mod operators;
mod step;
mod types;

pub use step::OptimisationStep;
pub use types::Chromosome;
