//! Genetic search for Yul optimiser step orderings.
//!
//! Phaser looks for short sequences of optimisation steps that minimise the
//! size of an optimised program. Candidate sequences are evolved with a
//! genetic algorithm:
//!
//! - **Chromosome**: an immutable sequence of optimisation steps, written as
//!   a string of one-letter abbreviations (`"fcLxam"`).
//! - **Fitness metric**: a pure cost function; lower is better. The default
//!   metric is the size of the program after applying the chromosome.
//! - **Population**: individuals (chromosome + cached fitness) evaluated
//!   under one shared metric.
//! - **Algorithms**: a random-elitist scheme and GEWEP (Generational Elitist
//!   With Exclusive Pools).
//! - **Runner**: drives rounds with progress reports, duplicate
//!   randomisation and population autosave.
//! - **Factories**: turn user configuration into the components above,
//!   deriving dependent defaults once at startup.
//!
//! # Reproducibility
//!
//! Every random decision draws from an explicit generator created by
//! [`rng::create_rng`]. The same seed and configuration always produce the
//! same sequence of populations.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_phaser::algorithm::{GenerationalElitistWithExclusivePools, GewepOptions};
//! use u_phaser::fitness::{FitnessMetric, ProgramSize};
//! use u_phaser::population::Population;
//! use u_phaser::program::Program;
//! use u_phaser::rng::create_rng;
//! use u_phaser::runner::{AlgorithmRunner, RunnerOptions};
//!
//! let program = Program::load("{ a { b } { } }").unwrap();
//! let metric: Arc<dyn FitnessMetric> = Arc::new(ProgramSize::new(program, 1).unwrap());
//! let mut rng = create_rng(42);
//!
//! let population = Population::make_random(metric, 20, 5, 10, &mut rng);
//! let algorithm = GenerationalElitistWithExclusivePools::new(GewepOptions::new(10)).unwrap();
//! let mut runner = AlgorithmRunner::new(population, RunnerOptions::default().with_max_rounds(5));
//!
//! let result = runner.run(&algorithm, &mut rng, &mut std::io::sink()).unwrap();
//! assert_eq!(result.rounds, 5);
//! ```

pub mod algorithm;
pub mod chromosome;
pub mod error;
pub mod factory;
pub mod fitness;
pub mod population;
pub mod program;
pub mod rng;
pub mod runner;

pub use error::PhaserError;
