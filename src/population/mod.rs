//! Individuals, populations and the pools they are split into.
//!
//! # Key Types
//!
//! - [`Individual`]: a chromosome with its cached fitness
//! - [`Population`]: individuals sharing one [`FitnessMetric`](crate::fitness::FitnessMetric)
//! - [`PoolSizes`]: exclusive elite / mutation / crossover split of a round
//!
//! # Submodules
//!
//! - [`file`]: reading and autosaving populations as plain text

pub mod file;
mod individual;
mod selection;
mod types;

pub use individual::Individual;
pub use selection::{pool_count, select_parent, select_parent_pair, PoolSizes};
pub use types::Population;
