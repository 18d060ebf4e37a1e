//! The chromosome value type.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::step::OptimisationStep;
use crate::error::PhaserError;

/// An ordered sequence of optimiser steps.
///
/// Chromosomes are values: every edit returns a new chromosome and leaves
/// the original untouched. Two chromosomes are equal when their step
/// sequences are equal. The empty chromosome is valid.
///
/// # Examples
///
/// ```
/// use u_phaser::chromosome::Chromosome;
///
/// let chromosome: Chromosome = "fcL".parse().unwrap();
/// assert_eq!(chromosome.len(), 3);
/// assert_eq!(chromosome.to_string(), "fcL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Chromosome {
    steps: Vec<OptimisationStep>,
}

impl Chromosome {
    pub fn new(steps: Vec<OptimisationStep>) -> Self {
        Self { steps }
    }

    /// Builds a chromosome whose length is drawn uniformly from
    /// `[min_length, max_length]` and whose steps are drawn uniformly from
    /// the catalog.
    ///
    /// # Panics
    /// Panics if `min_length > max_length`.
    pub fn random<R: Rng>(rng: &mut R, min_length: usize, max_length: usize) -> Self {
        assert!(
            min_length <= max_length,
            "min_length ({min_length}) must not exceed max_length ({max_length})"
        );
        let length = rng.random_range(min_length..=max_length);
        Self::make_random(rng, length)
    }

    /// Builds a chromosome of exactly `length` random steps.
    pub fn make_random<R: Rng>(rng: &mut R, length: usize) -> Self {
        Self {
            steps: (0..length).map(|_| OptimisationStep::random(rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[OptimisationStep] {
        &self.steps
    }

    /// Returns a copy with the step at `index` replaced by `step`.
    ///
    /// An out-of-range index yields an unchanged copy.
    pub fn with_step_replaced(&self, index: usize, step: OptimisationStep) -> Self {
        let mut steps = self.steps.clone();
        if let Some(slot) = steps.get_mut(index) {
            *slot = step;
        }
        Self { steps }
    }

    /// Returns a copy with `step` inserted before position `index`.
    ///
    /// `index == len()` appends; larger indices are clamped to the end.
    pub fn with_step_inserted(&self, index: usize, step: OptimisationStep) -> Self {
        let mut steps = self.steps.clone();
        steps.insert(index.min(steps.len()), step);
        Self { steps }
    }

    /// Returns a copy without the step at `index`.
    ///
    /// On an empty chromosome or an out-of-range index this is a no-op.
    pub fn with_step_removed(&self, index: usize) -> Self {
        let mut steps = self.steps.clone();
        if index < steps.len() {
            steps.remove(index);
        }
        Self { steps }
    }
}

impl From<Vec<OptimisationStep>> for Chromosome {
    fn from(steps: Vec<OptimisationStep>) -> Self {
        Self::new(steps)
    }
}

impl FromStr for Chromosome {
    type Err = PhaserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .chars()
            .map(|c| {
                OptimisationStep::from_abbreviation(c).ok_or_else(|| {
                    PhaserError::InvalidChromosome {
                        chromosome: s.to_string(),
                        abbreviation: c,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step.abbreviation())?;
        }
        Ok(())
    }
}
