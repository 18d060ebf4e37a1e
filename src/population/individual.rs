//! A chromosome paired with its fitness.

use std::fmt;

use crate::chromosome::Chromosome;
use crate::fitness::FitnessMetric;

/// A candidate solution with its fitness under one metric.
///
/// Fitness is computed once, when the individual is created, and never
/// changes afterwards. Lower fitness is better.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: usize,
}

impl Individual {
    /// Evaluates `chromosome` under `metric`.
    pub fn new(chromosome: Chromosome, metric: &dyn FitnessMetric) -> Self {
        let fitness = metric.evaluate(&chromosome);
        Self {
            chromosome,
            fitness,
        }
    }

    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    pub fn fitness(&self) -> usize {
        self.fitness
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fitness: {}, optimisations: {}",
            self.fitness, self.chromosome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::ChromosomeLengthMetric;

    #[test]
    fn test_new_evaluates_fitness() {
        let individual = Individual::new("fcL".parse().unwrap(), &ChromosomeLengthMetric);
        assert_eq!(individual.fitness(), 3);
        assert_eq!(individual.chromosome().to_string(), "fcL");
    }

    #[test]
    fn test_display() {
        let individual = Individual::new("fc".parse().unwrap(), &ChromosomeLengthMetric);
        assert_eq!(individual.to_string(), "Fitness: 2, optimisations: fc");
    }
}
