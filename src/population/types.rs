//! The population value type.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use super::individual::Individual;
use crate::chromosome::Chromosome;
use crate::error::PhaserError;
use crate::fitness::FitnessMetric;

/// A collection of individuals evaluated under one shared metric.
///
/// Populations are replaced wholesale, never edited in place: every
/// operation returns a new population. Individuals keep the order in which
/// they were added; [`ranked`](Self::ranked) gives the fitness order.
///
/// Equality compares the metric by identity and the individuals as a
/// multiset, so order does not matter but multiplicity does.
#[derive(Debug, Clone)]
pub struct Population {
    metric: Arc<dyn FitnessMetric>,
    individuals: Vec<Individual>,
}

impl Population {
    /// Evaluates `chromosomes` under `metric`.
    pub fn new(metric: Arc<dyn FitnessMetric>, chromosomes: Vec<Chromosome>) -> Self {
        let individuals = chromosomes
            .into_iter()
            .map(|chromosome| Individual::new(chromosome, metric.as_ref()))
            .collect();
        Self {
            metric,
            individuals,
        }
    }

    /// Wraps already evaluated individuals.
    ///
    /// The caller guarantees they were evaluated under `metric`.
    pub fn from_individuals(metric: Arc<dyn FitnessMetric>, individuals: Vec<Individual>) -> Self {
        Self {
            metric,
            individuals,
        }
    }

    /// Builds `size` individuals from random chromosomes, each with a length
    /// drawn independently from `[min_length, max_length]`.
    pub fn make_random<R: Rng>(
        metric: Arc<dyn FitnessMetric>,
        size: usize,
        min_length: usize,
        max_length: usize,
        rng: &mut R,
    ) -> Self {
        let chromosomes = (0..size)
            .map(|_| Chromosome::random(rng, min_length, max_length))
            .collect();
        Self::new(metric, chromosomes)
    }

    pub fn fitness_metric(&self) -> &Arc<dyn FitnessMetric> {
        &self.metric
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &Chromosome> {
        self.individuals.iter().map(Individual::chromosome)
    }

    /// Whether `other` shares this population's metric instance.
    pub fn shares_metric_with(&self, other: &Population) -> bool {
        same_metric(&self.metric, &other.metric)
    }

    /// Returns every individual of `self` followed by every individual of
    /// `other`. No deduplication takes place.
    ///
    /// Fails with [`PhaserError::InvariantViolation`] if the two populations
    /// do not share the same metric instance.
    pub fn union(self, other: Population) -> Result<Population, PhaserError> {
        if !self.shares_metric_with(&other) {
            return Err(PhaserError::InvariantViolation(
                "cannot combine populations evaluated under different fitness metrics".into(),
            ));
        }
        let mut individuals = self.individuals;
        individuals.extend(other.individuals);
        Ok(Self {
            metric: self.metric,
            individuals,
        })
    }

    /// Individuals sorted by ascending fitness, best first.
    ///
    /// The sort is stable: equally fit individuals keep their relative order.
    pub fn ranked(&self) -> Population {
        self.clone().into_ranked()
    }

    /// Consuming variant of [`ranked`](Self::ranked).
    pub fn into_ranked(mut self) -> Population {
        self.individuals.sort_by_key(Individual::fitness);
        self
    }

    /// The fittest individual; the earliest one wins ties.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().min_by_key(|individual| individual.fitness())
    }
}

impl PartialEq for Population {
    fn eq(&self, other: &Self) -> bool {
        if !self.shares_metric_with(other) || self.len() != other.len() {
            return false;
        }
        let mut lhs: Vec<&Individual> = self.individuals.iter().collect();
        let mut rhs: Vec<&Individual> = other.individuals.iter().collect();
        lhs.sort();
        rhs.sort();
        lhs == rhs
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for individual in &self.individuals {
            writeln!(f, "{individual}")?;
        }
        Ok(())
    }
}

/// Identity comparison on the data pointer only; vtable pointers of the same
/// type may differ between codegen units.
fn same_metric(a: &Arc<dyn FitnessMetric>, b: &Arc<dyn FitnessMetric>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::ChromosomeLengthMetric;
    use crate::rng::create_rng;
    use proptest::prelude::*;

    fn metric() -> Arc<dyn FitnessMetric> {
        Arc::new(ChromosomeLengthMetric)
    }

    fn chromosomes(strings: &[&str]) -> Vec<Chromosome> {
        strings.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_new_evaluates_every_chromosome() {
        let population = Population::new(metric(), chromosomes(&["fcL", "", "a"]));
        let fitness: Vec<usize> = population.individuals().iter().map(|i| i.fitness()).collect();
        assert_eq!(fitness, vec![3, 0, 1]);
    }

    #[test]
    fn test_empty_population() {
        let population = Population::new(metric(), vec![]);
        assert!(population.is_empty());
        assert!(population.best().is_none());
    }

    #[test]
    fn test_union_keeps_duplicates() {
        let m = metric();
        let a = Population::new(m.clone(), chromosomes(&["fc", "fc"]));
        let b = Population::new(m.clone(), chromosomes(&["fc", "L"]));
        let combined = a.union(b).unwrap();
        assert_eq!(combined.len(), 4);
        assert_eq!(
            combined.chromosomes().filter(|c| c.to_string() == "fc").count(),
            3
        );
    }

    #[test]
    fn test_union_rejects_different_metrics() {
        let a = Population::new(metric(), chromosomes(&["fc"]));
        let b = Population::new(metric(), chromosomes(&["fc"]));
        let err = a.union(b).unwrap_err();
        assert!(matches!(err, PhaserError::InvariantViolation(_)));
    }

    #[test]
    fn test_ranked_is_stable() {
        let population = Population::new(metric(), chromosomes(&["fcL", "a", "u", "", "xx"]));
        let ranked: Vec<String> = population
            .ranked()
            .chromosomes()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(ranked, vec!["", "a", "u", "xx", "fcL"]);
    }

    #[test]
    fn test_best_prefers_earliest_on_ties() {
        let population = Population::new(metric(), chromosomes(&["fcL", "u", "a"]));
        assert_eq!(population.best().unwrap().chromosome().to_string(), "u");
    }

    #[test]
    fn test_equality_ignores_order_but_not_multiplicity() {
        let m = metric();
        let a = Population::new(m.clone(), chromosomes(&["a", "fc", "fc"]));
        let b = Population::new(m.clone(), chromosomes(&["fc", "a", "fc"]));
        let c = Population::new(m.clone(), chromosomes(&["fc", "a", "a"]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_requires_same_metric() {
        let a = Population::new(metric(), chromosomes(&["a"]));
        let b = Population::new(metric(), chromosomes(&["a"]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_make_random() {
        let mut rng = create_rng(42);
        let population = Population::make_random(metric(), 50, 2, 6, &mut rng);
        assert_eq!(population.len(), 50);
        assert!(population.chromosomes().all(|c| (2..=6).contains(&c.len())));
    }

    #[test]
    fn test_display_lists_individuals() {
        let population = Population::new(metric(), chromosomes(&["fc", "a"]));
        assert_eq!(
            population.to_string(),
            "Fitness: 2, optimisations: fc\nFitness: 1, optimisations: a\n"
        );
    }

    proptest! {
        #[test]
        fn prop_random_chromosomes_respect_bounds(
            seed in any::<u32>(),
            min in 0usize..20,
            extra in 0usize..20,
        ) {
            let mut rng = create_rng(seed);
            let population = Population::make_random(metric(), 10, min, min + extra, &mut rng);
            for chromosome in population.chromosomes() {
                prop_assert!(chromosome.len() >= min && chromosome.len() <= min + extra);
            }
        }

        #[test]
        fn prop_union_size_is_sum(
            seed in any::<u32>(),
            a_size in 0usize..15,
            b_size in 0usize..15,
        ) {
            let mut rng = create_rng(seed);
            let m = metric();
            let a = Population::make_random(m.clone(), a_size, 0, 4, &mut rng);
            let b = Population::make_random(m.clone(), b_size, 0, 4, &mut rng);
            let combined = a.clone().union(b.clone()).unwrap();

            prop_assert_eq!(combined.len(), a.len() + b.len());
            let expected = Population::from_individuals(
                m.clone(),
                a.individuals().iter().chain(b.individuals()).cloned().collect(),
            );
            prop_assert_eq!(combined, expected);
        }
    }
}
