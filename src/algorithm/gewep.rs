//! Generational Elitist With Exclusive Pools (GEWEP).

use log::debug;
use rand::Rng;

use super::config::GewepOptions;
use super::GeneticAlgorithm;
use crate::chromosome::operators::{
    gene_addition, gene_deletion, gene_randomisation, random_point_crossover,
};
use crate::chromosome::Chromosome;
use crate::error::PhaserError;
use crate::population::{select_parent, select_parent_pair, Individual, PoolSizes, Population};

/// The mutation applied to produce one mutation-pool child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Randomisation,
    Deletion,
    Addition,
}

/// Splits each generation into three exclusive pools.
///
/// Each round the population is ranked and partitioned by [`PoolSizes`]:
///
/// 1. **Elite**: the best individuals, copied unchanged
/// 2. **Mutation**: each child is one elite parent plus one mutation
/// 3. **Crossover**: each child recombines two elite parents
///
/// Parents are drawn uniformly with replacement from the elite pool, mutation
/// children first and crossover children second. The population size never
/// changes between rounds.
#[derive(Debug, Clone)]
pub struct GenerationalElitistWithExclusivePools {
    options: GewepOptions,
}

impl GenerationalElitistWithExclusivePools {
    /// Validates `options` and builds the algorithm.
    pub fn new(options: GewepOptions) -> Result<Self, PhaserError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &GewepOptions {
        &self.options
    }

    /// Chooses the mutation for one child: randomisation with
    /// `randomisation_chance`, otherwise deletion with
    /// `deletion_vs_addition_chance`, otherwise addition.
    pub fn choose_mutation<R: Rng>(&self, rng: &mut R) -> MutationKind {
        if rng.random_bool(self.options.randomisation_chance) {
            MutationKind::Randomisation
        } else if rng.random_bool(self.options.deletion_vs_addition_chance) {
            MutationKind::Deletion
        } else {
            MutationKind::Addition
        }
    }

    /// Produces one mutation child of `parent`.
    pub fn mutate<R: Rng>(&self, parent: &Chromosome, rng: &mut R) -> Chromosome {
        match self.choose_mutation(rng) {
            MutationKind::Randomisation => {
                gene_randomisation(parent, self.options.percent_genes_to_randomise, rng)
            }
            MutationKind::Deletion => {
                gene_deletion(parent, self.options.percent_genes_to_add_or_delete, rng)
            }
            MutationKind::Addition => {
                gene_addition(parent, self.options.percent_genes_to_add_or_delete, rng)
            }
        }
    }
}

impl GeneticAlgorithm for GenerationalElitistWithExclusivePools {
    fn advance<R: Rng>(&self, population: Population, rng: &mut R) -> Result<Population, PhaserError> {
        if population.is_empty() {
            return Err(PhaserError::InvariantViolation(
                "GEWEP received an empty population".into(),
            ));
        }

        let metric = population.fitness_metric().clone();
        let pools = PoolSizes::partition(
            population.len(),
            self.options.mutation_pool_size,
            self.options.crossover_pool_size,
        );
        debug!(
            "GEWEP round: {} elite, {} mutation, {} crossover",
            pools.elite, pools.mutation, pools.crossover
        );

        let ranked = population.into_ranked();
        let elite = &ranked.individuals()[..pools.elite];
        let mut next: Vec<Individual> = Vec::with_capacity(ranked.len());
        next.extend_from_slice(elite);

        for _ in 0..pools.mutation {
            let parent = elite[select_parent(elite.len(), rng)].chromosome();
            let child = self.mutate(parent, rng);
            next.push(Individual::new(child, metric.as_ref()));
        }

        for _ in 0..pools.crossover {
            let (first, second) = select_parent_pair(elite.len(), rng);
            let child = random_point_crossover(
                elite[first].chromosome(),
                elite[second].chromosome(),
                rng,
            );
            next.push(Individual::new(child, metric.as_ref()));
        }

        Ok(Population::from_individuals(metric, next))
    }
}
