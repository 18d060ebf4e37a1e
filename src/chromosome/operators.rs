//! Mutation and crossover operators on step sequences.
//!
//! Every operator takes its parents by reference and returns a fresh
//! [`Chromosome`]. Randomness comes only from the supplied `rng`, so the
//! result is fully determined by the parents and the draw sequence.
//!
//! # Mutation Operators
//!
//! - [`gene_randomisation`]: replace each step with probability `p`
//! - [`gene_deletion`]: drop each step with probability `p`
//! - [`gene_addition`]: insert a random step at each insertion point with probability `p`
//!
//! # Crossover Operators
//!
//! - [`random_point_crossover`]: single split point, head from the first parent
//! - [`fixed_point_crossover`]: the same with a caller-chosen point

use rand::Rng;

use super::step::OptimisationStep;
use super::types::Chromosome;

// ============================================================================
// Mutation operators
// ============================================================================

/// Replaces each step independently with probability `chance`.
///
/// Draw order per gene: one Bernoulli draw, then (on success) one catalog draw.
///
/// # Panics
/// Panics if `chance` is outside `[0, 1]`.
pub fn gene_randomisation<R: Rng>(chromosome: &Chromosome, chance: f64, rng: &mut R) -> Chromosome {
    (0..chromosome.len()).fold(chromosome.clone(), |mutated, index| {
        if rng.random_bool(chance) {
            mutated.with_step_replaced(index, OptimisationStep::random(rng))
        } else {
            mutated
        }
    })
}

/// Removes each step independently with probability `chance`.
///
/// An empty chromosome stays empty.
///
/// # Panics
/// Panics if `chance` is outside `[0, 1]`.
pub fn gene_deletion<R: Rng>(chromosome: &Chromosome, chance: f64, rng: &mut R) -> Chromosome {
    let mut mutated = chromosome.clone();
    let mut removed = 0;
    for index in 0..chromosome.len() {
        if rng.random_bool(chance) {
            mutated = mutated.with_step_removed(index - removed);
            removed += 1;
        }
    }
    mutated
}

/// Inserts a random step at each of the `len + 1` insertion points with
/// probability `chance`.
///
/// The insertion point before the first step is visited first, the one
/// after the last step last.
///
/// # Panics
/// Panics if `chance` is outside `[0, 1]`.
pub fn gene_addition<R: Rng>(chromosome: &Chromosome, chance: f64, rng: &mut R) -> Chromosome {
    let mut mutated = chromosome.clone();
    let mut added = 0;
    for index in 0..=chromosome.len() {
        if rng.random_bool(chance) {
            mutated = mutated.with_step_inserted(index + added, OptimisationStep::random(rng));
            added += 1;
        }
    }
    mutated
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover with a random split point.
///
/// With `m = min(len(parent1), len(parent2))`, the point is uniform in
/// `[1, m]` (or `0` when `m == 0`). Point `0` would just return the
/// second parent, so it is only used when nothing else is possible.
pub fn random_point_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> Chromosome {
    let min_length = parent1.len().min(parent2.len());
    let min_point = if min_length > 0 { 1 } else { 0 };
    let point = rng.random_range(min_point..=min_length);
    fixed_point_crossover(parent1, parent2, point)
}

/// Head of `parent1` up to `point` followed by the tail of `parent2` from `point`.
///
/// A point past the end of either parent is clamped to its length.
pub fn fixed_point_crossover(parent1: &Chromosome, parent2: &Chromosome, point: usize) -> Chromosome {
    let head = &parent1.steps()[..point.min(parent1.len())];
    let tail = &parent2.steps()[point.min(parent2.len())..];
    Chromosome::new(head.iter().chain(tail).copied().collect())
}

// ============================================================================
// Tests
// ============================================================================
