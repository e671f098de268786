//! Genetic operators for assignment vectors.
//!
//! # Crossover
//!
//! - [`uniform_crossover`]: each task independently inherits from either
//!   parent with probability 1/2
//!
//! # Mutation
//!
//! - [`compatible_mutation`]: per-task reassignment to a random compatible
//!   worker
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use rand::Rng;

use crate::model::Problem;
use crate::solution::Solution;

/// Uniform crossover producing two complementary children.
///
/// At every position a fair coin decides which parent the first child
/// copies; the second child copies the other parent.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(
    parent1: &Solution,
    parent2: &Solution,
    rng: &mut R,
) -> (Solution, Solution) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();
    for i in 0..parent1.len() {
        if rng.random_bool(0.5) {
            child1[i] = parent2[i];
            child2[i] = parent1[i];
        }
    }
    (child1, child2)
}

/// Reassigns each task with probability `rate` to a uniformly random
/// compatible worker.
///
/// Tasks with no compatible worker keep their assignment. Returns the
/// number of positions changed.
///
/// # Complexity
/// O(n) time
pub fn compatible_mutation<R: Rng>(
    solution: &mut Solution,
    problem: &Problem,
    rate: f64,
    rng: &mut R,
) -> usize {
    let mut changed = 0;
    for task in 0..solution.len() {
        if rng.random::<f64>() >= rate {
            continue;
        }
        let candidates = problem.compatible_workers(task);
        if candidates.is_empty() {
            continue;
        }
        let worker = candidates[rng.random_range(0..candidates.len())];
        if worker != solution[task] {
            solution[task] = worker;
            changed += 1;
        }
    }
    changed
}
