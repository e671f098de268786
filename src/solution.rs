//! Solution encoding.
//!
//! A [`Solution`] is a fixed-length vector of worker indices: position `i`
//! holds the worker assigned to task `i`. Every position is always
//! populated. Shared by all three strategies.

use std::ops::{Deref, DerefMut};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::model::Problem;

/// Task-to-worker assignment vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution(Vec<usize>);

impl Solution {
    /// Wraps an existing assignment vector.
    pub fn new(assignment: Vec<usize>) -> Self {
        Self(assignment)
    }

    /// Assigns every task to the same worker.
    pub fn uniform(num_tasks: usize, worker: usize) -> Self {
        Self(vec![worker; num_tasks])
    }

    /// Random assignment drawn from each task's compatible workers.
    ///
    /// Tasks with no compatible worker get a uniformly random worker; the
    /// cost evaluator penalizes them.
    pub fn random_compatible<R: Rng>(problem: &Problem, rng: &mut R) -> Self {
        let n_workers = problem.num_workers();
        let assignment = (0..problem.num_tasks())
            .map(|task| {
                let candidates = problem.compatible_workers(task);
                if candidates.is_empty() {
                    rng.random_range(0..n_workers)
                } else {
                    candidates[rng.random_range(0..candidates.len())]
                }
            })
            .collect();
        Self(assignment)
    }

    /// Worker assigned to `task`.
    pub fn worker_of(&self, task: usize) -> usize {
        self.0[task]
    }

    /// Reassigns `task` to `worker`.
    pub fn assign(&mut self, task: usize, worker: usize) {
        self.0[task] = worker;
    }

    /// Checks the encoding against `problem`.
    ///
    /// # Errors
    ///
    /// [`SolverError::LengthMismatch`] when the length differs from the task
    /// count, [`SolverError::CorruptEncoding`] on the first out-of-range
    /// worker index.
    pub fn validate(&self, problem: &Problem) -> Result<(), SolverError> {
        if self.0.len() != problem.num_tasks() {
            return Err(SolverError::LengthMismatch {
                expected: problem.num_tasks(),
                actual: self.0.len(),
            });
        }
        let workers = problem.num_workers();
        match self.0.iter().position(|&w| w >= workers) {
            Some(task) => Err(SolverError::CorruptEncoding {
                task,
                worker: self.0[task],
                workers,
            }),
            None => Ok(()),
        }
    }

    /// Heap bytes held by this solution.
    pub fn heap_bytes(&self) -> usize {
        self.0.capacity() * std::mem::size_of::<usize>()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Solution {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl DerefMut for Solution {
    fn deref_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }
}

impl From<Vec<usize>> for Solution {
    fn from(assignment: Vec<usize>) -> Self {
        Self(assignment)
    }
}
