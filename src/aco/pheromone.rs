//! Pheromone matrix.

use rand::Rng;

use crate::model::Problem;
use crate::solution::Solution;

/// Pheromone deposited on each edge of a path with the given cost.
///
/// `1 / (5·cost + 1)`: in `(0, 1]` for every finite non-negative cost and
/// exactly `1` for a zero-cost path.
pub fn deposit_amount(cost: f64) -> f64 {
    1.0 / (5.0 * cost.max(0.0) + 1.0)
}

/// Row-major tasks × workers matrix of non-negative desirabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    workers: usize,
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Seeds compatible edges with `initial` and incompatible ones with 0.
    ///
    /// A task with no compatible worker gets `initial` on its whole row so
    /// it stays assignable.
    pub fn for_problem(problem: &Problem, initial: f64) -> Self {
        let workers = problem.num_workers();
        let mut values = vec![0.0; problem.num_tasks() * workers];
        for (task, row) in values.chunks_mut(workers).enumerate() {
            let compatible = problem.compatible_workers(task);
            if compatible.is_empty() {
                row.fill(initial);
            } else {
                for &w in compatible {
                    row[w] = initial;
                }
            }
        }
        Self { workers, values }
    }

    pub fn num_tasks(&self) -> usize {
        self.values.len() / self.workers
    }

    pub fn num_workers(&self) -> usize {
        self.workers
    }

    /// # Panics
    /// Panics if `task` or `worker` is out of range.
    pub fn get(&self, task: usize, worker: usize) -> f64 {
        self.row(task)[worker]
    }

    /// # Panics
    /// Panics if `task` is out of range.
    pub fn row(&self, task: usize) -> &[f64] {
        let start = task * self.workers;
        &self.values[start..start + self.workers]
    }

    /// Multiplies every entry by `1 - rate`.
    pub fn decay(&mut self, rate: f64) {
        let keep = (1.0 - rate).clamp(0.0, 1.0);
        for v in &mut self.values {
            *v *= keep;
        }
    }

    /// Adds `amount` to every (task, worker) edge of `path`.
    pub fn reinforce(&mut self, path: &Solution, amount: f64) {
        for (task, &worker) in path.iter().enumerate() {
            self.values[task * self.workers + worker] += amount;
        }
    }

    /// Roulette-wheel choice of a worker for `task`.
    ///
    /// Draws uniformly in `[0, row_total)` and returns the first worker whose
    /// cumulative pheromone exceeds the draw. A row with no positive mass
    /// (e.g. after full evaporation) falls back to a uniform draw.
    pub fn select_worker<R: Rng>(&self, task: usize, rng: &mut R) -> usize {
        let row = self.row(task);
        let total: f64 = row.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return rng.random_range(0..self.workers);
        }

        let threshold = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for (worker, &v) in row.iter().enumerate() {
            cumulative += v;
            if cumulative > threshold {
                return worker;
            }
        }

        // floating-point fallback: last worker with any pheromone
        row.iter().rposition(|&v| v > 0.0).unwrap_or(self.workers - 1)
    }

    /// Smallest entry.
    pub fn min_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn heap_bytes(&self) -> usize {
        self.values.capacity() * std::mem::size_of::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::random::create_rng;

    #[test]
    fn test_initialization_matches_compatibility() {
        let problem = fixtures::team();
        let m = PheromoneMatrix::for_problem(&problem, 2.0);
        assert_eq!(m.num_tasks(), problem.num_tasks());
        assert_eq!(m.num_workers(), problem.num_workers());
        for t in 0..problem.num_tasks() {
            for w in 0..problem.num_workers() {
                let expected = if problem.is_compatible(t, w) { 2.0 } else { 0.0 };
                assert_eq!(m.get(t, w), expected);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_get_rejects_worker_past_row_end() {
        let m = PheromoneMatrix::for_problem(&fixtures::team(), 1.0);
        m.get(0, m.num_workers());
    }

    #[test]
    #[should_panic]
    fn test_row_rejects_task_out_of_range() {
        let m = PheromoneMatrix::for_problem(&fixtures::team(), 1.0);
        m.row(m.num_tasks());
    }

    #[test]
    fn test_unsatisfiable_row_fallback() {
        let problem = fixtures::unsatisfiable();
        let m = PheromoneMatrix::for_problem(&problem, 1.0);
        assert_eq!(m.row(0), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_selection_never_picks_zero_entries() {
        let problem = fixtures::team();
        let m = PheromoneMatrix::for_problem(&problem, 1.0);
        let mut rng = create_rng(42);
        for _ in 0..200 {
            for t in 0..problem.num_tasks() {
                let w = m.select_worker(t, &mut rng);
                assert!(problem.is_compatible(t, w));
            }
        }
    }

    #[test]
    fn test_selection_follows_pheromone() {
        let problem = fixtures::unsatisfiable();
        let mut m = PheromoneMatrix::for_problem(&problem, 1.0);
        m.reinforce(&Solution::new(vec![2]), 18.0);
        let mut rng = create_rng(5);
        let hits = (0..1000).filter(|_| m.select_worker(0, &mut rng) == 2).count();
        // worker 2 holds 19 of 21 units
        assert!(hits > 850, "got {hits}");
    }

    #[test]
    fn test_decay_and_full_evaporation() {
        let problem = fixtures::unsatisfiable();
        let mut m = PheromoneMatrix::for_problem(&problem, 1.0);
        m.decay(0.25);
        assert!((m.get(0, 0) - 0.75).abs() < 1e-12);
        m.decay(1.0);
        assert_eq!(m.min_value(), 0.0);
        let mut rng = create_rng(1);
        assert!(m.select_worker(0, &mut rng) < 3);
    }

    #[test]
    fn test_deposit_amount() {
        assert_eq!(deposit_amount(0.0), 1.0);
        assert!((deposit_amount(1.0) - 1.0 / 6.0).abs() < 1e-12);
        let huge = deposit_amount(1e12);
        assert!(huge > 0.0 && huge.is_finite());
    }
}
