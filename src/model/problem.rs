//! The immutable problem instance.

use crate::error::SolverError;

use super::{Task, Worker};

/// Validated task and worker lists for one run.
///
/// Construction checks that both lists are non-empty and that every
/// record's `index` equals its position. For each task the ascending list
/// of compatible workers (skill tag present and skill level sufficient) is
/// computed once and shared by all strategies.
///
/// # Examples
///
/// ```
/// use u_assign::{Problem, Task, Worker};
///
/// let tasks = vec![Task::new(0, "T1", 3.0, 1, 8.0, "X")];
/// let workers = vec![Worker::new(0, "W1", 6.0, 5, ["X"])];
/// let problem = Problem::new(tasks, workers).unwrap();
/// assert_eq!(problem.compatible_workers(0), &[0]);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    tasks: Vec<Task>,
    workers: Vec<Worker>,
    compatible: Vec<Vec<usize>>,
}

impl Problem {
    /// Builds a problem from index-stable task and worker lists.
    ///
    /// # Errors
    ///
    /// [`SolverError::EmptyTasks`] / [`SolverError::EmptyWorkers`] for empty
    /// lists, [`SolverError::IndexMismatch`] when a record's index differs
    /// from its position.
    pub fn new(tasks: Vec<Task>, workers: Vec<Worker>) -> Result<Self, SolverError> {
        if tasks.is_empty() {
            return Err(SolverError::EmptyTasks);
        }
        if workers.is_empty() {
            return Err(SolverError::EmptyWorkers);
        }
        if let Some((position, task)) = tasks.iter().enumerate().find(|(i, t)| t.index != *i) {
            return Err(SolverError::IndexMismatch {
                kind: "task",
                position,
                index: task.index,
            });
        }
        if let Some((position, worker)) =
            workers.iter().enumerate().find(|(i, w)| w.index != *i)
        {
            return Err(SolverError::IndexMismatch {
                kind: "worker",
                position,
                index: worker.index,
            });
        }

        let compatible = tasks
            .iter()
            .map(|task| {
                workers
                    .iter()
                    .filter(|w| w.can_perform(task))
                    .map(|w| w.index)
                    .collect()
            })
            .collect();

        Ok(Self {
            tasks,
            workers,
            compatible,
        })
    }

    /// Builds a problem, assigning indices from list positions.
    ///
    /// Convenience for data providers that do not track indices themselves.
    pub fn reindexed(mut tasks: Vec<Task>, mut workers: Vec<Worker>) -> Result<Self, SolverError> {
        for (i, task) in tasks.iter_mut().enumerate() {
            task.index = i;
        }
        for (i, worker) in workers.iter_mut().enumerate() {
            worker.index = i;
        }
        Self::new(tasks, workers)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn num_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Ascending indices of the workers able to perform `task`.
    ///
    /// Empty when the task is unsatisfiable.
    ///
    /// # Panics
    /// Panics if `task` is out of range.
    pub fn compatible_workers(&self, task: usize) -> &[usize] {
        &self.compatible[task]
    }

    /// Whether `worker` satisfies both skill constraints of `task`.
    pub fn is_compatible(&self, task: usize, worker: usize) -> bool {
        self.compatible[task].binary_search(&worker).is_ok()
    }

    /// Indices of tasks with no compatible worker at all.
    pub fn unsatisfiable_tasks(&self) -> Vec<usize> {
        self.compatible
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }
}
