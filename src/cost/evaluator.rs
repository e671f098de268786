//! The five-term weighted cost model.

use serde::{Deserialize, Serialize};

use super::breakdown::{CostBreakdown, Evaluation};
use crate::config::ConfigError;
use crate::model::Problem;
use crate::solution::Solution;

/// Factor applied to every hard term before weighting.
pub const HARD_CONSTRAINT_MULTIPLIER: f64 = 100_000.0;

/// Order in which tasks are replayed when accumulating per-worker workload
/// for the deadline term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineOrder {
    /// Shortest estimated duration first (ties by task index).
    #[default]
    ByDuration,
    /// Earliest deadline first (ties by task index).
    ByDeadline,
    /// Task list order.
    ByTaskIndex,
}

/// Per-term weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    pub overload: f64,
    pub skill_mismatch: f64,
    pub skill_level: f64,
    pub unique_assignment: f64,
    pub deadline: f64,
    pub hard_multiplier: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            overload: 0.2,
            skill_mismatch: 0.2,
            skill_level: 0.2,
            unique_assignment: 0.2,
            deadline: 0.2,
            hard_multiplier: HARD_CONSTRAINT_MULTIPLIER,
        }
    }
}

/// Cost function shared by all strategies.
///
/// # Examples
///
/// ```
/// use u_assign::{CostModel, Problem, Solution, Task, Worker};
///
/// let problem = Problem::new(
///     vec![Task::new(0, "T1", 4.0, 1, 100.0, "X"), Task::new(1, "T2", 4.0, 1, 100.0, "X")],
///     vec![Worker::new(0, "W1", 5.0, 5, ["X"])],
/// ).unwrap();
///
/// let eval = CostModel::default().evaluate(&Solution::new(vec![0, 0]), &problem);
/// assert_eq!(eval.breakdown.overload_hours, 3.0);
/// assert!((eval.cost - 60_000.0).abs() < 1e-6);
/// assert!(!eval.is_feasible());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    pub weights: CostWeights,
    pub deadline_order: DeadlineOrder,
}

impl CostModel {
    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_deadline_order(mut self, order: DeadlineOrder) -> Self {
        self.deadline_order = order;
        self
    }

    /// Rejects negative or non-finite weights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (name, value) in [
            ("overload", w.overload),
            ("skill_mismatch", w.skill_mismatch),
            ("skill_level", w.skill_level),
            ("unique_assignment", w.unique_assignment),
            ("deadline", w.deadline),
            ("hard_multiplier", w.hard_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "cost weight {name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Computes the raw terms of `solution`.
    ///
    /// Positions holding a nonexistent worker index are counted as
    /// unique-assignment violations and skipped by every other term.
    pub fn breakdown(&self, solution: &Solution, problem: &Problem) -> CostBreakdown {
        let tasks = problem.tasks();
        let workers = problem.workers();
        let mut out = CostBreakdown::default();
        let mut assigned_hours = vec![0.0_f64; workers.len()];

        for (task, &w) in tasks.iter().zip(solution.iter()) {
            let Some(worker) = workers.get(w) else {
                out.invalid_assignments += 1;
                continue;
            };
            assigned_hours[w] += task.duration;
            if !worker.has_skill(task) {
                out.skill_mismatches += 1;
            }
            if !worker.meets_level(task) {
                out.skill_level_violations += 1;
            }
        }

        for (hours, worker) in assigned_hours.iter().zip(workers) {
            let excess = hours - worker.available_hours;
            if excess > 0.0 {
                out.overload_hours += excess;
                out.overloaded_workers += 1;
            }
        }

        let mut running = vec![0.0_f64; workers.len()];
        for t in self.deadline_sequence(problem) {
            let Some(&w) = solution.get(t).filter(|&&w| w < workers.len()) else {
                continue;
            };
            running[w] += tasks[t].duration;
            let overrun = running[w] - tasks[t].deadline;
            if overrun > 0.0 {
                out.deadline_overrun_hours += overrun;
                out.deadline_violations += 1;
            }
        }

        out
    }

    /// Evaluates `solution`: weighted total, soft share, breakdown.
    ///
    /// Deterministic and side-effect free.
    pub fn evaluate(&self, solution: &Solution, problem: &Problem) -> Evaluation {
        let b = self.breakdown(solution, problem);
        let w = &self.weights;
        let hard = w.hard_multiplier
            * (w.overload * b.overload_hours
                + w.skill_mismatch * b.skill_mismatches as f64
                + w.skill_level * b.skill_level_violations as f64
                + w.unique_assignment * b.invalid_assignments as f64);
        let soft = w.deadline * b.deadline_overrun_hours;
        Evaluation {
            cost: hard + soft,
            soft_cost: soft,
            breakdown: b,
        }
    }

    /// Scalar cost only.
    pub fn cost(&self, solution: &Solution, problem: &Problem) -> f64 {
        self.evaluate(solution, problem).cost
    }

    fn deadline_sequence(&self, problem: &Problem) -> Vec<usize> {
        let tasks = problem.tasks();
        let mut order: Vec<usize> = (0..tasks.len()).collect();
        match self.deadline_order {
            DeadlineOrder::ByDuration => {
                order.sort_by(|&a, &b| tasks[a].duration.total_cmp(&tasks[b].duration))
            }
            DeadlineOrder::ByDeadline => {
                order.sort_by(|&a, &b| tasks[a].deadline.total_cmp(&tasks[b].deadline))
            }
            DeadlineOrder::ByTaskIndex => {}
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{fixtures, Task, Worker};
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_trivial_problem_costs_zero() {
        let problem = fixtures::trivial();
        let eval = CostModel::default().evaluate(&Solution::new(vec![0]), &problem);
        assert_eq!(eval.cost, 0.0);
        assert!(eval.is_feasible());
    }

    #[test]
    fn test_overload_penalty() {
        let problem = Problem::new(
            vec![
                Task::new(0, "a", 4.0, 1, 100.0, "X"),
                Task::new(1, "b", 4.0, 1, 100.0, "X"),
            ],
            vec![Worker::new(0, "w", 5.0, 5, ["X"])],
        )
        .unwrap();
        let eval = CostModel::default().evaluate(&Solution::new(vec![0, 0]), &problem);
        assert!(close(eval.breakdown.overload_hours, 3.0));
        assert_eq!(eval.breakdown.overloaded_workers, 1);
        assert!(close(eval.cost, 60_000.0));
        assert!(!eval.is_feasible());
    }

    #[test]
    fn test_skill_mismatch_penalty() {
        let problem = Problem::new(
            vec![Task::new(0, "a", 1.0, 1, 100.0, "Y")],
            vec![Worker::new(0, "w", 8.0, 5, ["X"])],
        )
        .unwrap();
        let eval = CostModel::default().evaluate(&Solution::new(vec![0]), &problem);
        assert_eq!(eval.breakdown.skill_mismatches, 1);
        assert_eq!(eval.breakdown.skill_level_violations, 0);
        assert!(close(eval.cost, 20_000.0));
    }

    #[test]
    fn test_skill_level_penalty() {
        let problem = Problem::new(
            vec![Task::new(0, "a", 1.0, 4, 100.0, "X")],
            vec![Worker::new(0, "w", 8.0, 2, ["X"])],
        )
        .unwrap();
        let eval = CostModel::default().evaluate(&Solution::new(vec![0]), &problem);
        assert_eq!(eval.breakdown.skill_level_violations, 1);
        assert!(close(eval.cost, 20_000.0));
    }

    #[test]
    fn test_invalid_index_counted_not_indexed() {
        let problem = fixtures::trivial();
        let eval = CostModel::default().evaluate(&Solution::new(vec![7]), &problem);
        assert_eq!(eval.breakdown.invalid_assignments, 1);
        assert_eq!(eval.breakdown.overload_hours, 0.0);
        assert!(close(eval.cost, 20_000.0));
        assert!(!eval.is_feasible());
    }

    #[test]
    fn test_deadline_is_soft() {
        // Both tasks on one worker: durations 2 then 3 (ascending), running
        // totals 2 and 5; the second task's deadline of 4 is overshot by 1.
        let problem = Problem::new(
            vec![
                Task::new(0, "long", 3.0, 1, 4.0, "X"),
                Task::new(1, "short", 2.0, 1, 10.0, "X"),
            ],
            vec![Worker::new(0, "w", 10.0, 5, ["X"])],
        )
        .unwrap();
        let eval = CostModel::default().evaluate(&Solution::new(vec![0, 0]), &problem);
        assert!(close(eval.breakdown.deadline_overrun_hours, 1.0));
        assert_eq!(eval.breakdown.deadline_violations, 1);
        assert!(close(eval.cost, 0.2));
        assert!(close(eval.soft_cost, 0.2));
        assert!(close(eval.hard_cost(), 0.0));
        assert!(eval.is_feasible());
    }

    #[test]
    fn test_deadline_order_policy() {
        // Replaying by task index puts the long task first: totals 3 then 5,
        // no deadline is overshot.
        let problem = Problem::new(
            vec![
                Task::new(0, "long", 3.0, 1, 4.0, "X"),
                Task::new(1, "short", 2.0, 1, 10.0, "X"),
            ],
            vec![Worker::new(0, "w", 10.0, 5, ["X"])],
        )
        .unwrap();
        let solution = Solution::new(vec![0, 0]);
        let by_index = CostModel::default().with_deadline_order(DeadlineOrder::ByTaskIndex);
        let by_deadline = CostModel::default().with_deadline_order(DeadlineOrder::ByDeadline);
        assert_eq!(by_index.cost(&solution, &problem), 0.0);
        assert_eq!(by_deadline.cost(&solution, &problem), 0.0);
    }

    #[test]
    fn test_validate_weights() {
        assert!(CostModel::default().validate().is_ok());
        let bad = CostModel::default().with_weights(CostWeights {
            deadline: -1.0,
            ..CostWeights::default()
        });
        assert!(bad.validate().is_err());
        let nan = CostModel::default().with_weights(CostWeights {
            overload: f64::NAN,
            ..CostWeights::default()
        });
        assert!(nan.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_cost_is_pure(assignment in proptest::collection::vec(0usize..7, 12)) {
            // Indices 5 and 6 do not exist in the fixture.
            let problem = fixtures::team();
            let solution = Solution::new(assignment);
            let model = CostModel::default();
            let a = model.evaluate(&solution, &problem);
            let b = model.evaluate(&solution, &problem);
            prop_assert_eq!(a, b);
            prop_assert!(a.cost.is_finite());
            prop_assert!(a.cost >= 0.0);
        }

        #[test]
        fn prop_feasible_iff_hard_terms_zero(assignment in proptest::collection::vec(0usize..6, 12)) {
            let problem = fixtures::team();
            let eval = CostModel::default().evaluate(&Solution::new(assignment), &problem);
            let b = eval.breakdown;
            let hard_zero = b.overload_hours == 0.0
                && b.skill_mismatches == 0
                && b.skill_level_violations == 0
                && b.invalid_assignments == 0;
            prop_assert_eq!(eval.is_feasible(), hard_zero);
            prop_assert_eq!(eval.is_feasible(), eval.hard_cost().abs() < 1e-9);
        }
    }
}
