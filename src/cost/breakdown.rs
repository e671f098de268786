//! Per-term cost results.

use serde::Serialize;

/// Raw (unweighted) penalty terms and violation counts of one solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Sum over workers of hours assigned beyond capacity.
    pub overload_hours: f64,
    /// Number of workers whose assigned hours exceed capacity.
    pub overloaded_workers: usize,
    /// Assignments where the worker lacks the required skill tag.
    pub skill_mismatches: usize,
    /// Assignments where the worker's level is below the task difficulty.
    pub skill_level_violations: usize,
    /// Positions whose worker index does not exist.
    pub invalid_assignments: usize,
    /// Sum of hours by which running workloads overshoot task deadlines.
    pub deadline_overrun_hours: f64,
    /// Number of tasks whose deadline is overshot.
    pub deadline_violations: usize,
}

impl CostBreakdown {
    /// Whether every hard term is zero.
    ///
    /// Deadline overruns alone never make a solution infeasible.
    pub fn is_feasible(&self) -> bool {
        self.overload_hours == 0.0
            && self.skill_mismatches == 0
            && self.skill_level_violations == 0
            && self.invalid_assignments == 0
    }

    /// Total number of violated constraints across all categories.
    pub fn total_violations(&self) -> usize {
        self.overloaded_workers
            + self.skill_mismatches
            + self.skill_level_violations
            + self.invalid_assignments
            + self.deadline_violations
    }
}

/// Scalar cost of a solution together with its breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    /// Weighted total cost. Lower is better; 0 is optimal.
    pub cost: f64,
    /// Weighted contribution of the soft deadline term.
    pub soft_cost: f64,
    pub breakdown: CostBreakdown,
}

impl Evaluation {
    /// Weighted contribution of the hard terms (`cost - soft_cost`).
    pub fn hard_cost(&self) -> f64 {
        self.cost - self.soft_cost
    }

    pub fn is_feasible(&self) -> bool {
        self.breakdown.is_feasible()
    }
}
