//! Shared runner contract.
//!
//! Every strategy implements [`Solver`]: run to termination, then expose
//! the best solution, its cost and three per-iteration time series. The
//! loop itself lives once, in [`SearchCore`], which drives a strategy's
//! [`SearchEngine`] and owns termination, history and reporting.
//!
//! # Termination
//!
//! Checked before every iteration, in this order:
//!
//! 1. best-so-far cost is exactly zero
//! 2. iteration cap reached
//! 3. external cancellation flag set
//! 4. wall-clock limit exceeded
//!
//! # Reporting
//!
//! Listeners ([`SolverListener`]) receive progress every
//! `report_interval` iterations, a metric record every iteration and the
//! final report once. A failing listener is recorded and skipped; the
//! search state is never touched.

mod control;
mod driver;
mod history;
mod listener;

pub use driver::{Candidate, RunOutcome, SearchCore, Termination};
pub use control::{RunConfig, RunControl};
pub use history::{PopulationStats, SearchHistory};
pub use listener::{NoopListener, Progress, SolverListener, TracingListener};

pub(crate) use driver::{evaluate_checked, IterationReport, SearchEngine};

use crate::cost::Evaluation;
use crate::error::{ReportError, SolverError};
use crate::solution::Solution;

/// Common interface of the search strategies.
///
/// # Examples
///
/// ```
/// use u_assign::{GaConfig, GeneticSearch, Problem, Solver, Task, Worker};
/// use u_assign::random::create_rng;
///
/// let problem = Problem::new(
///     vec![Task::new(0, "T1", 3.0, 1, 10.0, "X")],
///     vec![Worker::new(0, "W1", 6.0, 5, ["X"])],
/// ).unwrap();
///
/// let mut solver = GeneticSearch::new(&problem, GaConfig::default(), create_rng(42)).unwrap();
/// solver.run().unwrap();
/// assert_eq!(solver.best_cost(), 0.0);
/// assert_eq!(solver.best_solution().map(|s| s.to_vec()), Some(vec![0]));
/// ```
pub trait Solver {
    /// Short algorithm name used in reports and metrics.
    fn name(&self) -> &'static str;

    /// Runs the search until a termination condition holds.
    ///
    /// # Errors
    ///
    /// [`SolverError::CorruptEncoding`] if an out-of-range worker index is
    /// produced during the run. Listener failures are not errors here; see
    /// [`report_errors`](Self::report_errors).
    fn run(&mut self) -> Result<RunOutcome, SolverError>;

    /// Best solution found so far, `None` before the first evaluation.
    fn best_solution(&self) -> Option<&Solution>;

    /// Evaluation of [`best_solution`](Self::best_solution).
    fn best_evaluation(&self) -> Option<&Evaluation>;

    /// Cost of the best solution; `f64::INFINITY` before the first evaluation.
    fn best_cost(&self) -> f64 {
        self.best_evaluation().map_or(f64::INFINITY, |e| e.cost)
    }

    /// Per-iteration best cost, average cost and feasible count.
    fn history(&self) -> &SearchHistory;

    /// Iterations executed by the last run (initialization not counted).
    fn iterations(&self) -> usize;

    /// Non-fatal listener failures collected during the last run.
    fn report_errors(&self) -> &[ReportError];
}
