//! The shared search loop.

use std::time::Duration;

use tracing::{debug, info};

use super::control::{RunConfig, RunControl};
use super::history::{PopulationStats, SearchHistory};
use super::listener::{Progress, SolverListener};
use crate::cost::{CostModel, Evaluation};
use crate::error::{ReportError, SolverError};
use crate::metrics::MetricRecord;
use crate::model::Problem;
use crate::report;
use crate::solution::Solution;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The best cost reached exactly zero.
    ZeroCost,
    /// The configured iteration cap was reached.
    MaxIterations,
    /// The external cancellation flag was set.
    Cancelled,
    /// The wall-clock limit elapsed.
    TimeLimit,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Termination::ZeroCost => "zero cost",
            Termination::MaxIterations => "iteration limit",
            Termination::Cancelled => "cancelled",
            Termination::TimeLimit => "time limit",
        };
        f.write_str(s)
    }
}

/// Summary returned by [`Solver::run`](super::Solver::run).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    /// Iterations executed (initialization not counted).
    pub iterations: usize,
    pub termination: Termination,
    pub elapsed: Duration,
}

/// A solution together with its evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub solution: Solution,
    pub evaluation: Evaluation,
}

/// What one engine iteration produced.
#[derive(Debug, Clone)]
pub(crate) struct IterationReport {
    pub stats: PopulationStats,
    /// Lowest-cost solution seen during the iteration.
    pub best: Option<Candidate>,
}

/// Strategy-specific part of a search: initialization and one iteration.
pub(crate) trait SearchEngine {
    fn problem(&self) -> &Problem;

    /// Builds the initial state. Returns the best initial solution, if the
    /// strategy evaluates any before its first iteration.
    fn initialize(&mut self) -> Result<Option<Candidate>, SolverError>;

    /// Executes one iteration.
    fn step(&mut self) -> Result<IterationReport, SolverError>;

    /// Iteration cap.
    fn max_iterations(&self) -> usize;

    /// Approximate bytes held by the engine's search state.
    fn state_bytes(&self) -> usize;
}

/// Evaluates `solution`, aborting on an out-of-range worker index.
pub(crate) fn evaluate_checked(
    model: &CostModel,
    solution: &Solution,
    problem: &Problem,
) -> Result<Evaluation, SolverError> {
    let evaluation = model.evaluate(solution, problem);
    if evaluation.breakdown.invalid_assignments > 0 {
        solution.validate(problem)?;
    }
    Ok(evaluation)
}

/// Best-so-far tracking, history and reporting shared by all strategies.
#[derive(Debug)]
pub struct SearchCore<'a> {
    algorithm: &'static str,
    control: RunControl<'a>,
    history: SearchHistory,
    best: Option<Candidate>,
    iteration: usize,
}

impl<'a> SearchCore<'a> {
    pub(crate) fn new(algorithm: &'static str) -> Self {
        Self {
            algorithm,
            control: RunControl::new(RunConfig::default()),
            history: SearchHistory::default(),
            best: None,
            iteration: 0,
        }
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn control(&self) -> &RunControl<'a> {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut RunControl<'a> {
        &mut self.control
    }

    pub fn add_listener(&mut self, listener: impl SolverListener + 'a) {
        self.control.add_listener(listener);
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn best_solution(&self) -> Option<&Solution> {
        self.best.as_ref().map(|c| &c.solution)
    }

    pub fn best_evaluation(&self) -> Option<&Evaluation> {
        self.best.as_ref().map(|c| &c.evaluation)
    }

    pub fn best_cost(&self) -> f64 {
        self.best_evaluation().map_or(f64::INFINITY, |e| e.cost)
    }

    pub fn report_errors(&self) -> &[ReportError] {
        self.control.errors()
    }

    /// Replaces the best-so-far when `candidate` is strictly better.
    fn offer(&mut self, candidate: Candidate) -> bool {
        if candidate.evaluation.cost < self.best_cost() {
            debug!(
                event = "new_best",
                algorithm = self.algorithm,
                iteration = self.iteration,
                cost = candidate.evaluation.cost,
                feasible = candidate.evaluation.is_feasible(),
            );
            self.best = Some(candidate);
            true
        } else {
            false
        }
    }

    fn stop_reason(&self, max_iterations: usize) -> Option<Termination> {
        if self.best_cost() == 0.0 {
            Some(Termination::ZeroCost)
        } else if self.iteration >= max_iterations {
            Some(Termination::MaxIterations)
        } else if self.control.is_cancelled() {
            Some(Termination::Cancelled)
        } else if self.control.time_limit_exceeded() {
            Some(Termination::TimeLimit)
        } else {
            None
        }
    }

    /// Runs `engine` to termination.
    pub(crate) fn drive<E: SearchEngine>(&mut self, engine: &mut E) -> Result<RunOutcome, SolverError> {
        self.control.begin();
        self.history.clear();
        self.best = None;
        self.iteration = 0;

        let problem = engine.problem();
        info!(
            event = "solve_start",
            algorithm = self.algorithm,
            tasks = problem.num_tasks(),
            workers = problem.num_workers(),
            max_iterations = engine.max_iterations(),
        );

        if let Some(initial) = engine.initialize()? {
            self.offer(initial);
        }

        let termination = loop {
            if let Some(reason) = self.stop_reason(engine.max_iterations()) {
                break reason;
            }

            let report = engine.step()?;
            self.iteration += 1;
            if let Some(candidate) = report.best {
                self.offer(candidate);
            }
            self.history.record(self.best_cost(), &report.stats);
            self.emit_iteration(engine.state_bytes());
        };

        let outcome = RunOutcome {
            iterations: self.iteration,
            termination,
            elapsed: self.control.elapsed(),
        };

        let text = report::final_report(
            self.algorithm,
            &outcome,
            self.best.as_ref().map(|c| (&c.solution, &c.evaluation)),
            engine.problem(),
        );
        self.control.finish(&text);

        info!(
            event = "solve_end",
            algorithm = self.algorithm,
            iterations = outcome.iterations,
            best_cost = self.best_cost(),
            feasible = self.best_evaluation().is_some_and(|e| e.is_feasible()),
            duration_ms = outcome.elapsed.as_millis() as u64,
            termination = %termination,
        );

        Ok(outcome)
    }

    fn emit_iteration(&mut self, state_bytes: usize) {
        let Some(best) = self.best.as_ref().map(|c| c.evaluation) else {
            return;
        };
        let record = MetricRecord::from_evaluation(
            self.iteration,
            self.control.elapsed(),
            state_bytes,
            &best,
        );
        self.control.metrics(&record);

        if self.control.progress_due(self.iteration) {
            let progress = Progress {
                algorithm: self.algorithm,
                iteration: self.iteration,
                best_cost: best.cost,
                feasible: best.is_feasible(),
            };
            self.control.progress(&progress);
        }
    }
}
