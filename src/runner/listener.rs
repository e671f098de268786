//! Reporting sinks.

use tracing::{debug, info};

use crate::error::ReportError;
use crate::metrics::MetricRecord;

/// Progress message emitted every `report_interval` iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub algorithm: &'static str,
    pub iteration: usize,
    pub best_cost: f64,
    pub feasible: bool,
}

/// Receives reports from a running search.
///
/// All methods are called synchronously at iteration boundaries and get
/// only shared views of the run. A returned error is recorded by the run
/// and does not stop it.
pub trait SolverListener {
    fn on_progress(&mut self, _progress: &Progress) -> Result<(), ReportError> {
        Ok(())
    }

    /// Called once at termination with the formatted final report.
    fn on_finish(&mut self, _report: &str) -> Result<(), ReportError> {
        Ok(())
    }

    /// Called once per iteration.
    fn on_metrics(&mut self, _record: &MetricRecord) -> Result<(), ReportError> {
        Ok(())
    }
}

impl<L: SolverListener + ?Sized> SolverListener for &mut L {
    fn on_progress(&mut self, progress: &Progress) -> Result<(), ReportError> {
        (**self).on_progress(progress)
    }

    fn on_finish(&mut self, report: &str) -> Result<(), ReportError> {
        (**self).on_finish(report)
    }

    fn on_metrics(&mut self, record: &MetricRecord) -> Result<(), ReportError> {
        (**self).on_metrics(record)
    }
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SolverListener for NoopListener {}

/// Forwards progress and final reports to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl SolverListener for TracingListener {
    fn on_progress(&mut self, p: &Progress) -> Result<(), ReportError> {
        info!(
            event = "progress",
            algorithm = p.algorithm,
            iteration = p.iteration,
            best_cost = p.best_cost,
            feasible = p.feasible,
        );
        Ok(())
    }

    fn on_finish(&mut self, report: &str) -> Result<(), ReportError> {
        info!(event = "final_report", "{report}");
        Ok(())
    }

    fn on_metrics(&mut self, r: &MetricRecord) -> Result<(), ReportError> {
        debug!(
            event = "metrics",
            iteration = r.iteration,
            elapsed_ms = r.elapsed_time_ms,
            cost = r.cost,
            violations = r.total_violations,
        );
        Ok(())
    }
}
