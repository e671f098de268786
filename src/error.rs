//! Error types.
//!
//! [`SolverError`] covers everything that prevents a search from starting
//! or forces it to abort. [`ReportError`] is the non-fatal failure of a
//! reporting sink; it never stops a run.

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal errors raised by problem construction and the search strategies.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("problem has no tasks")]
    EmptyTasks,

    #[error("problem has no workers")]
    EmptyWorkers,

    #[error("{kind} at position {position} carries index {index}")]
    IndexMismatch {
        kind: &'static str,
        position: usize,
        index: usize,
    },

    #[error("task {task} is assigned to worker index {worker}, but only {workers} workers exist")]
    CorruptEncoding {
        task: usize,
        worker: usize,
        workers: usize,
    },

    #[error("solution has {actual} positions, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Failure of a reporting sink.
///
/// Collected by the run and surfaced through
/// [`Solver::report_errors`](crate::runner::Solver::report_errors).
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink rejected record: {0}")]
    Rejected(String),
}
