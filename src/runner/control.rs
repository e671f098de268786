//! Run-level settings and listener dispatch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::listener::{Progress, SolverListener};
use crate::config::ConfigError;
use crate::error::ReportError;
use crate::metrics::MetricRecord;

/// Settings shared by every strategy's loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Iterations between progress reports. 0 disables progress reports.
    pub report_interval: usize,

    /// Optional wall-clock limit in milliseconds, checked once per
    /// iteration.
    pub time_limit_ms: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            report_interval: 10,
            time_limit_ms: None,
        }
    }
}

impl RunConfig {
    pub fn with_report_interval(mut self, n: usize) -> Self {
        self.report_interval = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

/// Listeners, cancellation and clock of one run.
///
/// The loop calls [`progress`](Self::progress), [`metrics`](Self::metrics)
/// and [`finish`](Self::finish) the same way regardless of how many
/// listeners are attached.
pub struct RunControl<'a> {
    config: RunConfig,
    listeners: Vec<Box<dyn SolverListener + 'a>>,
    cancel: Option<Arc<AtomicBool>>,
    started: Option<Instant>,
    errors: Vec<ReportError>,
}

impl<'a> RunControl<'a> {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            listeners: Vec::new(),
            cancel: None,
            started: None,
            errors: Vec::new(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RunConfig) {
        self.config = config;
    }

    pub fn add_listener(&mut self, listener: impl SolverListener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Installs an external cancellation flag.
    ///
    /// Setting the flag to `true` stops the run before its next iteration.
    pub fn set_cancel_flag(&mut self, flag: Arc<AtomicBool>) {
        self.cancel = Some(flag);
    }

    /// Starts the clock and clears errors from a previous run.
    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
        self.errors.clear();
    }

    pub fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    pub fn time_limit_exceeded(&self) -> bool {
        self.config
            .time_limit_ms
            .is_some_and(|ms| self.elapsed() >= Duration::from_millis(ms))
    }

    /// Whether progress is due after `iteration`.
    pub fn progress_due(&self, iteration: usize) -> bool {
        self.config.report_interval > 0 && iteration % self.config.report_interval == 0
    }

    pub fn progress(&mut self, progress: &Progress) {
        self.dispatch("progress", |l| l.on_progress(progress));
    }

    pub fn metrics(&mut self, record: &MetricRecord) {
        self.dispatch("metrics", |l| l.on_metrics(record));
    }

    pub fn finish(&mut self, report: &str) {
        self.dispatch("finish", |l| l.on_finish(report));
    }

    pub fn errors(&self) -> &[ReportError] {
        &self.errors
    }

    fn dispatch<F>(&mut self, hook: &'static str, mut call: F)
    where
        F: FnMut(&mut dyn SolverListener) -> Result<(), ReportError>,
    {
        for (index, listener) in self.listeners.iter_mut().enumerate() {
            if let Err(err) = call(listener.as_mut()) {
                warn!(event = "listener_failed", hook, listener = index, error = %err);
                self.errors.push(err);
            }
        }
    }
}

impl std::fmt::Debug for RunControl<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunControl")
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .field("cancelled", &self.is_cancelled())
            .field("errors", &self.errors.len())
            .finish()
    }
}
