//! Per-iteration metrics and their persisted row schema.
//!
//! [`MetricsRecorder`] is a [`SolverListener`] that keeps every
//! [`MetricRecord`] of a run and derives three comma-separated tables from
//! them:
//!
//! | Table | Columns |
//! |---|---|
//! | solution quality | `Algorithm,Iteration,CostValue` |
//! | constraint satisfaction | `Algorithm,Iteration,TotalConstraintViolations` |
//! | efficiency summary | `Algorithm,TotalTimeMs,AvgIterationTimeMs,TotalMemoryMb,AvgMemoryPerIterationMb` |
//!
//! Each table has a writer and a parser so persisted files read back to
//! identical rows. Algorithm names containing a comma, a quote or a line
//! break are written as double-quoted fields with inner quotes doubled.

use std::borrow::Cow;
use std::io;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cost::Evaluation;
use crate::error::ReportError;
use crate::runner::SolverListener;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub const SOLUTION_QUALITY_HEADER: &str = "Algorithm,Iteration,CostValue";
pub const CONSTRAINT_SATISFACTION_HEADER: &str = "Algorithm,Iteration,TotalConstraintViolations";
pub const EFFICIENCY_SUMMARY_HEADER: &str =
    "Algorithm,TotalTimeMs,AvgIterationTimeMs,TotalMemoryMb,AvgMemoryPerIterationMb";

/// Error reading a persisted metrics table.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected header {found:?}, expected {expected:?}")]
    Header {
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Metrics of the best-so-far solution after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub iteration: usize,
    pub elapsed_time_ms: f64,
    pub cost: f64,
    /// Estimated size of the strategy's search state.
    pub memory_usage_mb: f64,
    pub total_violations: usize,
    pub skill_mismatch_count: usize,
    pub overload_count: usize,
    pub skill_level_violation_count: usize,
    pub deadline_violation_count: usize,
}

impl MetricRecord {
    pub fn from_evaluation(
        iteration: usize,
        elapsed: Duration,
        state_bytes: usize,
        evaluation: &Evaluation,
    ) -> Self {
        let b = &evaluation.breakdown;
        Self {
            iteration,
            elapsed_time_ms: elapsed.as_secs_f64() * 1000.0,
            cost: evaluation.cost,
            memory_usage_mb: state_bytes as f64 / BYTES_PER_MB,
            total_violations: b.total_violations(),
            skill_mismatch_count: b.skill_mismatches,
            overload_count: b.overloaded_workers,
            skill_level_violation_count: b.skill_level_violations,
            deadline_violation_count: b.deadline_violations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionQualityRow {
    pub algorithm: String,
    pub iteration: usize,
    pub cost_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSatisfactionRow {
    pub algorithm: String,
    pub iteration: usize,
    pub total_constraint_violations: usize,
}

/// One row per run.
///
/// `total_memory_mb` sums the per-iteration memory estimates;
/// the averages divide by the iteration count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySummary {
    pub algorithm: String,
    pub total_time_ms: f64,
    pub avg_iteration_time_ms: f64,
    pub total_memory_mb: f64,
    pub avg_memory_per_iteration_mb: f64,
}

/// Listener that collects the metric records of a run.
///
/// # Examples
///
/// ```
/// use u_assign::metrics::MetricsRecorder;
/// use u_assign::{AcoConfig, AntColonySearch, Problem, Solver, Task, Worker};
/// use u_assign::random::create_rng;
///
/// let problem = Problem::new(
///     vec![Task::new(0, "T1", 3.0, 1, 10.0, "X")],
///     vec![Worker::new(0, "W1", 6.0, 5, ["X"])],
/// ).unwrap();
///
/// let mut recorder = MetricsRecorder::new("ACO");
/// let mut solver = AntColonySearch::new(&problem, AcoConfig::default(), create_rng(1))
///     .unwrap()
///     .with_listener(&mut recorder);
/// solver.run().unwrap();
/// drop(solver);
///
/// assert_eq!(recorder.records().len(), 1);
/// assert_eq!(recorder.solution_quality_rows()[0].cost_value, 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder {
    algorithm: String,
    records: Vec<MetricRecord>,
}

impl MetricsRecorder {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            records: Vec::new(),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub fn solution_quality_rows(&self) -> Vec<SolutionQualityRow> {
        self.records
            .iter()
            .map(|r| SolutionQualityRow {
                algorithm: self.algorithm.clone(),
                iteration: r.iteration,
                cost_value: r.cost,
            })
            .collect()
    }

    pub fn constraint_rows(&self) -> Vec<ConstraintSatisfactionRow> {
        self.records
            .iter()
            .map(|r| ConstraintSatisfactionRow {
                algorithm: self.algorithm.clone(),
                iteration: r.iteration,
                total_constraint_violations: r.total_violations,
            })
            .collect()
    }

    pub fn efficiency_summary(&self) -> EfficiencySummary {
        let iterations = self.records.len();
        let total_time_ms = self.records.last().map_or(0.0, |r| r.elapsed_time_ms);
        let total_memory_mb: f64 = self.records.iter().map(|r| r.memory_usage_mb).sum();
        let per = |total: f64| {
            if iterations == 0 {
                0.0
            } else {
                total / iterations as f64
            }
        };
        EfficiencySummary {
            algorithm: self.algorithm.clone(),
            total_time_ms,
            avg_iteration_time_ms: per(total_time_ms),
            total_memory_mb,
            avg_memory_per_iteration_mb: per(total_memory_mb),
        }
    }
}

impl SolverListener for MetricsRecorder {
    fn on_metrics(&mut self, record: &MetricRecord) -> Result<(), ReportError> {
        self.records.push(*record);
        Ok(())
    }
}

pub fn write_solution_quality<W: io::Write>(
    mut out: W,
    rows: &[SolutionQualityRow],
) -> io::Result<()> {
    writeln!(out, "{SOLUTION_QUALITY_HEADER}")?;
    for r in rows {
        writeln!(out, "{},{},{}", quote(&r.algorithm), r.iteration, r.cost_value)?;
    }
    Ok(())
}

pub fn write_constraint_satisfaction<W: io::Write>(
    mut out: W,
    rows: &[ConstraintSatisfactionRow],
) -> io::Result<()> {
    writeln!(out, "{CONSTRAINT_SATISFACTION_HEADER}")?;
    for r in rows {
        writeln!(
            out,
            "{},{},{}",
            quote(&r.algorithm),
            r.iteration,
            r.total_constraint_violations
        )?;
    }
    Ok(())
}

pub fn write_efficiency_summary<W: io::Write>(
    mut out: W,
    rows: &[EfficiencySummary],
) -> io::Result<()> {
    writeln!(out, "{EFFICIENCY_SUMMARY_HEADER}")?;
    for r in rows {
        writeln!(
            out,
            "{},{},{},{},{}",
            quote(&r.algorithm),
            r.total_time_ms,
            r.avg_iteration_time_ms,
            r.total_memory_mb,
            r.avg_memory_per_iteration_mb
        )?;
    }
    Ok(())
}

pub fn parse_solution_quality(input: &str) -> Result<Vec<SolutionQualityRow>, MetricsError> {
    parse_table(input, SOLUTION_QUALITY_HEADER, |line, f| {
        Ok(SolutionQualityRow {
            algorithm: f[0].clone(),
            iteration: field(line, &f[1])?,
            cost_value: field(line, &f[2])?,
        })
    })
}

pub fn parse_constraint_satisfaction(
    input: &str,
) -> Result<Vec<ConstraintSatisfactionRow>, MetricsError> {
    parse_table(input, CONSTRAINT_SATISFACTION_HEADER, |line, f| {
        Ok(ConstraintSatisfactionRow {
            algorithm: f[0].clone(),
            iteration: field(line, &f[1])?,
            total_constraint_violations: field(line, &f[2])?,
        })
    })
}

pub fn parse_efficiency_summary(input: &str) -> Result<Vec<EfficiencySummary>, MetricsError> {
    parse_table(input, EFFICIENCY_SUMMARY_HEADER, |line, f| {
        Ok(EfficiencySummary {
            algorithm: f[0].clone(),
            total_time_ms: field(line, &f[1])?,
            avg_iteration_time_ms: field(line, &f[2])?,
            total_memory_mb: field(line, &f[3])?,
            avg_memory_per_iteration_mb: field(line, &f[4])?,
        })
    })
}

fn parse_table<T, F>(input: &str, header: &'static str, mut row: F) -> Result<Vec<T>, MetricsError>
where
    F: FnMut(usize, &[String]) -> Result<T, MetricsError>,
{
    let columns = header.split(',').count();
    let mut records = split_records(input)?.into_iter();

    match records.next() {
        Some((_, first)) if first.join(",") == header => {}
        Some((_, first)) => {
            return Err(MetricsError::Header {
                expected: header,
                found: first.join(","),
            })
        }
        None => {
            return Err(MetricsError::Header {
                expected: header,
                found: String::new(),
            })
        }
    }

    records
        .map(|(line, fields)| {
            if fields.len() != columns {
                return Err(MetricsError::Parse {
                    line,
                    message: format!("expected {columns} fields, found {}", fields.len()),
                });
            }
            row(line, &fields)
        })
        .collect()
}

/// Wraps `raw` in double quotes when it would otherwise split a record or
/// lose surrounding whitespace.
fn quote(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) || raw.trim() != raw {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Splits `input` into records of fields, tagged with the 1-based line each
/// record starts on. Blank lines are skipped. Unquoted fields are trimmed;
/// quoted fields are kept verbatim and may span lines.
fn split_records(input: &str) -> Result<Vec<(usize, Vec<String>)>, MetricsError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut start = 1;
    let mut chars = input.chars().peekable();

    let finish = |current: &mut String, quoted: &mut bool| {
        let field = std::mem::take(current);
        if std::mem::take(quoted) {
            field
        } else {
            field.trim().to_string()
        }
    };

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => in_quotes = false,
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    current.push(c);
                }
            }
            continue;
        }
        match c {
            '"' if !quoted && current.trim().is_empty() => {
                current.clear();
                quoted = true;
                in_quotes = true;
            }
            ',' => fields.push(finish(&mut current, &mut quoted)),
            '\n' => {
                let blank = fields.is_empty() && !quoted && current.trim().is_empty();
                fields.push(finish(&mut current, &mut quoted));
                let record = std::mem::take(&mut fields);
                if !blank {
                    records.push((start, record));
                }
                line += 1;
                start = line;
            }
            _ if quoted && c.is_whitespace() => {}
            _ if quoted => {
                return Err(MetricsError::Parse {
                    line,
                    message: format!("unexpected {c:?} after closing quote"),
                })
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(MetricsError::Parse {
            line: start,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !(fields.is_empty() && !quoted && current.trim().is_empty()) {
        fields.push(finish(&mut current, &mut quoted));
        records.push((start, fields));
    }
    Ok(records)
}

fn field<T: FromStr>(line: usize, raw: &str) -> Result<T, MetricsError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| MetricsError::Parse {
        line,
        message: format!("{raw:?}: {e}"),
    })
}
