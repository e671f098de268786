//! Text formatting of cost and run results.
//!
//! Used by the runner to produce the final report handed to listeners.
//! Kept free of any strategy state so every algorithm formats the same way.

use std::fmt::Write;

use crate::cost::Evaluation;
use crate::model::Problem;
use crate::runner::RunOutcome;
use crate::solution::Solution;

/// One-line summary of an evaluation's cost terms.
pub fn format_cost(evaluation: &Evaluation) -> String {
    let b = &evaluation.breakdown;
    format!(
        "cost={:.4} feasible={} overload={:.2}h ({} workers) skill_mismatch={} \
         skill_level={} invalid={} deadline_overrun={:.2}h ({} tasks)",
        evaluation.cost,
        evaluation.is_feasible(),
        b.overload_hours,
        b.overloaded_workers,
        b.skill_mismatches,
        b.skill_level_violations,
        b.invalid_assignments,
        b.deadline_overrun_hours,
        b.deadline_violations,
    )
}

/// Per-worker listing of assigned task ids and hours.
pub fn format_assignment(solution: &Solution, problem: &Problem) -> String {
    let tasks = problem.tasks();
    let mut out = String::new();
    for worker in problem.workers() {
        let assigned: Vec<&str> = solution
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == worker.index)
            .map(|(t, _)| tasks[t].id.as_str())
            .collect();
        let hours: f64 = solution
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == worker.index)
            .map(|(t, _)| tasks[t].duration)
            .sum();
        let _ = writeln!(
            out,
            "  {} [{:.1}/{:.1}h]: {}",
            worker.id,
            hours,
            worker.available_hours,
            if assigned.is_empty() {
                "-".to_string()
            } else {
                assigned.join(", ")
            }
        );
    }
    out
}

/// Final report emitted once per run.
pub fn final_report(
    algorithm: &str,
    outcome: &RunOutcome,
    best: Option<(&Solution, &Evaluation)>,
    problem: &Problem,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{algorithm}: {} iterations in {} ms ({})",
        outcome.iterations,
        outcome.elapsed.as_millis(),
        outcome.termination
    );
    match best {
        Some((solution, evaluation)) => {
            let _ = writeln!(out, "best: {}", format_cost(evaluation));
            out.push_str(&format_assignment(solution, problem));
        }
        None => out.push_str("best: none\n"),
    }
    out
}
