//! Ant-colony loop.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;

use super::config::AcoConfig;
use super::pheromone::{deposit_amount, PheromoneMatrix};
use crate::cost::{CostModel, Evaluation};
use crate::error::{ReportError, SolverError};
use crate::model::Problem;
use crate::random::{create_rng, SolverRng};
use crate::runner::{
    evaluate_checked, Candidate, IterationReport, PopulationStats, RunConfig, RunOutcome,
    SearchCore, SearchEngine, SearchHistory, Solver, SolverListener,
};
use crate::solution::Solution;

/// Ant-colony search over task assignments.
///
/// Each iteration: evaporate, let every ant build a path by roulette
/// selection per task, evaluate the paths, then deposit
/// [`deposit_amount`]`(cost)` on every edge each ant used.
///
/// # Usage
///
/// ```
/// use u_assign::{AcoConfig, AntColonySearch, Problem, Solver, Task, Worker};
///
/// let problem = Problem::new(
///     vec![Task::new(0, "T1", 3.0, 1, 10.0, "X")],
///     vec![Worker::new(0, "W1", 6.0, 5, ["X"])],
/// ).unwrap();
///
/// let mut aco = AntColonySearch::seeded(&problem, AcoConfig::default(), 42).unwrap();
/// let outcome = aco.run().unwrap();
/// assert_eq!(outcome.iterations, 1);
/// assert_eq!(aco.best_cost(), 0.0);
/// ```
#[derive(Debug)]
pub struct AntColonySearch<'a, R: Rng = SolverRng> {
    core: SearchCore<'a>,
    engine: AcoEngine<'a, R>,
}

#[derive(Debug)]
struct AcoEngine<'a, R> {
    problem: &'a Problem,
    config: AcoConfig,
    model: CostModel,
    rng: R,
    pheromone: PheromoneMatrix,
    ants: Vec<Candidate>,
}

impl<'a> AntColonySearch<'a, SolverRng> {
    /// Creates a search using the default generator seeded with `seed`.
    pub fn seeded(problem: &'a Problem, config: AcoConfig, seed: u64) -> Result<Self, SolverError> {
        Self::new(problem, config, create_rng(seed))
    }
}

impl<'a, R: Rng> AntColonySearch<'a, R> {
    /// Creates a search and seeds the pheromone matrix.
    ///
    /// # Errors
    /// [`SolverError::Config`] if `config` is invalid.
    pub fn new(problem: &'a Problem, config: AcoConfig, rng: R) -> Result<Self, SolverError> {
        config.validate()?;
        let pheromone = PheromoneMatrix::for_problem(problem, config.initial_pheromone);
        Ok(Self {
            core: SearchCore::new("ACO"),
            engine: AcoEngine {
                problem,
                config,
                model: CostModel::default(),
                rng,
                pheromone,
                ants: Vec::new(),
            },
        })
    }

    /// Replaces the cost model.
    pub fn with_cost_model(mut self, model: CostModel) -> Result<Self, SolverError> {
        model.validate()?;
        self.engine.model = model;
        Ok(self)
    }

    pub fn with_run_config(mut self, config: RunConfig) -> Result<Self, SolverError> {
        config.validate()?;
        self.core.control_mut().set_config(config);
        Ok(self)
    }

    pub fn with_listener(mut self, listener: impl SolverListener + 'a) -> Self {
        self.core.add_listener(listener);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.core.control_mut().set_cancel_flag(flag);
        self
    }

    pub fn config(&self) -> &AcoConfig {
        &self.engine.config
    }

    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.engine.pheromone
    }

    /// Paths built in the most recent iteration.
    pub fn ants(&self) -> &[Candidate] {
        &self.engine.ants
    }
}

impl<R: Rng> AcoEngine<'_, R> {
    fn construct_path(&mut self) -> Solution {
        let path = (0..self.problem.num_tasks())
            .map(|task| self.pheromone.select_worker(task, &mut self.rng))
            .collect::<Vec<_>>();
        Solution::new(path)
    }
}

impl<R: Rng> SearchEngine for AcoEngine<'_, R> {
    fn problem(&self) -> &Problem {
        self.problem
    }

    fn initialize(&mut self) -> Result<Option<Candidate>, SolverError> {
        self.pheromone = PheromoneMatrix::for_problem(self.problem, self.config.initial_pheromone);
        self.ants.clear();
        Ok(None)
    }

    fn step(&mut self) -> Result<IterationReport, SolverError> {
        self.pheromone.decay(self.config.decay_rate);

        let paths: Vec<Solution> = (0..self.config.ant_count)
            .map(|_| self.construct_path())
            .collect();

        let mut ants = Vec::with_capacity(paths.len());
        let mut best: Option<Candidate> = None;
        for path in paths {
            let evaluation = evaluate_checked(&self.model, &path, self.problem)?;
            self.pheromone.reinforce(&path, deposit_amount(evaluation.cost));
            let ant = Candidate {
                solution: path,
                evaluation,
            };
            if best
                .as_ref()
                .is_none_or(|b| ant.evaluation.cost < b.evaluation.cost)
            {
                best = Some(ant.clone());
            }
            ants.push(ant);
        }

        self.ants = ants;
        Ok(IterationReport {
            stats: PopulationStats::from_evaluations(self.ants.iter().map(|a| &a.evaluation)),
            best,
        })
    }

    fn max_iterations(&self) -> usize {
        self.config.max_iterations
    }

    fn state_bytes(&self) -> usize {
        self.pheromone.heap_bytes()
            + self
                .ants
                .iter()
                .map(|a| std::mem::size_of::<Candidate>() + a.solution.heap_bytes())
                .sum::<usize>()
    }
}

impl<R: Rng> Solver for AntColonySearch<'_, R> {
    fn name(&self) -> &'static str {
        self.core.algorithm()
    }

    fn run(&mut self) -> Result<RunOutcome, SolverError> {
        self.core.drive(&mut self.engine)
    }

    fn best_solution(&self) -> Option<&Solution> {
        self.core.best_solution()
    }

    fn best_evaluation(&self) -> Option<&Evaluation> {
        self.core.best_evaluation()
    }

    fn history(&self) -> &SearchHistory {
        self.core.history()
    }

    fn iterations(&self) -> usize {
        self.core.iteration()
    }

    fn report_errors(&self) -> &[ReportError] {
        self.core.report_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::runner::Termination;
    use proptest::prelude::*;

    #[test]
    fn test_trivial_converges_in_one_iteration() {
        let problem = fixtures::trivial();
        let mut aco = AntColonySearch::seeded(&problem, AcoConfig::default(), 42).unwrap();
        let outcome = aco.run().unwrap();
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.termination, Termination::ZeroCost);
        assert_eq!(aco.best_solution().unwrap().to_vec(), vec![0]);
    }

    #[test]
    fn test_unsatisfiable_task_assignable_first_iteration() {
        let problem = fixtures::unsatisfiable();
        let config = AcoConfig::default().with_ant_count(10).with_max_iterations(1);
        let mut aco = AntColonySearch::seeded(&problem, config, 3).unwrap();
        assert_eq!(aco.pheromone().row(0), &[1.0, 1.0, 1.0]);

        let outcome = aco.run().unwrap();
        assert_eq!(outcome.iterations, 1);
        assert_eq!(aco.ants().len(), 10);
        for ant in aco.ants() {
            assert!(ant.solution[0] < problem.num_workers());
            assert!(!ant.evaluation.is_feasible());
        }
        assert!(aco.best_solution().is_some());
    }

    #[test]
    fn test_team_reaches_feasible_assignment() {
        let problem = fixtures::team();
        let config = AcoConfig::default().with_ant_count(30).with_max_iterations(150);
        let mut aco = AntColonySearch::seeded(&problem, config, 42).unwrap();
        aco.run().unwrap();
        let best = aco.best_evaluation().unwrap();
        assert!(best.is_feasible(), "expected feasible, got {best:?}");
    }

    #[test]
    fn test_history_lengths_match_iterations() {
        let problem = fixtures::team();
        let config = AcoConfig::default().with_ant_count(5).with_max_iterations(12);
        let mut aco = AntColonySearch::seeded(&problem, config, 8).unwrap();
        let outcome = aco.run().unwrap();
        assert_eq!(aco.iterations(), outcome.iterations);
        let history = aco.history();
        assert_eq!(history.len(), outcome.iterations);
        assert_eq!(history.feasible_count.len(), outcome.iterations);
        assert!(history.feasible_count.iter().all(|&n| n <= 5));
    }

    #[test]
    fn test_full_decay_keeps_matrix_finite() {
        let problem = fixtures::team();
        let config = AcoConfig::default()
            .with_decay_rate(1.0)
            .with_ant_count(4)
            .with_max_iterations(10);
        let mut aco = AntColonySearch::seeded(&problem, config, 1).unwrap();
        aco.run().unwrap();
        let m = aco.pheromone();
        assert!(m.min_value() >= 0.0);
        for t in 0..m.num_tasks() {
            assert!(m.row(t).iter().all(|v| v.is_finite()));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_pheromone_stays_non_negative(
            seed in any::<u64>(),
            decay in 0.0f64..=1.0,
            iterations in 1usize..15,
        ) {
            let problem = fixtures::team();
            let config = AcoConfig::default()
                .with_decay_rate(decay)
                .with_ant_count(6)
                .with_max_iterations(iterations);
            let mut aco = AntColonySearch::seeded(&problem, config, seed).unwrap();
            aco.run().unwrap();
            prop_assert!(aco.pheromone().min_value() >= 0.0);
        }
    }
}
