//! GA evolutionary loop.
//!
//! [`GeneticSearch`] orchestrates the evolutionary process:
//! initialization → elitism → selection → crossover → mutation → repeat.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;

use super::config::GaConfig;
use super::operators::{compatible_mutation, uniform_crossover};
use crate::cost::{CostModel, Evaluation};
use crate::error::{ReportError, SolverError};
use crate::model::Problem;
use crate::random::{create_rng, SolverRng};
use crate::runner::{
    evaluate_checked, Candidate, IterationReport, PopulationStats, RunConfig, RunOutcome,
    SearchCore, SearchEngine, SearchHistory, Solver, SolverListener,
};
use crate::solution::Solution;

/// Genetic search over task assignments.
///
/// # Usage
///
/// ```
/// use u_assign::{GaConfig, GeneticSearch, Problem, Solver, Task, Worker};
///
/// let problem = Problem::new(
///     vec![
///         Task::new(0, "T1", 2.0, 1, 10.0, "X"),
///         Task::new(1, "T2", 2.0, 1, 10.0, "Y"),
///     ],
///     vec![
///         Worker::new(0, "W1", 4.0, 3, ["X"]),
///         Worker::new(1, "W2", 4.0, 3, ["Y"]),
///     ],
/// ).unwrap();
///
/// let mut ga = GeneticSearch::seeded(&problem, GaConfig::default(), 42).unwrap();
/// let outcome = ga.run().unwrap();
/// assert_eq!(ga.best_cost(), 0.0);
/// assert!(outcome.iterations <= 100);
/// ```
#[derive(Debug)]
pub struct GeneticSearch<'a, R: Rng = SolverRng> {
    core: SearchCore<'a>,
    engine: GaEngine<'a, R>,
}

#[derive(Debug)]
struct GaEngine<'a, R> {
    problem: &'a Problem,
    config: GaConfig,
    model: CostModel,
    rng: R,
    population: Vec<Candidate>,
}

impl<'a> GeneticSearch<'a, SolverRng> {
    /// Creates a search using the default generator seeded with `seed`.
    pub fn seeded(problem: &'a Problem, config: GaConfig, seed: u64) -> Result<Self, SolverError> {
        Self::new(problem, config, create_rng(seed))
    }
}

impl<'a, R: Rng> GeneticSearch<'a, R> {
    /// Creates a search.
    ///
    /// # Errors
    /// [`SolverError::Config`] if `config` is invalid.
    pub fn new(problem: &'a Problem, config: GaConfig, rng: R) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(Self {
            core: SearchCore::new("GA"),
            engine: GaEngine {
                problem,
                config,
                model: CostModel::default(),
                rng,
                population: Vec::new(),
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

    pub fn config(&self) -> &GaConfig {
        &self.engine.config
    }

    /// Current population (empty before [`run`](Solver::run)).
    pub fn population(&self) -> &[Candidate] {
        &self.engine.population
    }
}

impl<R: Rng> GaEngine<'_, R> {
    fn evaluate(&self, solution: Solution) -> Result<Candidate, SolverError> {
        let evaluation = evaluate_checked(&self.model, &solution, self.problem)?;
        Ok(Candidate {
            solution,
            evaluation,
        })
    }

    fn report(&self) -> IterationReport {
        IterationReport {
            stats: PopulationStats::from_evaluations(self.population.iter().map(|c| &c.evaluation)),
            best: find_best(&self.population).cloned(),
        }
    }
}

impl<R: Rng> SearchEngine for GaEngine<'_, R> {
    fn problem(&self) -> &Problem {
        self.problem
    }

    fn initialize(&mut self) -> Result<Option<Candidate>, SolverError> {
        let mut population = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let solution = Solution::random_compatible(self.problem, &mut self.rng);
            population.push(self.evaluate(solution)?);
        }
        self.population = population;
        Ok(find_best(&self.population).cloned())
    }

    fn step(&mut self) -> Result<IterationReport, SolverError> {
        let size = self.config.population_size;

        // Sort by cost (ascending = best first)
        self.population
            .sort_by(|a, b| a.evaluation.cost.total_cmp(&b.evaluation.cost));
        let costs: Vec<f64> = self.population.iter().map(|c| c.evaluation.cost).collect();

        // Elite preservation
        let mut next_gen: Vec<Candidate> = self.population[..self.config.elite_count].to_vec();

        while next_gen.len() < size {
            let p1 = self.config.selection.select(&costs, &mut self.rng);
            let p2 = self.config.selection.select(&costs, &mut self.rng);
            let (parent1, parent2) = (&self.population[p1].solution, &self.population[p2].solution);

            let (child1, child2) = if self.rng.random::<f64>() < self.config.crossover_rate {
                uniform_crossover(parent1, parent2, &mut self.rng)
            } else {
                (parent1.clone(), parent2.clone())
            };

            for mut child in [child1, child2] {
                if next_gen.len() >= size {
                    break;
                }
                compatible_mutation(&mut child, self.problem, self.config.mutation_rate, &mut self.rng);
                next_gen.push(self.evaluate(child)?);
            }
        }

        self.population = next_gen;
        Ok(self.report())
    }

    fn max_iterations(&self) -> usize {
        self.config.max_generations
    }

    fn state_bytes(&self) -> usize {
        self.population
            .iter()
            .map(|c| std::mem::size_of::<Candidate>() + c.solution.heap_bytes())
            .sum()
    }
}

/// Find the individual with the lowest cost.
fn find_best(population: &[Candidate]) -> Option<&Candidate> {
    population
        .iter()
        .min_by(|a, b| a.evaluation.cost.total_cmp(&b.evaluation.cost))
}

impl<R: Rng> Solver for GeneticSearch<'_, R> {
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

// ============================================================================
// Tests
// ============================================================================
