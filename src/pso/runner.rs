//! Particle-swarm loop.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;

use super::config::PsoConfig;
use super::particle::{Particle, Swarm};
use crate::cost::{CostModel, Evaluation};
use crate::error::{ReportError, SolverError};
use crate::model::Problem;
use crate::random::{create_rng, SolverRng};
use crate::runner::{
    evaluate_checked, Candidate, IterationReport, PopulationStats, RunConfig, RunOutcome,
    SearchCore, SearchEngine, SearchHistory, Solver, SolverListener,
};
use crate::solution::Solution;

/// Particle-swarm search over task assignments.
///
/// # Usage
///
/// ```
/// use u_assign::{ParticleSwarmSearch, Problem, PsoConfig, Solver, Task, Worker};
///
/// let problem = Problem::new(
///     vec![
///         Task::new(0, "T1", 2.0, 1, 10.0, "X"),
///         Task::new(1, "T2", 2.0, 1, 10.0, "X"),
///     ],
///     vec![Worker::new(0, "W1", 8.0, 2, ["X"])],
/// ).unwrap();
///
/// let mut pso = ParticleSwarmSearch::seeded(&problem, PsoConfig::default(), 7).unwrap();
/// pso.run().unwrap();
/// assert_eq!(pso.best_solution().unwrap().to_vec(), vec![0, 0]);
/// ```
#[derive(Debug)]
pub struct ParticleSwarmSearch<'a, R: Rng = SolverRng> {
    core: SearchCore<'a>,
    engine: PsoEngine<'a, R>,
}

#[derive(Debug)]
struct PsoEngine<'a, R> {
    problem: &'a Problem,
    config: PsoConfig,
    model: CostModel,
    rng: R,
    swarm: Swarm,
}

impl<'a> ParticleSwarmSearch<'a, SolverRng> {
    /// Creates a search using the default generator seeded with `seed`.
    pub fn seeded(problem: &'a Problem, config: PsoConfig, seed: u64) -> Result<Self, SolverError> {
        Self::new(problem, config, create_rng(seed))
    }
}

impl<'a, R: Rng> ParticleSwarmSearch<'a, R> {
    /// Creates a search.
    ///
    /// # Errors
    /// [`SolverError::Config`] if `config` is invalid.
    pub fn new(problem: &'a Problem, config: PsoConfig, rng: R) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(Self {
            core: SearchCore::new("PSO"),
            engine: PsoEngine {
                problem,
                config,
                model: CostModel::default(),
                rng,
                swarm: Swarm::default(),
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

    pub fn config(&self) -> &PsoConfig {
        &self.engine.config
    }

    /// Current swarm (empty before [`run`](Solver::run)).
    pub fn swarm(&self) -> &Swarm {
        &self.engine.swarm
    }
}

impl<R: Rng> PsoEngine<'_, R> {
    fn evaluate(&self, solution: Solution) -> Result<Candidate, SolverError> {
        let evaluation = evaluate_checked(&self.model, &solution, self.problem)?;
        Ok(Candidate {
            solution,
            evaluation,
        })
    }
}

impl<R: Rng> SearchEngine for PsoEngine<'_, R> {
    fn problem(&self) -> &Problem {
        self.problem
    }

    fn initialize(&mut self) -> Result<Option<Candidate>, SolverError> {
        let tasks = self.problem.num_tasks();
        let m = self.config.initial_velocity;
        let mut particles = Vec::with_capacity(self.config.swarm_size);
        for _ in 0..self.config.swarm_size {
            let position = Solution::random_compatible(self.problem, &mut self.rng);
            let velocity = (0..tasks)
                .map(|_| if m > 0.0 { self.rng.random_range(-m..=m) } else { 0.0 })
                .collect();
            particles.push(Particle::new(self.evaluate(position)?, velocity));
        }
        self.swarm = Swarm::new(particles);
        Ok(self.swarm.global_best.clone())
    }

    fn step(&mut self) -> Result<IterationReport, SolverError> {
        let Some(global) = self.swarm.global_best.as_ref().map(|c| c.solution.clone()) else {
            return Ok(IterationReport {
                stats: PopulationStats::from_evaluations(std::iter::empty()),
                best: None,
            });
        };
        let limit = self.problem.num_workers() as f64;

        let mut evaluations = Vec::with_capacity(self.swarm.particles.len());
        for i in 0..self.swarm.particles.len() {
            let boost = self.swarm.boost(&self.config, &mut self.rng);
            let particle = &mut self.swarm.particles[i];
            particle.update_velocity(&global, &self.config, boost, limit, &mut self.rng);
            particle.move_position(self.problem);

            let moved = self.evaluate(self.swarm.particles[i].position.clone())?;
            evaluations.push(moved.evaluation);
            self.swarm.particles[i].offer_personal_best(moved);
        }

        self.swarm.refresh_global_best();
        Ok(IterationReport {
            stats: PopulationStats::from_evaluations(evaluations.iter()),
            best: self.swarm.global_best.clone(),
        })
    }

    fn max_iterations(&self) -> usize {
        self.config.max_iterations
    }

    fn state_bytes(&self) -> usize {
        self.swarm.heap_bytes()
    }
}

impl<R: Rng> Solver for ParticleSwarmSearch<'_, R> {
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
