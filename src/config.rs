//! Solver configuration.
//!
//! Every strategy has its own builder-style config; [`SolverConfig`]
//! aggregates them with the shared run and cost settings so a whole
//! experiment can be described in one TOML file.
//!
//! # Examples
//!
//! ```
//! use u_assign::config::{Algorithm, SolverConfig};
//! use u_assign::{Problem, Solver, Task, Worker};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     seed = 42
//!
//!     [run]
//!     report_interval = 5
//!
//!     [genetic]
//!     population_size = 20
//!     selection = { tournament = 4 }
//!
//!     [particle_swarm]
//!     inertia = 0.6
//! "#).unwrap();
//!
//! assert_eq!(config.genetic.population_size, 20);
//! assert_eq!(config.ant_colony.ant_count, 30);
//!
//! let problem = Problem::new(
//!     vec![Task::new(0, "T1", 3.0, 1, 10.0, "X")],
//!     vec![Worker::new(0, "W1", 6.0, 5, ["X"])],
//! ).unwrap();
//! let mut solver = Algorithm::AntColony.build(&problem, &config).unwrap();
//! solver.run().unwrap();
//! assert_eq!(solver.best_cost(), 0.0);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aco::{AcoConfig, AntColonySearch};
use crate::cost::CostModel;
use crate::error::SolverError;
use crate::ga::{GaConfig, GeneticSearch};
use crate::model::Problem;
use crate::pso::{ParticleSwarmSearch, PsoConfig};
use crate::random::rng_from_seed;
use crate::runner::{RunConfig, Solver};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Rejects a probability outside `[0, 1]`.
pub(crate) fn check_rate(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}

/// Complete configuration of an experiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Seed for the random source; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub run: RunConfig,
    pub cost: CostModel,
    pub genetic: GaConfig,
    pub ant_colony: AcoConfig,
    pub particle_swarm: PsoConfig,
}

impl SolverConfig {
    /// Loads and validates a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates a TOML document. Missing sections take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run.validate()?;
        self.cost.validate()?;
        self.genetic.validate()?;
        self.ant_colony.validate()?;
        self.particle_swarm.validate()
    }
}

/// The available search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Genetic,
    AntColony,
    ParticleSwarm,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Genetic,
        Algorithm::AntColony,
        Algorithm::ParticleSwarm,
    ];

    /// Constructs the strategy for `problem` from `config`.
    ///
    /// Each call creates a fresh generator from `config.seed`.
    pub fn build<'a>(
        &self,
        problem: &'a Problem,
        config: &SolverConfig,
    ) -> Result<Box<dyn Solver + 'a>, SolverError> {
        let rng = rng_from_seed(config.seed);
        let solver: Box<dyn Solver + 'a> = match self {
            Algorithm::Genetic => Box::new(
                GeneticSearch::new(problem, config.genetic.clone(), rng)?
                    .with_cost_model(config.cost)?
                    .with_run_config(config.run.clone())?,
            ),
            Algorithm::AntColony => Box::new(
                AntColonySearch::new(problem, config.ant_colony.clone(), rng)?
                    .with_cost_model(config.cost)?
                    .with_run_config(config.run.clone())?,
            ),
            Algorithm::ParticleSwarm => Box::new(
                ParticleSwarmSearch::new(problem, config.particle_swarm.clone(), rng)?
                    .with_cost_model(config.cost)?
                    .with_run_config(config.run.clone())?,
            ),
        };
        Ok(solver)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Genetic => "GA",
            Algorithm::AntColony => "ACO",
            Algorithm::ParticleSwarm => "PSO",
        })
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ga" | "genetic" => Ok(Algorithm::Genetic),
            "aco" | "ant_colony" => Ok(Algorithm::AntColony),
            "pso" | "particle_swarm" => Ok(Algorithm::ParticleSwarm),
            other => Err(ConfigError::Invalid(format!("unknown algorithm: {other}"))),
        }
    }
}
