//! Metaheuristic task-to-worker assignment.
//!
//! Assigns a fixed set of tasks to a fixed set of workers so as to minimize
//! a weighted penalty over capacity, skill and deadline constraints. Three
//! independent strategies search the same discrete space and share one
//! cost definition and one termination protocol:
//!
//! - **Genetic Search (GA)**: elitist population with tournament selection,
//!   uniform crossover and skill-aware mutation.
//! - **Ant-Colony Search (ACO)**: roulette path construction over a
//!   tasks × workers pheromone matrix with evaporation and
//!   cost-proportional reinforcement.
//! - **Particle-Swarm Search (PSO)**: real-valued velocities rounded onto
//!   the nearest compatible worker, with a stagnation-triggered social
//!   boost.
//!
//! # Architecture
//!
//! - [`model`]: immutable [`Task`]/[`Worker`] records and the indexed
//!   [`Problem`]
//! - [`Solution`]: one worker index per task
//! - [`cost`]: the pure five-term [`CostModel`]
//! - [`runner`]: the [`Solver`] contract and the shared loop
//! - [`metrics`]: per-iteration records and their CSV form
//! - [`config`]: TOML-loadable [`SolverConfig`](config::SolverConfig)
//!
//! Every strategy takes its random source at construction; the same seed
//! reproduces the same search.

pub mod aco;
pub mod config;
pub mod cost;
pub mod error;
pub mod ga;
pub mod metrics;
pub mod model;
pub mod pso;
pub mod random;
pub mod report;
pub mod runner;
mod solution;

pub use aco::{AcoConfig, AntColonySearch};
pub use cost::{CostModel, Evaluation};
pub use error::SolverError;
pub use ga::{GaConfig, GeneticSearch, Selection};
pub use model::{Problem, Task, Worker};
pub use pso::{ParticleSwarmSearch, PsoConfig};
pub use runner::Solver;
pub use solution::Solution;
