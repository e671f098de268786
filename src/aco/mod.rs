//! Ant-colony search.
//!
//! Artificial ants build assignments task by task, picking each worker by
//! roulette selection over a tasks × workers pheromone matrix. Every
//! iteration the matrix evaporates and each ant reinforces the edges it
//! used in inverse proportion to its cost.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: ant count, decay rate, initial pheromone
//! - [`PheromoneMatrix`]: non-negative desirability per (task, worker)
//! - [`AntColonySearch`]: executes the colony loop
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod pheromone;
mod runner;

pub use config::AcoConfig;
pub use pheromone::{deposit_amount, PheromoneMatrix};
pub use runner::AntColonySearch;
