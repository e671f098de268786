//! Particle-swarm search.
//!
//! Particles move through the discrete assignment space by integrating a
//! real-valued velocity per task. After each move the rounded target index
//! is snapped onto the closest worker able to perform the task, so every
//! position stays a valid worker index.
//!
//! When the global best has not improved for more than
//! [`PsoConfig::stagnation_limit`] iterations the social pull is scaled by a
//! random boost to push the swarm out of the basin it is stuck in.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod particle;
mod runner;

pub use config::PsoConfig;
pub use particle::{snap_to_compatible, Particle, Swarm};
pub use runner::ParticleSwarmSearch;
