//! Genetic search.
//!
//! Evolves a population of assignment vectors. Every generation keeps the
//! cheapest individuals unchanged (elitism), then fills the rest with
//! offspring of tournament-selected parents produced by uniform crossover
//! and skill-aware mutation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, elitism, rates, selection
//! - [`GeneticSearch`]: executes the evolutionary loop
//!
//! # Submodules
//!
//! - [`operators`]: uniform crossover and compatible-worker mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::GeneticSearch;
pub use selection::Selection;
