//! Problem model: tasks, workers and the immutable problem instance.
//!
//! Records carry a stable positional `index`; a [`Solution`](crate::Solution)
//! refers to workers by that index. Nothing in this module mutates after
//! construction.
//!
//! # Key Types
//!
//! - [`Task`]: a unit of work with duration, difficulty, deadline and skill tag
//! - [`Worker`]: capacity, skill level and a set of skill tags
//! - [`Problem`]: validated task and worker lists plus precomputed
//!   compatibility lists

#[cfg(test)]
pub(crate) mod fixtures;
mod problem;
mod task;
mod worker;

pub use problem::Problem;
pub use task::Task;
pub use worker::Worker;
