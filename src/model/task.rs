//! Task records.

use serde::{Deserialize, Serialize};

/// A task to be assigned to exactly one worker.
///
/// `duration` and `deadline` are in hours. `difficulty` is the minimum
/// worker skill level required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub duration: f64,
    pub difficulty: u32,
    pub deadline: f64,
    pub required_skill: String,
    /// Position of this task in the problem's task list.
    pub index: usize,
}

impl Task {
    pub fn new(
        index: usize,
        id: impl Into<String>,
        duration: f64,
        difficulty: u32,
        deadline: f64,
        required_skill: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            duration,
            difficulty,
            deadline,
            required_skill: required_skill.into(),
            index,
        }
    }
}
