//! Worker records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Task;

/// A worker who can take on tasks up to `available_hours`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub available_hours: f64,
    pub skill_level: u32,
    pub skills: BTreeSet<String>,
    /// Position of this worker in the problem's worker list.
    pub index: usize,
}

impl Worker {
    pub fn new<I, S>(
        index: usize,
        id: impl Into<String>,
        available_hours: f64,
        skill_level: u32,
        skills: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            available_hours,
            skill_level,
            skills: skills.into_iter().map(Into::into).collect(),
            index,
        }
    }

    /// Whether this worker holds the task's required skill tag.
    pub fn has_skill(&self, task: &Task) -> bool {
        self.skills.contains(&task.required_skill)
    }

    /// Whether this worker's skill level reaches the task's difficulty.
    pub fn meets_level(&self, task: &Task) -> bool {
        self.skill_level >= task.difficulty
    }

    /// Whether this worker satisfies both skill constraints of `task`.
    pub fn can_perform(&self, task: &Task) -> bool {
        self.has_skill(task) && self.meets_level(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_checks() {
        let task = Task::new(0, "t", 2.0, 3, 10.0, "rust");
        let senior = Worker::new(0, "a", 8.0, 5, ["rust", "go"]);
        let junior = Worker::new(1, "b", 8.0, 1, ["rust"]);
        let other = Worker::new(2, "c", 8.0, 9, ["python"]);

        assert!(senior.can_perform(&task));
        assert!(junior.has_skill(&task));
        assert!(!junior.meets_level(&task));
        assert!(!other.has_skill(&task));
        assert!(other.meets_level(&task));
        assert!(!other.can_perform(&task));
    }
}
