//! Shared test problems.

use super::{Problem, Task, Worker};

/// One task, one capable worker: cost 0 is reachable immediately.
pub(crate) fn trivial() -> Problem {
    Problem::new(
        vec![Task::new(0, "T1", 3.0, 1, 10.0, "X")],
        vec![Worker::new(0, "W1", 6.0, 5, ["X"])],
    )
    .unwrap()
}

/// Twelve tasks over five workers with two skill families.
///
/// A zero-cost assignment exists (each worker can absorb its family's
/// tasks within capacity and deadlines).
pub(crate) fn team() -> Problem {
    let tasks = vec![
        Task::new(0, "api", 4.0, 3, 40.0, "backend"),
        Task::new(1, "db", 3.0, 4, 40.0, "backend"),
        Task::new(2, "auth", 2.0, 2, 40.0, "backend"),
        Task::new(3, "cache", 3.0, 3, 40.0, "backend"),
        Task::new(4, "queue", 2.0, 1, 40.0, "backend"),
        Task::new(5, "login", 3.0, 2, 40.0, "frontend"),
        Task::new(6, "theme", 2.0, 1, 40.0, "frontend"),
        Task::new(7, "forms", 4.0, 3, 40.0, "frontend"),
        Task::new(8, "charts", 3.0, 4, 40.0, "frontend"),
        Task::new(9, "i18n", 2.0, 2, 40.0, "frontend"),
        Task::new(10, "ci", 2.0, 2, 40.0, "ops"),
        Task::new(11, "deploy", 3.0, 3, 40.0, "ops"),
    ];
    let workers = vec![
        Worker::new(0, "ana", 10.0, 5, ["backend", "ops"]),
        Worker::new(1, "ben", 8.0, 3, ["backend"]),
        Worker::new(2, "cho", 10.0, 5, ["frontend"]),
        Worker::new(3, "dev", 8.0, 2, ["frontend", "ops"]),
        Worker::new(4, "eli", 8.0, 4, ["ops", "backend", "frontend"]),
    ];
    Problem::new(tasks, workers).unwrap()
}

/// Single task that nobody can perform.
pub(crate) fn unsatisfiable() -> Problem {
    Problem::new(
        vec![Task::new(0, "T1", 2.0, 9, 10.0, "Y")],
        vec![
            Worker::new(0, "W1", 8.0, 3, ["X"]),
            Worker::new(1, "W2", 8.0, 4, ["Z"]),
            Worker::new(2, "W3", 8.0, 5, ["X", "Z"]),
        ],
    )
    .unwrap()
}
