//! Cost evaluation.
//!
//! A pure function from ([`Solution`](crate::Solution), [`Problem`](crate::Problem))
//! to a scalar cost plus a per-term breakdown. All three search strategies
//! share this one definition of fitness.
//!
//! # Terms
//!
//! | Term | Kind | Unit |
//! |---|---|---|
//! | Overload | hard | hours above capacity |
//! | Skill mismatch | hard | assignments |
//! | Skill-level violation | hard | assignments |
//! | Unique-assignment violation | hard | positions with no real worker |
//! | Deadline overrun | soft | hours past deadline |
//!
//! Hard terms are multiplied by [`CostWeights::hard_multiplier`] before
//! weighting so any hard violation dominates every soft one.

mod breakdown;
mod evaluator;

pub use breakdown::{CostBreakdown, Evaluation};
pub use evaluator::{CostModel, CostWeights, DeadlineOrder, HARD_CONSTRAINT_MULTIPLIER};
