//! Parent selection.
//!
//! Selection works on the population's cost vector and returns an index.
//! Lower cost is better.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_assign::Selection;
/// use u_assign::random::create_rng;
///
/// let costs = [10.0, 0.5, 7.0];
/// let mut rng = create_rng(42);
/// let idx = Selection::Tournament(3).select(&costs, &mut rng);
/// assert!(idx < costs.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Sample `k` individuals uniformly with replacement, keep the cheapest.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Linear ranking: the i-th best of n gets weight `n - i`.
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index given the population's costs.
    ///
    /// # Panics
    /// Panics if `costs` is empty.
    pub fn select<R: Rng>(&self, costs: &[f64], rng: &mut R) -> usize {
        assert!(!costs.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(costs, *k, rng),
            Selection::Rank => rank(costs, rng),
        }
    }
}

fn tournament<R: Rng>(costs: &[f64], k: usize, rng: &mut R) -> usize {
    let n = costs.len();
    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if costs[idx] < costs[best] {
            best = idx;
        }
    }
    best
}

fn rank<R: Rng>(costs: &[f64], rng: &mut R) -> usize {
    let n = costs.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (rank, &idx) in order.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return idx;
        }
    }

    order[n - 1] // floating-point fallback
}
