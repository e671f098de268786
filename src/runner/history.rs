//! Per-iteration statistics.

use serde::Serialize;

use crate::cost::Evaluation;

/// Summary of one iteration's population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopulationStats {
    /// Lowest cost in the population.
    pub min_cost: f64,
    /// Mean cost over the population.
    pub average_cost: f64,
    /// Number of feasible individuals.
    pub feasible_count: usize,
    pub size: usize,
}

impl PopulationStats {
    /// Computes the summary over `evaluations`.
    ///
    /// An empty iterator yields infinite costs and size 0.
    pub fn from_evaluations<'e, I>(evaluations: I) -> Self
    where
        I: IntoIterator<Item = &'e Evaluation>,
    {
        let mut min_cost = f64::INFINITY;
        let mut total = 0.0;
        let mut feasible_count = 0;
        let mut size = 0;
        for e in evaluations {
            min_cost = min_cost.min(e.cost);
            total += e.cost;
            if e.is_feasible() {
                feasible_count += 1;
            }
            size += 1;
        }
        let average_cost = if size == 0 {
            f64::INFINITY
        } else {
            total / size as f64
        };
        Self {
            min_cost,
            average_cost,
            feasible_count,
            size,
        }
    }
}

/// Time series with one entry per executed iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchHistory {
    /// Best-so-far cost at the end of each iteration.
    pub best_cost: Vec<f64>,
    /// Average population cost of each iteration.
    pub average_cost: Vec<f64>,
    /// Feasible individuals in each iteration.
    pub feasible_count: Vec<usize>,
}

impl SearchHistory {
    pub fn record(&mut self, best_cost: f64, stats: &PopulationStats) {
        self.best_cost.push(best_cost);
        self.average_cost.push(stats.average_cost);
        self.feasible_count.push(stats.feasible_count);
    }

    pub fn len(&self) -> usize {
        self.best_cost.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_cost.is_empty()
    }

    pub fn clear(&mut self) {
        self.best_cost.clear();
        self.average_cost.clear();
        self.feasible_count.clear();
    }
}
