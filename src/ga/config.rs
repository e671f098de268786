//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::config::{check_rate, ConfigError};

/// Configuration for genetic search.
///
/// # Defaults
///
/// ```
/// use u_assign::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.elite_count, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_assign::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_elite_count(4)
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Individuals copied unchanged into the next generation.
    pub elite_count: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied the two parents are cloned.
    pub crossover_rate: f64,

    /// Per-task probability of reassignment during mutation (0.0–1.0).
    pub mutation_rate: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            elite_count: 2,
            selection: Selection::default(),
            crossover_rate: 0.8,
            mutation_rate: 0.1,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Validates the configuration.
    ///
    /// Rates outside `[0, 1]` are rejected rather than clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be at least 1".into()));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::Invalid("max_generations must be at least 1".into()));
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::Invalid(
                "elite_count too high: elites fill entire population".into(),
            ));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(ConfigError::Invalid("tournament size must be at least 1".into()));
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.elite_count, 2);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_selection(Selection::Rank)
            .with_elite_count(10)
            .with_crossover_rate(0.6)
            .with_mutation_rate(0.05);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.elite_count, 10);
        assert!((config.crossover_rate - 0.6).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0).with_elite_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_count(10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rates_out_of_range() {
        assert!(GaConfig::default().with_crossover_rate(1.5).validate().is_err());
        assert!(GaConfig::default().with_crossover_rate(-0.1).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(2.0).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
        assert!(GaConfig::default()
            .with_crossover_rate(1.0)
            .with_mutation_rate(0.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = GaConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: GaConfig = toml::from_str(
            r#"
            population_size = 80
            selection = "rank"
            "#,
        )
        .unwrap();
        assert_eq!(config.population_size, 80);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.elite_count, 2);
    }
}
