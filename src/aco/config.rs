//! Ant-colony configuration.

use serde::{Deserialize, Serialize};

use crate::config::{check_rate, ConfigError};

/// Configuration for ant-colony search.
///
/// # Examples
///
/// ```
/// use u_assign::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ant_count(50)
///     .with_decay_rate(0.05)
///     .with_max_iterations(300);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Ants constructing a path per iteration.
    pub ant_count: usize,

    /// Maximum number of iterations.
    pub max_iterations: usize,

    /// Fraction of pheromone evaporating each iteration (0.0–1.0).
    pub decay_rate: f64,

    /// Pheromone on compatible edges at start. Must be positive.
    pub initial_pheromone: f64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ant_count: 30,
            max_iterations: 100,
            decay_rate: 0.1,
            initial_pheromone: 1.0,
        }
    }
}

impl AcoConfig {
    pub fn with_ant_count(mut self, n: usize) -> Self {
        self.ant_count = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_decay_rate(mut self, rate: f64) -> Self {
        self.decay_rate = rate;
        self
    }

    pub fn with_initial_pheromone(mut self, value: f64) -> Self {
        self.initial_pheromone = value;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ant_count == 0 {
            return Err(ConfigError::Invalid("ant_count must be at least 1".into()));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("max_iterations must be at least 1".into()));
        }
        check_rate("decay_rate", self.decay_rate)?;
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "initial_pheromone must be positive and finite, got {}",
                self.initial_pheromone
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.ant_count, 30);
        assert_eq!(config.max_iterations, 100);
        assert!((config.decay_rate - 0.1).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AcoConfig::default().with_ant_count(0).validate().is_err());
        assert!(AcoConfig::default().with_max_iterations(0).validate().is_err());
        assert!(AcoConfig::default().with_decay_rate(1.01).validate().is_err());
        assert!(AcoConfig::default().with_decay_rate(-0.5).validate().is_err());
        assert!(AcoConfig::default().with_initial_pheromone(0.0).validate().is_err());
        assert!(AcoConfig::default()
            .with_initial_pheromone(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_decay_bounds_allowed() {
        assert!(AcoConfig::default().with_decay_rate(0.0).validate().is_ok());
        assert!(AcoConfig::default().with_decay_rate(1.0).validate().is_ok());
    }
}
