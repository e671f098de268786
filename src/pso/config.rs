//! Particle-swarm configuration.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Configuration for particle-swarm search.
///
/// # Examples
///
/// ```
/// use u_assign::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_swarm_size(40)
///     .with_inertia(0.6)
///     .with_stagnation_limit(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoConfig {
    /// Number of particles.
    pub swarm_size: usize,

    /// Maximum number of iterations.
    pub max_iterations: usize,

    /// Inertia weight `w`.
    pub inertia: f64,

    /// Cognitive coefficient `c1` (pull towards the personal best).
    pub cognitive: f64,

    /// Social coefficient `c2` (pull towards the global best).
    pub social: f64,

    /// Iterations without global improvement before the social term is boosted.
    pub stagnation_limit: usize,

    /// Lower bound of the stagnation boost factor.
    pub boost_min: f64,

    /// Upper bound of the stagnation boost factor.
    pub boost_max: f64,

    /// Initial velocities are drawn uniformly from `[-initial_velocity, initial_velocity]`.
    pub initial_velocity: f64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            max_iterations: 100,
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            stagnation_limit: 20,
            boost_min: 1.0,
            boost_max: 1.5,
            initial_velocity: 1.0,
        }
    }
}

impl PsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    pub fn with_cognitive(mut self, c1: f64) -> Self {
        self.cognitive = c1;
        self
    }

    pub fn with_social(mut self, c2: f64) -> Self {
        self.social = c2;
        self
    }

    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    pub fn with_boost_range(mut self, min: f64, max: f64) -> Self {
        self.boost_min = min;
        self.boost_max = max;
        self
    }

    pub fn with_initial_velocity(mut self, m: f64) -> Self {
        self.initial_velocity = m;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swarm_size == 0 {
            return Err(ConfigError::Invalid("swarm_size must be at least 1".into()));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("max_iterations must be at least 1".into()));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
            ("boost_min", self.boost_min),
            ("boost_max", self.boost_max),
            ("initial_velocity", self.initial_velocity),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.boost_min > self.boost_max {
            return Err(ConfigError::Invalid(format!(
                "boost_min ({}) must not exceed boost_max ({})",
                self.boost_min, self.boost_max
            )));
        }
        Ok(())
    }
}
