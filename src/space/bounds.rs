//! Scalar bounds shared by every dimension of the search space

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lower bound used by the demonstrations (Rastrigin's conventional domain)
pub const DEFAULT_LOWER: f64 = -5.12;
/// Upper bound used by the demonstrations
pub const DEFAULT_UPPER: f64 = 5.12;

/// Closed interval `[min, max]` applied to each coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create new bounds
    ///
    /// # Panics
    /// Panics if the bounds are not finite or `min >= max`. Use
    /// [`Bounds::try_new`] for user-supplied values.
    pub fn new(min: f64, max: f64) -> Self {
        match Self::try_new(min, max) {
            Ok(bounds) => bounds,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create new bounds, rejecting inverted, empty or non-finite intervals
    pub fn try_new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Create symmetric bounds centered at 0
    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Check that `min < max` and both are finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::Bounds {
                lower: self.min,
                upper: self.max,
            })
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value to be within bounds
    ///
    /// NaN is passed through so that divergence stays detectable.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_LOWER,
            max: DEFAULT_UPPER,
        }
    }
}

impl TryFrom<(f64, f64)> for Bounds {
    type Error = ConfigError;

    fn try_from((min, max): (f64, f64)) -> Result<Self, Self::Error> {
        Self::try_new(min, max)
    }
}
