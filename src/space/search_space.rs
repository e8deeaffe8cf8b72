//! Search space: bounds plus dimensionality
//!
//! Every algorithm samples, clamps and bound-checks positions through this type.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::space::bounds::Bounds;

/// Smallest supported dimensionality
pub const MIN_DIMENSION: usize = 2;
/// Largest supported dimensionality
pub const MAX_DIMENSION: usize = 3;

/// Hypercube `[min, max]^dimension`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchSpace {
    bounds: Bounds,
    dimension: usize,
}

impl SearchSpace {
    /// Create a validated search space
    pub fn new(bounds: Bounds, dimension: usize) -> Result<Self, ConfigError> {
        bounds.validate()?;
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
            return Err(ConfigError::Dimension(dimension));
        }
        Ok(Self { bounds, dimension })
    }

    /// Default `[-5.12, 5.12]` bounds with the given dimensionality
    pub fn with_dimension(dimension: usize) -> Result<Self, ConfigError> {
        Self::new(Bounds::default(), dimension)
    }

    /// Bounds shared by every coordinate
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of coordinates in a position
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Draw one position uniformly at random
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.dimension)
            .map(|_| rng.gen_range(self.bounds.min..=self.bounds.max))
            .collect()
    }

    /// Project every coordinate into the bounds (idempotent)
    pub fn clamp(&self, position: &mut [f64]) {
        for value in position.iter_mut() {
            *value = self.bounds.clamp(*value);
        }
    }

    /// Return a clamped copy of `position`
    pub fn clamped(&self, position: &[f64]) -> Vec<f64> {
        let mut out = position.to_vec();
        self.clamp(&mut out);
        out
    }

    /// Check dimensionality and bounds of a position
    pub fn contains(&self, position: &[f64]) -> bool {
        position.len() == self.dimension && position.iter().all(|&v| self.bounds.contains(v))
    }
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            dimension: MAX_DIMENSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_search_space_rejects_bad_dimension() {
        assert_eq!(
            SearchSpace::with_dimension(1),
            Err(ConfigError::Dimension(1))
        );
        assert_eq!(
            SearchSpace::with_dimension(4),
            Err(ConfigError::Dimension(4))
        );
        assert!(SearchSpace::with_dimension(2).is_ok());
        assert!(SearchSpace::with_dimension(3).is_ok());
    }

    #[test]
    fn test_search_space_rejects_bad_bounds() {
        let bounds = Bounds { min: 1.0, max: -1.0 };
        assert!(matches!(
            SearchSpace::new(bounds, 2),
            Err(ConfigError::Bounds { .. })
        ));
    }

    #[test]
    fn test_sample_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let space = SearchSpace::new(Bounds::new(-1.0, 2.0), 3).unwrap();
        for _ in 0..500 {
            let x = space.sample(&mut rng);
            assert_eq!(x.len(), 3);
            assert!(space.contains(&x));
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let space = SearchSpace::with_dimension(3).unwrap();
        let mut x = vec![-10.0, 0.5, 10.0];
        space.clamp(&mut x);
        assert_eq!(x, vec![-5.12, 0.5, 5.12]);
        let again = space.clamped(&x);
        assert_eq!(again, x);
    }

    #[test]
    fn test_contains_checks_dimension() {
        let space = SearchSpace::with_dimension(2).unwrap();
        assert!(space.contains(&[0.0, 0.0]));
        assert!(!space.contains(&[0.0, 0.0, 0.0]));
        assert!(!space.contains(&[6.0, 0.0]));
    }
}
