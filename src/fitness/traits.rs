//! Objective traits
//!
//! This module defines the objective evaluation traits. All objectives are
//! minimized: lower values are better.

/// Scalar objective evaluated on a position
///
/// Implementations must be pure: the same position always yields the same
/// value. The engine treats a non-finite result as a numeric divergence.
pub trait ObjectiveFunction {
    /// Evaluate the objective at `x`
    fn evaluate(&self, x: &[f64]) -> f64;

    /// Human readable name
    fn name(&self) -> &str {
        "custom"
    }
}

/// Any `Fn(&[f64]) -> f64` closure is an objective
impl<F> ObjectiveFunction for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

/// Objective with a known optimum, used for benchmarking and tests
pub trait BenchmarkFunction: ObjectiveFunction {
    /// Conventional search domain (min, max) for every coordinate
    fn bounds(&self) -> (f64, f64);

    /// Optimal (minimum) objective value
    fn optimal_fitness(&self) -> f64;

    /// Location of the optimum in `dimension` coordinates
    fn optimal_solution(&self, dimension: usize) -> Vec<f64>;
}
