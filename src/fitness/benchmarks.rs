//! Benchmark objective functions
//!
//! Standard minimization benchmarks. Rastrigin is the engine's default.

use std::f64::consts::{E, PI};

use serde::{Deserialize, Serialize};

use crate::fitness::traits::{BenchmarkFunction, ObjectiveFunction};

/// Rastrigin function: f(x) = A·n + Σ(xᵢ² - A·cos(2πxᵢ))
///
/// Highly multimodal with many local minima. Optimum 0 at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rastrigin {
    amplitude: f64,
}

impl Rastrigin {
    /// Amplitude used by the standard definition
    pub const DEFAULT_AMPLITUDE: f64 = 10.0;

    /// Create the standard Rastrigin function (A = 10)
    pub fn new() -> Self {
        Self {
            amplitude: Self::DEFAULT_AMPLITUDE,
        }
    }

    /// Create with a custom amplitude
    pub fn with_amplitude(amplitude: f64) -> Self {
        Self { amplitude }
    }

    /// Amplitude `A`
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl Default for Rastrigin {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectiveFunction for Rastrigin {
    fn evaluate(&self, x: &[f64]) -> f64 {
        let a = self.amplitude;
        let n = x.len() as f64;
        a * n
            + x.iter()
                .map(|xi| xi * xi - a * (2.0 * PI * xi).cos())
                .sum::<f64>()
    }

    fn name(&self) -> &str {
        "Rastrigin"
    }
}

impl BenchmarkFunction for Rastrigin {
    fn bounds(&self) -> (f64, f64) {
        (-5.12, 5.12)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_solution(&self, dimension: usize) -> Vec<f64> {
        vec![0.0; dimension]
    }
}

/// Sphere function: f(x) = Σxᵢ²
///
/// Unimodal, convex, separable. Optimum at origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sphere;

impl Sphere {
    /// Create a new Sphere function
    pub fn new() -> Self {
        Self
    }
}

impl ObjectiveFunction for Sphere {
    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }

    fn name(&self) -> &str {
        "Sphere"
    }
}

impl BenchmarkFunction for Sphere {
    fn bounds(&self) -> (f64, f64) {
        (-5.12, 5.12)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_solution(&self, dimension: usize) -> Vec<f64> {
        vec![0.0; dimension]
    }
}

/// Ackley function
///
/// Nearly flat outer region with many local minima. Optimum at origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ackley {
    a: f64,
    b: f64,
    c: f64,
}

impl Ackley {
    /// Create a new Ackley function with default parameters
    pub fn new() -> Self {
        Self {
            a: 20.0,
            b: 0.2,
            c: 2.0 * PI,
        }
    }
}

impl Default for Ackley {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectiveFunction for Ackley {
    fn evaluate(&self, x: &[f64]) -> f64 {
        let n = x.len() as f64;
        let sum_sq = x.iter().map(|xi| xi * xi).sum::<f64>();
        let sum_cos = x.iter().map(|xi| (self.c * xi).cos()).sum::<f64>();

        -self.a * (-self.b * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + self.a + E
    }

    fn name(&self) -> &str {
        "Ackley"
    }
}

impl BenchmarkFunction for Ackley {
    fn bounds(&self) -> (f64, f64) {
        (-32.768, 32.768)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_solution(&self, dimension: usize) -> Vec<f64> {
        vec![0.0; dimension]
    }
}
