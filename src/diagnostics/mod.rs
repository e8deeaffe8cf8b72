//! Diagnostics and statistics
//!
//! This module provides per-iteration statistics and the run-level best tracker.

pub mod tracker;

use serde::{Deserialize, Serialize};

use crate::population::population::Population;

/// Statistics for a single iteration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationStats {
    /// Iteration number
    pub iteration: usize,
    /// Best (lowest) fitness in this iteration
    pub best_fitness: f64,
    /// Worst (highest) fitness in this iteration
    pub worst_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Median fitness
    pub median_fitness: f64,
    /// Fitness standard deviation
    pub fitness_std: f64,
    /// Mean pairwise distance between positions
    pub diversity: f64,
}

impl IterationStats {
    /// Compute statistics from a population
    pub fn from_population(population: &Population) -> Self {
        let iteration = population.iteration();
        let mut fitnesses = population.fitness_values();

        if fitnesses.is_empty() {
            return Self {
                iteration,
                best_fitness: f64::INFINITY,
                worst_fitness: f64::NEG_INFINITY,
                mean_fitness: 0.0,
                median_fitness: 0.0,
                fitness_std: 0.0,
                diversity: 0.0,
            };
        }

        fitnesses.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = fitnesses.len();
        let median = if n % 2 == 0 {
            (fitnesses[n / 2 - 1] + fitnesses[n / 2]) / 2.0
        } else {
            fitnesses[n / 2]
        };

        Self {
            iteration,
            best_fitness: fitnesses[0],
            worst_fitness: fitnesses[n - 1],
            mean_fitness: population.mean_fitness().unwrap_or(0.0),
            median_fitness: median,
            fitness_std: population.fitness_std().unwrap_or(0.0),
            diversity: population.diversity(),
        }
    }
}

pub mod prelude {
    pub use super::tracker::*;
    pub use super::IterationStats;
}
