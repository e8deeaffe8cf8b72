//! Candidate solution type
//!
//! This module provides the Candidate type that wraps a position with its
//! fitness and the algorithm-specific state that travels with it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::fitness::traits::ObjectiveFunction;

/// Particle memory carried by PSO candidates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleState {
    /// Current velocity
    pub velocity: Vec<f64>,
    /// Best position this particle has visited
    pub best_position: Vec<f64>,
    /// Fitness at `best_position`
    pub best_fitness: f64,
}

/// Echolocation state carried by BA candidates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatState {
    /// Current velocity
    pub velocity: Vec<f64>,
    /// Frequency drawn for the latest move
    pub frequency: f64,
    /// Probability of skipping the local random walk
    pub pulse_rate: f64,
    /// Acceptance probability and random-walk scale
    pub loudness: f64,
}

/// Algorithm-specific state of a candidate
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Auxiliary {
    /// Position and fitness only (GA, DE, FA, GWO)
    #[default]
    None,
    /// PSO particle
    Particle(ParticleState),
    /// BA bat
    Bat(BatState),
}

impl Auxiliary {
    /// True for candidates without auxiliary state
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A candidate solution
///
/// The fitness always corresponds to the current position: every constructor
/// that takes a position either evaluates it or is handed its known value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Decision vector
    pub position: Vec<f64>,
    /// Objective value at `position` (lower is better)
    pub fitness: f64,
    /// Algorithm-specific state
    #[serde(default, skip_serializing_if = "Auxiliary::is_none")]
    pub aux: Auxiliary,
}

impl Candidate {
    /// Create a candidate with a known fitness
    pub fn new(position: Vec<f64>, fitness: f64) -> Self {
        Self {
            position,
            fitness,
            aux: Auxiliary::None,
        }
    }

    /// Evaluate `position` and wrap it
    pub fn evaluated<O: ObjectiveFunction + ?Sized>(position: Vec<f64>, objective: &O) -> Self {
        let fitness = objective.evaluate(&position);
        Self::new(position, fitness)
    }

    /// Attach auxiliary state
    pub fn with_aux(mut self, aux: Auxiliary) -> Self {
        self.aux = aux;
        self
    }

    /// Number of coordinates
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// Strictly lower fitness than `other`
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness < other.fitness
    }

    /// Position and fitness are all finite
    pub fn is_finite(&self) -> bool {
        self.fitness.is_finite() && self.position.iter().all(|v| v.is_finite())
    }

    /// Particle state, if this is a PSO candidate
    pub fn particle(&self) -> Option<&ParticleState> {
        match &self.aux {
            Auxiliary::Particle(state) => Some(state),
            _ => None,
        }
    }

    /// Bat state, if this is a BA candidate
    pub fn bat(&self) -> Option<&BatState> {
        match &self.aux {
            Auxiliary::Bat(state) => Some(state),
            _ => None,
        }
    }

    /// Euclidean distance between the positions of two candidates
    pub fn distance(&self, other: &Self) -> f64 {
        squared_distance(&self.position, &other.position).sqrt()
    }
}

impl PartialOrd for Candidate {
    /// Orders by fitness, lower first
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.fitness.partial_cmp(&other.fitness)
    }
}

/// Squared Euclidean distance between two positions
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
