//! Population type
//!
//! This module provides the Population container type.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fitness::traits::ObjectiveFunction;
use crate::population::candidate::Candidate;
use crate::space::search_space::SearchSpace;

fn by_fitness(a: &Candidate, b: &Candidate) -> Ordering {
    a.fitness.partial_cmp(&b.fitness).unwrap_or(Ordering::Equal)
}

/// A population of candidates
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// The candidates in this population
    candidates: Vec<Candidate>,
    /// Iteration this population belongs to
    iteration: usize,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            candidates: Vec::with_capacity(capacity),
            iteration: 0,
        }
    }

    /// Create a population from a vector of candidates
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            iteration: 0,
        }
    }

    /// Sample `size` uniform positions and evaluate them
    pub fn random<O, R>(size: usize, space: &SearchSpace, objective: &O, rng: &mut R) -> Self
    where
        O: ObjectiveFunction + ?Sized,
        R: Rng + ?Sized,
    {
        let candidates = (0..size)
            .map(|_| Candidate::evaluated(space.sample(rng), objective))
            .collect();
        Self::from_candidates(candidates)
    }

    /// Get the iteration index
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Set the iteration index
    pub fn set_iteration(&mut self, iteration: usize) {
        self.iteration = iteration;
    }

    /// Builder form of [`Population::set_iteration`]
    pub fn at_iteration(mut self, iteration: usize) -> Self {
        self.iteration = iteration;
        self
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Get a candidate by index
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Add a candidate
    pub fn push(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    /// Get an iterator over the candidates
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Get the underlying slice of candidates
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Best (lowest fitness) candidate, first on ties
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.iter().min_by(|a, b| by_fitness(a, b))
    }

    /// Index of the best candidate, first on ties
    pub fn best_index(&self) -> Option<usize> {
        self.candidates
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| by_fitness(a, b))
            .map(|(i, _)| i)
    }

    /// Worst (highest fitness) candidate
    pub fn worst(&self) -> Option<&Candidate> {
        self.candidates.iter().max_by(|a, b| by_fitness(a, b))
    }

    /// Indices sorted by fitness, best first (stable on ties)
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.candidates.len()).collect();
        indices.sort_by(|&a, &b| by_fitness(&self.candidates[a], &self.candidates[b]));
        indices
    }

    /// Fitness values in population order
    pub fn fitness_values(&self) -> Vec<f64> {
        self.candidates.iter().map(|c| c.fitness).collect()
    }

    /// Positions in population order
    pub fn positions(&self) -> Vec<Vec<f64>> {
        self.candidates.iter().map(|c| c.position.clone()).collect()
    }

    /// Every position and fitness is finite
    pub fn is_finite(&self) -> bool {
        self.candidates.iter().all(Candidate::is_finite)
    }

    /// Every position lies inside the search space
    pub fn is_within(&self, space: &SearchSpace) -> bool {
        self.candidates.iter().all(|c| space.contains(&c.position))
    }

    /// Compute mean fitness
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.candidates.is_empty() {
            None
        } else {
            Some(self.candidates.iter().map(|c| c.fitness).sum::<f64>() / self.len() as f64)
        }
    }

    /// Compute fitness standard deviation
    pub fn fitness_std(&self) -> Option<f64> {
        let mean = self.mean_fitness()?;
        if self.len() < 2 {
            return None;
        }
        let variance = self
            .candidates
            .iter()
            .map(|c| (c.fitness - mean).powi(2))
            .sum::<f64>()
            / (self.len() - 1) as f64;
        Some(variance.sqrt())
    }

    /// Compute population diversity (average pairwise distance)
    pub fn diversity(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }

        let mut total_distance = 0.0;
        let mut count = 0;

        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                total_distance += self.candidates[i].distance(&self.candidates[j]);
                count += 1;
            }
        }

        total_distance / count as f64
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Candidate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.candidates[index]
    }
}

impl IntoIterator for Population {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

impl FromIterator<Candidate> for Population {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::from_candidates(iter.into_iter().collect())
    }
}
