//! Run-level best tracking
//!
//! The tracker remembers the best candidate ever observed in a run and the
//! best-so-far fitness after every iteration. Because it only ever replaces
//! its best with a strictly better candidate, the history is non-increasing
//! even for algorithms whose population best can regress (GA, GWO).

use serde::{Deserialize, Serialize};

use crate::population::candidate::Candidate;
use crate::population::population::Population;

/// Best-so-far candidate and fitness history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestTracker {
    best: Candidate,
    history: Vec<f64>,
    last_improvement: usize,
}

impl BestTracker {
    /// Start tracking from the initial population
    ///
    /// Returns `None` for an empty population.
    pub fn new(initial: &Population) -> Option<Self> {
        let best = initial.best()?.clone();
        let history = vec![best.fitness];
        Some(Self {
            best,
            history,
            last_improvement: 0,
        })
    }

    /// Record one iteration
    ///
    /// `best_seen` carries a candidate observed mid-step that may not be in
    /// `population`. Returns true if the global best improved.
    pub fn observe(&mut self, population: &Population, best_seen: Option<&Candidate>) -> bool {
        let mut improved = false;
        for candidate in population.best().into_iter().chain(best_seen) {
            if candidate.is_better_than(&self.best) {
                self.best = candidate.clone();
                improved = true;
            }
        }

        self.history.push(self.best.fitness);
        if improved {
            self.last_improvement = self.iterations();
        }
        improved
    }

    /// Best candidate observed so far
    pub fn best(&self) -> &Candidate {
        &self.best
    }

    /// Fitness of the best candidate
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness
    }

    /// Best-so-far fitness, starting with the initial population
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Number of observed iterations (excluding initialization)
    pub fn iterations(&self) -> usize {
        self.history.len() - 1
    }

    /// Iterations since the best last improved
    pub fn stagnation(&self) -> usize {
        self.iterations() - self.last_improvement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(fitness: &[f64]) -> Population {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| Candidate::new(vec![i as f64, 0.0], f))
            .collect()
    }

    #[test]
    fn test_tracker_starts_with_initial_best() {
        let tracker = BestTracker::new(&population(&[3.0, 1.0, 2.0])).unwrap();
        assert_eq!(tracker.best_fitness(), 1.0);
        assert_eq!(tracker.best().position, vec![1.0, 0.0]);
        assert_eq!(tracker.history(), &[1.0]);
        assert_eq!(tracker.iterations(), 0);
    }

    #[test]
    fn test_tracker_empty_population() {
        assert!(BestTracker::new(&Population::new()).is_none());
    }

    #[test]
    fn test_tracker_history_never_increases() {
        let mut tracker = BestTracker::new(&population(&[5.0, 4.0])).unwrap();

        assert!(tracker.observe(&population(&[3.0, 6.0]), None));
        assert!(!tracker.observe(&population(&[7.0, 8.0]), None));
        assert!(tracker.observe(&population(&[2.5]), None));

        assert_eq!(tracker.history(), &[4.0, 3.0, 3.0, 2.5]);
        assert_eq!(tracker.best_fitness(), 2.5);
    }

    #[test]
    fn test_tracker_keeps_first_on_ties() {
        let mut tracker = BestTracker::new(&population(&[1.0])).unwrap();
        let tie = Population::from_candidates(vec![Candidate::new(vec![9.0, 9.0], 1.0)]);
        assert!(!tracker.observe(&tie, None));
        assert_eq!(tracker.best().position, vec![0.0, 0.0]);
    }

    #[test]
    fn test_tracker_uses_mid_step_best() {
        let mut tracker = BestTracker::new(&population(&[5.0])).unwrap();
        let transient = Candidate::new(vec![0.5, 0.5], 0.5);

        assert!(tracker.observe(&population(&[4.0]), Some(&transient)));
        assert_eq!(tracker.best(), &transient);
        assert_eq!(tracker.history(), &[5.0, 0.5]);
    }

    #[test]
    fn test_tracker_stagnation() {
        let mut tracker = BestTracker::new(&population(&[5.0])).unwrap();
        tracker.observe(&population(&[4.0]), None);
        tracker.observe(&population(&[4.5]), None);
        tracker.observe(&population(&[6.0]), None);
        assert_eq!(tracker.iterations(), 3);
        assert_eq!(tracker.stagnation(), 2);
    }
}
