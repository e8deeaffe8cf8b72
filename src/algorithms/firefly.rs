//! Firefly Algorithm
//!
//! Every firefly moves toward each brighter (lower fitness) firefly with
//! attractiveness `β0·exp(−γ·r²)` plus a uniform random kick scaled by `α`.
//! Moves happen in place over a working copy, so a firefly that moved earlier
//! in the sweep is compared with its updated brightness.

use rand::Rng;

use crate::algorithms::traits::{OptimizerStrategy, StepContext, StepOutcome};
use crate::config::FaConfig;
use crate::error::EngineResult;
use crate::fitness::traits::ObjectiveFunction;
use crate::population::candidate::{squared_distance, Candidate};
use crate::population::population::Population;

/// Firefly Algorithm
#[derive(Clone, Debug, PartialEq)]
pub struct Firefly {
    /// Randomization scale
    pub alpha: f64,
    /// Attractiveness at distance zero
    pub beta0: f64,
    /// Light absorption coefficient
    pub gamma: f64,
}

impl Firefly {
    /// Create with explicit coefficients
    pub fn new(alpha: f64, beta0: f64, gamma: f64) -> Self {
        Self {
            alpha,
            beta0,
            gamma,
        }
    }

    /// Attractiveness at squared distance `r2`
    pub fn attractiveness(&self, r2: f64) -> f64 {
        self.beta0 * (-self.gamma * r2).exp()
    }
}

impl Default for Firefly {
    fn default() -> Self {
        Self::from(&FaConfig::default())
    }
}

impl From<&FaConfig> for Firefly {
    fn from(config: &FaConfig) -> Self {
        Self::new(config.alpha, config.beta0, config.gamma)
    }
}

impl OptimizerStrategy for Firefly {
    fn name(&self) -> &'static str {
        "FA"
    }

    fn step<O, R>(
        &self,
        population: &Population,
        ctx: &StepContext<'_, O>,
        rng: &mut R,
    ) -> EngineResult<StepOutcome>
    where
        O: ObjectiveFunction + ?Sized,
        R: Rng,
    {
        let n = population.len();
        let mut positions = population.positions();
        let mut brightness = population.fitness_values();
        let mut best_fitness = ctx.global_best.fitness;
        let mut best_seen = None;

        for i in 0..n {
            for j in 0..n {
                if brightness[j] >= brightness[i] {
                    continue;
                }

                let beta = self.attractiveness(squared_distance(&positions[i], &positions[j]));
                for d in 0..positions[i].len() {
                    let toward = positions[j][d] - positions[i][d];
                    let kick = self.alpha * rng.gen_range(-1.0..1.0);
                    let moved = positions[i][d] + beta * toward + kick;
                    positions[i][d] = ctx.space.bounds().clamp(moved);
                }

                brightness[i] = ctx.evaluate(&positions[i])?;
                if brightness[i] < best_fitness {
                    best_fitness = brightness[i];
                    best_seen = Some(Candidate::new(positions[i].clone(), brightness[i]));
                }
            }
        }

        let next = positions
            .into_iter()
            .zip(brightness)
            .map(|(position, fitness)| Candidate::new(position, fitness))
            .collect();

        Ok(StepOutcome::new(next).with_best_seen(best_seen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::{Rastrigin, Sphere};
    use crate::space::search_space::SearchSpace;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_attractiveness() {
        let fa = Firefly::new(0.5, 1.0, 1.0);
        assert_eq!(fa.attractiveness(0.0), 1.0);
        assert!((fa.attractiveness(1.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert_eq!(Firefly::new(0.5, 1.0, 0.0).attractiveness(100.0), 1.0);
    }

    #[test]
    fn test_brightest_firefly_does_not_move() {
        let mut rng = StdRng::seed_from_u64(42);
        let space = SearchSpace::with_dimension(2).unwrap();
        let fa = Firefly::default();
        let pop = Population::from_candidates(vec![
            Candidate::evaluated(vec![0.0, 0.0], &Sphere),
            Candidate::evaluated(vec![2.0, 2.0], &Sphere),
            Candidate::evaluated(vec![-3.0, 1.0], &Sphere),
        ]);
        let best = pop[0].clone();
        let ctx = StepContext {
            space: &space,
            objective: &Sphere,
            iteration: 1,
            max_iterations: 10,
            global_best: &best,
        };

        let next = fa.step(&pop, &ctx, &mut rng).unwrap().population;
        assert_eq!(next[0], pop[0]);
        assert_ne!(next[1].position, pop[1].position);
    }

    #[test]
    fn test_no_randomness_pulls_toward_brighter() {
        let mut rng = StdRng::seed_from_u64(42);
        let space = SearchSpace::with_dimension(2).unwrap();
        let fa = Firefly::new(0.0, 1.0, 0.0);
        let pop = Population::from_candidates(vec![
            Candidate::evaluated(vec![0.0, 0.0], &Sphere),
            Candidate::evaluated(vec![2.0, 2.0], &Sphere),
        ]);
        let best = pop[0].clone();
        let ctx = StepContext {
            space: &space,
            objective: &Sphere,
            iteration: 1,
            max_iterations: 10,
            global_best: &best,
        };

        // β = 1 without noise lands exactly on the brighter firefly
        let next = fa.step(&pop, &ctx, &mut rng).unwrap().population;
        assert_eq!(next[1].position, vec![0.0, 0.0]);
        assert_eq!(next[1].fitness, 0.0);
    }

    #[test]
    fn test_comparisons_use_brightness_updated_in_sweep() {
        let mut rng = StdRng::seed_from_u64(42);
        let space = SearchSpace::with_dimension(2).unwrap();
        let fa = Firefly::new(0.0, 1.0, 0.0);
        let pop = Population::from_candidates(vec![
            Candidate::evaluated(vec![3.0, 0.0], &Sphere),
            Candidate::evaluated(vec![0.0, 0.0], &Sphere),
            Candidate::evaluated(vec![2.0, 0.0], &Sphere),
        ]);
        let best = pop[1].clone();
        let ctx = StepContext {
            space: &space,
            objective: &Sphere,
            iteration: 1,
            max_iterations: 10,
            global_best: &best,
        };

        // Firefly 0 reaches the origin first, after which (2, 0) is no longer brighter
        let next = fa.step(&pop, &ctx, &mut rng).unwrap().population;
        assert_eq!(next[0].position, vec![0.0, 0.0]);
        assert_eq!(next[0].fitness, 0.0);
        assert_eq!(next[1], pop[1]);
        assert_eq!(next[2].position, vec![0.0, 0.0]);
    }

    #[test]
    fn test_step_reports_mid_sweep_best() {
        let mut rng = StdRng::seed_from_u64(7);
        let space = SearchSpace::default();
        let objective = Rastrigin::new();
        let fa = Firefly::default();
        let pop = fa.initialize(&space, &objective, 20, &mut rng).unwrap();
        let best = pop.best().unwrap().clone();
        let ctx = StepContext {
            space: &space,
            objective: &objective,
            iteration: 1,
            max_iterations: 10,
            global_best: &best,
        };

        let outcome = fa.step(&pop, &ctx, &mut rng).unwrap();
        assert_eq!(outcome.population.len(), 20);
        assert!(outcome.population.is_within(&space));
        if let Some(seen) = outcome.best_seen {
            assert!(seen.fitness < best.fitness);
            assert_eq!(objective.evaluate(&seen.position), seen.fitness);
            assert!(seen.fitness <= outcome.population.best().unwrap().fitness);
        }
    }
}
