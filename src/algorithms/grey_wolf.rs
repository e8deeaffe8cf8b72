//! Grey Wolf Optimizer
//!
//! The three best wolves (alpha, beta, delta) of the previous population lead
//! the hunt. Per dimension a wolf either moves to the mean of the three
//! leader-guided estimates or takes a random walk scaled by the control
//! parameter `a`, which anneals linearly from its start value to 0.

use rand::Rng;

use crate::algorithms::traits::{OptimizerStrategy, StepContext, StepOutcome};
use crate::config::GwoConfig;
use crate::error::{ConfigError, EngineResult};
use crate::fitness::traits::ObjectiveFunction;
use crate::hyperparameter::schedules::{LinearAnnealing, ParameterSchedule};
use crate::population::population::Population;

/// Grey Wolf Optimizer
#[derive(Clone, Debug, PartialEq)]
pub struct GreyWolf {
    schedule: LinearAnnealing,
}

impl GreyWolf {
    /// Smallest pack with distinct alpha, beta and delta
    pub const MIN_POPULATION: usize = 3;

    /// Create with the initial value of `a`
    pub fn new(a: f64) -> Self {
        Self {
            schedule: LinearAnnealing::to_zero(a),
        }
    }

    /// Value of `a` used to produce `iteration`
    pub fn control(&self, iteration: usize, max_iterations: usize) -> f64 {
        self.schedule.value_at(iteration, max_iterations)
    }
}

impl Default for GreyWolf {
    fn default() -> Self {
        Self::from(&GwoConfig::default())
    }
}

impl From<&GwoConfig> for GreyWolf {
    fn from(config: &GwoConfig) -> Self {
        Self::new(config.a)
    }
}

impl OptimizerStrategy for GreyWolf {
    fn name(&self) -> &'static str {
        "GWO"
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
        if n < Self::MIN_POPULATION {
            return Err(ConfigError::PopulationSize {
                algorithm: "GWO",
                minimum: Self::MIN_POPULATION,
                actual: n,
            }
            .into());
        }

        let ranked = population.ranked_indices();
        let leaders = [
            &population[ranked[0]].position,
            &population[ranked[1]].position,
            &population[ranked[2]].position,
        ];
        let a = self.control(ctx.iteration, ctx.max_iterations);
        let range = ctx.space.bounds().range();

        let mut next = Population::with_capacity(n);
        for wolf in population {
            let mut position = Vec::with_capacity(wolf.dimension());
            for (d, &x) in wolf.position.iter().enumerate() {
                let r1: f64 = rng.gen();
                let r2: f64 = rng.gen();
                let big_a = 2.0 * a * r1 - a;
                let c = 2.0 * r2;

                let estimate = leaders
                    .iter()
                    .map(|leader| leader[d] - big_a * (c * leader[d] - x).abs())
                    .sum::<f64>()
                    / 3.0;

                let value = if rng.gen::<f64>() > 0.5 {
                    estimate
                } else {
                    x + a * (rng.gen::<f64>() - 0.5) * range
                };
                position.push(value);
            }
            ctx.space.clamp(&mut position);
            next.push(ctx.candidate(position)?);
        }

        Ok(StepOutcome::new(next))
    }

    fn control_parameter(&self, iteration: usize, max_iterations: usize) -> Option<f64> {
        Some(self.control(iteration, max_iterations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::fitness::benchmarks::Rastrigin;
    use crate::population::candidate::Candidate;
    use crate::space::search_space::SearchSpace;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_control_anneals_linearly() {
        let gwo = GreyWolf::default();
        assert_eq!(gwo.control(0, 50), 2.0);
        assert!((gwo.control(25, 50) - 1.0).abs() < 1e-12);
        assert_eq!(gwo.control(50, 50), 0.0);
        assert_eq!(gwo.control_parameter(10, 100), Some(gwo.control(10, 100)));
    }

    #[test]
    fn test_step_keeps_size_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let space = SearchSpace::default();
        let objective = Rastrigin::new();
        let gwo = GreyWolf::default();
        let mut pack = gwo.initialize(&space, &objective, 10, &mut rng).unwrap();

        for t in 1..=20 {
            let best = pack.best().unwrap().clone();
            let ctx = StepContext {
                space: &space,
                objective: &objective,
                iteration: t,
                max_iterations: 20,
                global_best: &best,
            };
            pack = gwo.step(&pack, &ctx, &mut rng).unwrap().population;
            assert_eq!(pack.len(), 10);
            assert!(pack.is_within(&space));
        }
    }

    #[test]
    fn test_final_iteration_collapses_onto_leaders() {
        // With a = 0 the random walk vanishes and every estimate equals the
        // leader coordinate, so all wolves land on the leaders' centroid
        let mut rng = StdRng::seed_from_u64(9);
        let space = SearchSpace::with_dimension(2).unwrap();
        let objective = Rastrigin::new();
        let gwo = GreyWolf::default();
        let pack = Population::from_candidates(vec![
            Candidate::evaluated(vec![0.0, 0.0], &objective),
            Candidate::evaluated(vec![1.0, 0.0], &objective),
            Candidate::evaluated(vec![0.0, 2.0], &objective),
            Candidate::evaluated(vec![4.0, 4.0], &objective),
        ]);
        let best = pack[0].clone();
        let ctx = StepContext {
            space: &space,
            objective: &objective,
            iteration: 30,
            max_iterations: 30,
            global_best: &best,
        };

        let next = gwo.step(&pack, &ctx, &mut rng).unwrap().population;
        let centroid = [1.0 / 3.0, 2.0 / 3.0];
        for wolf in &next {
            for d in 0..2 {
                let original = pack.iter().any(|w| w.position[d] == wolf.position[d]);
                let at_centroid = (wolf.position[d] - centroid[d]).abs() < 1e-12;
                assert!(original || at_centroid);
            }
        }
    }

    #[test]
    fn test_rejects_small_pack() {
        let mut rng = StdRng::seed_from_u64(1);
        let space = SearchSpace::with_dimension(2).unwrap();
        let objective = Rastrigin::new();
        let gwo = GreyWolf::default();
        let pack = gwo.initialize(&space, &objective, 2, &mut rng).unwrap();
        let best = pack.best().unwrap().clone();
        let ctx = StepContext {
            space: &space,
            objective: &objective,
            iteration: 1,
            max_iterations: 5,
            global_best: &best,
        };

        assert!(matches!(
            gwo.step(&pack, &ctx, &mut rng),
            Err(EngineError::Configuration(ConfigError::PopulationSize { minimum: 3, .. }))
        ));
    }
}
