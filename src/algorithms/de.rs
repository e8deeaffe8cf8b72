//! Differential Evolution (DE/rand/1/bin)
//!
//! For every target `x_i` three distinct donors `a`, `b`, `c` (all different
//! from `i`) build a mutant `c + F·(a − b)`. Binomial crossover mixes mutant
//! and target, with one forced dimension so the trial always differs in at
//! least one coordinate. The trial replaces the target only if it is strictly
//! better, so the best fitness never gets worse.

use rand::seq::index;
use rand::Rng;

use crate::algorithms::traits::{OptimizerStrategy, StepContext, StepOutcome};
use crate::config::DeConfig;
use crate::error::{ConfigError, EngineResult};
use crate::fitness::traits::ObjectiveFunction;
use crate::population::candidate::Candidate;
use crate::population::population::Population;

/// Differential Evolution
#[derive(Clone, Debug, PartialEq)]
pub struct DifferentialEvolution {
    /// Differential weight F
    pub mutation_factor: f64,
    /// Binomial crossover rate CR
    pub crossover_rate: f64,
}

impl DifferentialEvolution {
    /// Smallest population with three donors besides the target
    pub const MIN_POPULATION: usize = 4;

    /// Create with explicit F and CR
    pub fn new(mutation_factor: f64, crossover_rate: f64) -> Self {
        Self {
            mutation_factor,
            crossover_rate,
        }
    }

    /// Three distinct indices in `0..n`, none equal to `target`
    fn donors<R: Rng>(rng: &mut R, n: usize, target: usize) -> [usize; 3] {
        let picked = index::sample(rng, n - 1, 3);
        let shift = |k: usize| if k >= target { k + 1 } else { k };
        [
            shift(picked.index(0)),
            shift(picked.index(1)),
            shift(picked.index(2)),
        ]
    }
}

impl Default for DifferentialEvolution {
    fn default() -> Self {
        Self::from(&DeConfig::default())
    }
}

impl From<&DeConfig> for DifferentialEvolution {
    fn from(config: &DeConfig) -> Self {
        Self::new(config.mutation_factor, config.crossover_rate)
    }
}

impl OptimizerStrategy for DifferentialEvolution {
    fn name(&self) -> &'static str {
        "DE"
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
                algorithm: "DE",
                minimum: Self::MIN_POPULATION,
                actual: n,
            }
            .into());
        }

        let mut next = Population::with_capacity(n);
        for (i, target) in population.iter().enumerate() {
            let [a, b, c] = Self::donors(rng, n, i);
            let (xa, xb, xc) = (
                &population[a].position,
                &population[b].position,
                &population[c].position,
            );

            let dimension = target.dimension();
            let forced = rng.gen_range(0..dimension);
            let mut trial = Vec::with_capacity(dimension);
            for d in 0..dimension {
                let r: f64 = rng.gen();
                if r < self.crossover_rate || d == forced {
                    trial.push(xc[d] + self.mutation_factor * (xa[d] - xb[d]));
                } else {
                    trial.push(target.position[d]);
                }
            }
            ctx.space.clamp(&mut trial);

            let fitness = ctx.evaluate(&trial)?;
            if fitness < target.fitness {
                next.push(Candidate::new(trial, fitness));
            } else {
                next.push(target.clone());
            }
        }

        Ok(StepOutcome::new(next))
    }
}
