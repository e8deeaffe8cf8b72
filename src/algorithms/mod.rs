//! Population-based optimizers
//!
//! This module provides the six metaheuristics and the [`Optimizer`] enum that
//! dispatches between them from a validated configuration.

pub mod bat;
pub mod de;
pub mod firefly;
pub mod ga;
pub mod grey_wolf;
pub mod pso;
pub mod traits;

use rand::Rng;

use crate::config::{Algorithm, AlgorithmConfig};
use crate::error::EngineResult;
use crate::fitness::traits::ObjectiveFunction;
use crate::population::population::Population;
use crate::space::search_space::SearchSpace;

use self::bat::BatAlgorithm;
use self::de::DifferentialEvolution;
use self::firefly::Firefly;
use self::ga::GeneticAlgorithm;
use self::grey_wolf::GreyWolf;
use self::pso::ParticleSwarm;
use self::traits::{OptimizerStrategy, StepContext, StepOutcome};

/// One of the six strategies, selected at configuration time
#[derive(Clone, Debug, PartialEq)]
pub enum Optimizer {
    /// Particle Swarm Optimization
    Pso(ParticleSwarm),
    /// Genetic Algorithm
    Ga(GeneticAlgorithm),
    /// Differential Evolution
    De(DifferentialEvolution),
    /// Firefly Algorithm
    Fa(Firefly),
    /// Bat Algorithm
    Ba(BatAlgorithm),
    /// Grey Wolf Optimizer
    Gwo(GreyWolf),
}

impl Optimizer {
    /// Which algorithm this is
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Pso(_) => Algorithm::Pso,
            Self::Ga(_) => Algorithm::Ga,
            Self::De(_) => Algorithm::De,
            Self::Fa(_) => Algorithm::Fa,
            Self::Ba(_) => Algorithm::Ba,
            Self::Gwo(_) => Algorithm::Gwo,
        }
    }
}

impl From<&AlgorithmConfig> for Optimizer {
    fn from(config: &AlgorithmConfig) -> Self {
        match config {
            AlgorithmConfig::Pso(c) => Self::Pso(c.into()),
            AlgorithmConfig::Ga(c) => Self::Ga(c.into()),
            AlgorithmConfig::De(c) => Self::De(c.into()),
            AlgorithmConfig::Fa(c) => Self::Fa(c.into()),
            AlgorithmConfig::Ba(c) => Self::Ba(c.into()),
            AlgorithmConfig::Gwo(c) => Self::Gwo(c.into()),
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $strategy:ident => $body:expr) => {
        match $self {
            Optimizer::Pso($strategy) => $body,
            Optimizer::Ga($strategy) => $body,
            Optimizer::De($strategy) => $body,
            Optimizer::Fa($strategy) => $body,
            Optimizer::Ba($strategy) => $body,
            Optimizer::Gwo($strategy) => $body,
        }
    };
}

impl OptimizerStrategy for Optimizer {
    fn name(&self) -> &'static str {
        dispatch!(self, s => s.name())
    }

    fn initialize<O, R>(
        &self,
        space: &SearchSpace,
        objective: &O,
        size: usize,
        rng: &mut R,
    ) -> EngineResult<Population>
    where
        O: ObjectiveFunction + ?Sized,
        R: Rng,
    {
        dispatch!(self, s => s.initialize(space, objective, size, rng))
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
        dispatch!(self, s => s.step(population, ctx, rng))
    }

    fn control_parameter(&self, iteration: usize, max_iterations: usize) -> Option<f64> {
        dispatch!(self, s => s.control_parameter(iteration, max_iterations))
    }
}

pub mod prelude {
    pub use super::bat::*;
    pub use super::de::*;
    pub use super::firefly::*;
    pub use super::ga::*;
    pub use super::grey_wolf::*;
    pub use super::pso::*;
    pub use super::traits::*;
    pub use super::Optimizer;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::Rastrigin;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_optimizer_from_config() {
        for algorithm in Algorithm::ALL {
            let optimizer = Optimizer::from(&AlgorithmConfig::default_for(algorithm));
            assert_eq!(optimizer.algorithm(), algorithm);
            assert_eq!(optimizer.name(), algorithm.name());
        }
    }

    #[test]
    fn test_only_grey_wolf_has_control_parameter() {
        for algorithm in Algorithm::ALL {
            let optimizer = Optimizer::from(&AlgorithmConfig::default_for(algorithm));
            let control = optimizer.control_parameter(0, 100);
            if algorithm == Algorithm::Gwo {
                assert_eq!(control, Some(2.0));
            } else {
                assert_eq!(control, None);
            }
        }
    }

    #[test]
    fn test_every_optimizer_steps() {
        let space = SearchSpace::with_dimension(2).unwrap();
        let objective = Rastrigin::new();
        for algorithm in Algorithm::ALL {
            let mut rng = StdRng::seed_from_u64(11);
            let optimizer = Optimizer::from(&AlgorithmConfig::default_for(algorithm));
            let pop = optimizer.initialize(&space, &objective, 6, &mut rng).unwrap();
            let best = pop.best().unwrap().clone();
            let ctx = StepContext {
                space: &space,
                objective: &objective,
                iteration: 1,
                max_iterations: 10,
                global_best: &best,
            };
            let outcome = optimizer.step(&pop, &ctx, &mut rng).unwrap();
            assert_eq!(outcome.population.len(), 6, "{}", algorithm);
            assert!(outcome.population.is_within(&space), "{}", algorithm);
        }
    }
}
