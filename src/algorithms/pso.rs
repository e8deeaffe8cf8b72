//! Particle Swarm Optimization
//!
//! Each particle remembers its own best position and is pulled toward it and
//! toward the swarm's best:
//!
//! ```text
//! v ← w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)
//! x ← clamp(x + v)
//! ```
//!
//! `r1` and `r2` are drawn per dimension. The swarm best is updated as soon as
//! a particle improves on it, so later particles in the same sweep already
//! follow the new best.

use rand::Rng;
use tracing::trace;

use crate::algorithms::traits::{ensure_finite, OptimizerStrategy, StepContext, StepOutcome};
use crate::config::PsoConfig;
use crate::error::EngineResult;
use crate::fitness::traits::ObjectiveFunction;
use crate::population::candidate::{Auxiliary, Candidate, ParticleState};
use crate::population::population::Population;
use crate::space::search_space::SearchSpace;

/// Particle Swarm Optimization
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSwarm {
    /// Inertia weight
    pub inertia: f64,
    /// Pull toward the particle's own best
    pub cognitive: f64,
    /// Pull toward the swarm's best
    pub social: f64,
}

impl ParticleSwarm {
    /// Create with explicit coefficients
    pub fn new(inertia: f64, cognitive: f64, social: f64) -> Self {
        Self {
            inertia,
            cognitive,
            social,
        }
    }

    fn particle(candidate: &Candidate) -> ParticleState {
        match candidate.particle() {
            Some(state) => state.clone(),
            None => ParticleState {
                velocity: vec![0.0; candidate.dimension()],
                best_position: candidate.position.clone(),
                best_fitness: candidate.fitness,
            },
        }
    }
}

impl Default for ParticleSwarm {
    fn default() -> Self {
        Self::from(&PsoConfig::default())
    }
}

impl From<&PsoConfig> for ParticleSwarm {
    fn from(config: &PsoConfig) -> Self {
        Self::new(config.w, config.c1, config.c2)
    }
}

impl OptimizerStrategy for ParticleSwarm {
    fn name(&self) -> &'static str {
        "PSO"
    }

    /// Random positions, zero velocities, personal best = start position
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
        let swarm: Population = Population::random(size, space, objective, rng)
            .into_iter()
            .map(|c| {
                let state = Self::particle(&c);
                c.with_aux(Auxiliary::Particle(state))
            })
            .collect();
        ensure_finite(&swarm)?;
        Ok(swarm)
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
        let mut global_position = ctx.global_best.position.clone();
        let mut global_fitness = ctx.global_best.fitness;
        let mut next = Population::with_capacity(population.len());

        for candidate in population {
            let mut state = Self::particle(candidate);
            let mut position = candidate.position.clone();

            for d in 0..position.len() {
                let r1: f64 = rng.gen();
                let r2: f64 = rng.gen();
                state.velocity[d] = self.inertia * state.velocity[d]
                    + self.cognitive * r1 * (state.best_position[d] - position[d])
                    + self.social * r2 * (global_position[d] - position[d]);
            }
            for (x, v) in position.iter_mut().zip(&state.velocity) {
                *x += v;
            }
            ctx.space.clamp(&mut position);

            let fitness = ctx.evaluate(&position)?;
            if fitness < state.best_fitness {
                state.best_position = position.clone();
                state.best_fitness = fitness;
                if fitness < global_fitness {
                    trace!(fitness, iteration = ctx.iteration, "swarm best improved");
                    global_position = position.clone();
                    global_fitness = fitness;
                }
            }

            next.push(Candidate::new(position, fitness).with_aux(Auxiliary::Particle(state)));
        }

        Ok(StepOutcome::new(next))
    }
}
