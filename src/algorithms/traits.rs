//! Optimizer strategy traits
//!
//! Every algorithm plugs into the run controller through [`OptimizerStrategy`]:
//! it builds an initial population once, then maps population `t` to
//! population `t + 1` one step at a time.

use rand::Rng;

use crate::error::{EngineError, EngineResult};
use crate::fitness::traits::ObjectiveFunction;
use crate::population::candidate::Candidate;
use crate::population::population::Population;
use crate::space::search_space::SearchSpace;

/// Read-only context handed to a single step
pub struct StepContext<'a, O: ObjectiveFunction + ?Sized> {
    /// Search space positions must stay in
    pub space: &'a SearchSpace,
    /// Objective being minimized
    pub objective: &'a O,
    /// Index of the iteration this step produces (1-based)
    pub iteration: usize,
    /// Iteration budget of the run
    pub max_iterations: usize,
    /// Best candidate seen so far in the run
    pub global_best: &'a Candidate,
}

impl<'a, O: ObjectiveFunction + ?Sized> StepContext<'a, O> {
    /// Evaluate a position, rejecting non-finite results
    pub fn evaluate(&self, position: &[f64]) -> EngineResult<f64> {
        let fitness = self.objective.evaluate(position);
        if fitness.is_finite() {
            Ok(fitness)
        } else {
            Err(EngineError::Numerical(format!(
                "{} returned {} at {:?} during iteration {}",
                self.objective.name(),
                fitness,
                position,
                self.iteration
            )))
        }
    }

    /// Evaluate a position and wrap it into a candidate
    pub fn candidate(&self, position: Vec<f64>) -> EngineResult<Candidate> {
        let fitness = self.evaluate(&position)?;
        Ok(Candidate::new(position, fitness))
    }
}

/// Result of one step
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Population for the next iteration
    pub population: Population,
    /// Best candidate observed during the step, if it may not survive into
    /// `population` (a firefly that moved again after improving)
    pub best_seen: Option<Candidate>,
}

impl StepOutcome {
    /// Outcome whose population already holds everything worth tracking
    pub fn new(population: Population) -> Self {
        Self {
            population,
            best_seen: None,
        }
    }

    /// Attach a mid-step best
    pub fn with_best_seen(mut self, best_seen: Option<Candidate>) -> Self {
        self.best_seen = best_seen;
        self
    }
}

/// A population-based optimization algorithm
pub trait OptimizerStrategy {
    /// Short display name
    fn name(&self) -> &'static str;

    /// Build and evaluate the initial population
    ///
    /// The default samples every coordinate uniformly within the bounds.
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
        let population = Population::random(size, space, objective, rng);
        ensure_finite(&population)?;
        Ok(population)
    }

    /// Produce the next population from `population`
    ///
    /// Implementations never mutate their input, keep the population size
    /// and leave every position inside `ctx.space`.
    fn step<O, R>(
        &self,
        population: &Population,
        ctx: &StepContext<'_, O>,
        rng: &mut R,
    ) -> EngineResult<StepOutcome>
    where
        O: ObjectiveFunction + ?Sized,
        R: Rng;

    /// Current value of the algorithm's control parameter, if it has one
    fn control_parameter(&self, _iteration: usize, _max_iterations: usize) -> Option<f64> {
        None
    }
}

/// Fail with a numerical error if any candidate is non-finite
pub fn ensure_finite(population: &Population) -> EngineResult<()> {
    match population.iter().position(|c| !c.is_finite()) {
        None => Ok(()),
        Some(index) => Err(EngineError::Numerical(format!(
            "candidate {} is not finite: {:?}",
            index, population[index]
        ))),
    }
}
