//! Genetic Algorithm
//!
//! Generational GA over real-valued genomes:
//! - fitness-proportional (roulette) selection of N parents
//! - single-point crossover on consecutive parent pairs
//! - per-gene additive uniform mutation in [-1, 1), clamped to the bounds
//!
//! The offspring replace the whole population; there is no elitism, so the
//! best fitness of a generation may get worse. The run-level best is kept by
//! the tracker.

use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

use crate::algorithms::traits::{OptimizerStrategy, StepContext, StepOutcome};
use crate::config::GaConfig;
use crate::error::{EngineError, EngineResult};
use crate::fitness::traits::ObjectiveFunction;
use crate::population::population::Population;

/// Keeps roulette weights finite when a fitness is exactly zero
const WEIGHT_EPSILON: f64 = 1e-10;

/// Generational Genetic Algorithm
#[derive(Clone, Debug, PartialEq)]
pub struct GeneticAlgorithm {
    /// Probability that a parent pair is recombined
    pub crossover_rate: f64,
    /// Probability that a single gene is perturbed
    pub mutation_rate: f64,
}

impl GeneticAlgorithm {
    /// Create with explicit rates
    pub fn new(crossover_rate: f64, mutation_rate: f64) -> Self {
        Self {
            crossover_rate,
            mutation_rate,
        }
    }

    /// Roulette weights for a minimization problem
    ///
    /// Each weight is `1 / (f + offset + ε)` where the offset shifts negative
    /// fitness values to be non-negative.
    pub fn selection_weights(fitness: &[f64]) -> Vec<f64> {
        let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let offset = if min < 0.0 { -min } else { 0.0 };
        fitness
            .iter()
            .map(|f| 1.0 / (f + offset + WEIGHT_EPSILON))
            .collect()
    }

    fn select_parents<R: Rng>(&self, population: &Population, rng: &mut R) -> Vec<usize> {
        let n = population.len();
        let weights = Self::selection_weights(&population.fitness_values());
        match WeightedIndex::new(&weights) {
            Ok(dist) => (0..n).map(|_| dist.sample(rng)).collect(),
            Err(_) => (0..n).map(|_| rng.gen_range(0..n)).collect(),
        }
    }

    fn crossover<R: Rng>(
        &self,
        first: &[f64],
        second: &[f64],
        rng: &mut R,
    ) -> (Vec<f64>, Vec<f64>) {
        if rng.gen::<f64>() < self.crossover_rate {
            let point = rng.gen_range(0..first.len());
            let mut child1 = first[..point].to_vec();
            child1.extend_from_slice(&second[point..]);
            let mut child2 = second[..point].to_vec();
            child2.extend_from_slice(&first[point..]);
            (child1, child2)
        } else {
            (first.to_vec(), second.to_vec())
        }
    }

    fn mutate<R: Rng>(&self, genes: &mut [f64], rng: &mut R) {
        for gene in genes.iter_mut() {
            if rng.gen::<f64>() < self.mutation_rate {
                *gene += rng.gen_range(-1.0..1.0);
            }
        }
    }
}

impl Default for GeneticAlgorithm {
    fn default() -> Self {
        Self::from(&GaConfig::default())
    }
}

impl From<&GaConfig> for GeneticAlgorithm {
    fn from(config: &GaConfig) -> Self {
        Self::new(config.crossover_rate, config.mutation_rate)
    }
}

impl OptimizerStrategy for GeneticAlgorithm {
    fn name(&self) -> &'static str {
        "GA"
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
        if n == 0 {
            return Err(EngineError::EmptyPopulation);
        }

        let parents = self.select_parents(population, rng);

        // An odd trailing parent is paired with the first one
        let mut offspring = Vec::with_capacity(n + 1);
        for i in (0..n).step_by(2) {
            let first = &population[parents[i]].position;
            let second = &population[parents.get(i + 1).copied().unwrap_or(parents[0])].position;
            let (child1, child2) = self.crossover(first, second, rng);
            offspring.push(child1);
            offspring.push(child2);
        }
        offspring.truncate(n);

        let mut next = Population::with_capacity(n);
        for mut genes in offspring {
            self.mutate(&mut genes, rng);
            ctx.space.clamp(&mut genes);
            next.push(ctx.candidate(genes)?);
        }

        Ok(StepOutcome::new(next))
    }
}
