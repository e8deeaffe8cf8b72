//! Bat Algorithm
//!
//! Bats fly with a frequency-tuned velocity relative to the best bat and, when
//! a random draw exceeds their pulse rate, take a local random walk scaled by
//! loudness. A move is kept only if it improves the bat and passes a loudness
//! check. Every iteration loudness decays (`A ← α·A`) and the pulse rate
//! contracts toward 1 (`r ← 1 − (1 − r)·γ`).

use rand::Rng;

use crate::algorithms::traits::{ensure_finite, OptimizerStrategy, StepContext, StepOutcome};
use crate::config::BaConfig;
use crate::error::EngineResult;
use crate::fitness::traits::ObjectiveFunction;
use crate::population::candidate::{Auxiliary, BatState, Candidate};
use crate::population::population::Population;
use crate::space::search_space::SearchSpace;

/// Bat Algorithm
#[derive(Clone, Debug, PartialEq)]
pub struct BatAlgorithm {
    /// Lower end of the frequency range
    pub frequency_min: f64,
    /// Upper end of the frequency range
    pub frequency_max: f64,
    /// Initial pulse rate of every bat
    pub pulse_rate: f64,
    /// Initial loudness of every bat
    pub loudness: f64,
    /// Loudness decay factor
    pub alpha: f64,
    /// Pulse-rate contraction factor
    pub gamma: f64,
}

impl BatAlgorithm {
    fn frequency<R: Rng>(&self, rng: &mut R) -> f64 {
        self.frequency_min + (self.frequency_max - self.frequency_min) * rng.gen::<f64>()
    }

    fn bat(&self, candidate: &Candidate) -> BatState {
        match candidate.bat() {
            Some(state) => state.clone(),
            None => BatState {
                velocity: vec![0.0; candidate.dimension()],
                frequency: self.frequency_min,
                pulse_rate: self.pulse_rate,
                loudness: self.loudness,
            },
        }
    }

    /// Pulse rate after one iteration
    pub fn next_pulse_rate(&self, pulse_rate: f64) -> f64 {
        1.0 - (1.0 - pulse_rate) * self.gamma
    }

    /// Loudness after one iteration
    pub fn next_loudness(&self, loudness: f64) -> f64 {
        self.alpha * loudness
    }
}

impl Default for BatAlgorithm {
    fn default() -> Self {
        Self::from(&BaConfig::default())
    }
}

impl From<&BaConfig> for BatAlgorithm {
    fn from(config: &BaConfig) -> Self {
        Self {
            frequency_min: config.frequency_min,
            frequency_max: config.frequency_max,
            pulse_rate: config.pulse_rate,
            loudness: config.loudness,
            alpha: config.alpha,
            gamma: config.gamma,
        }
    }
}

impl OptimizerStrategy for BatAlgorithm {
    fn name(&self) -> &'static str {
        "BA"
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
        let mut colony = Population::with_capacity(size);
        for _ in 0..size {
            let position = space.sample(rng);
            let state = BatState {
                velocity: vec![0.0; space.dimension()],
                frequency: self.frequency(rng),
                pulse_rate: self.pulse_rate,
                loudness: self.loudness,
            };
            colony.push(Candidate::evaluated(position, objective).with_aux(Auxiliary::Bat(state)));
        }
        ensure_finite(&colony)?;
        Ok(colony)
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
        let best = &ctx.global_best.position;
        let mut next = Population::with_capacity(population.len());

        for candidate in population {
            let state = self.bat(candidate);
            let frequency = self.frequency(rng);

            let velocity: Vec<f64> = state
                .velocity
                .iter()
                .zip(&candidate.position)
                .zip(best)
                .map(|((v, x), b)| v + frequency * (x - b))
                .collect();
            let mut position: Vec<f64> = candidate
                .position
                .iter()
                .zip(&velocity)
                .map(|(x, v)| x + v)
                .collect();
            ctx.space.clamp(&mut position);

            if rng.gen::<f64>() > state.pulse_rate {
                for x in position.iter_mut() {
                    *x += state.loudness * (rng.gen::<f64>() - 0.5);
                }
                ctx.space.clamp(&mut position);
            }

            let fitness = ctx.evaluate(&position)?;
            let accepted = fitness < candidate.fitness && rng.gen::<f64>() < state.loudness;

            let pulse_rate = self.next_pulse_rate(state.pulse_rate);
            let loudness = self.next_loudness(state.loudness);
            let bat = if accepted {
                Candidate::new(position, fitness).with_aux(Auxiliary::Bat(BatState {
                    velocity,
                    frequency,
                    pulse_rate,
                    loudness,
                }))
            } else {
                Candidate::new(candidate.position.clone(), candidate.fitness).with_aux(
                    Auxiliary::Bat(BatState {
                        velocity: state.velocity,
                        frequency,
                        pulse_rate,
                        loudness,
                    }),
                )
            };
            next.push(bat);
        }

        Ok(StepOutcome::new(next))
    }
}
