//! Run controller
//!
//! Owns the configuration, the random source and the single current
//! population of a run, and moves it through the state machine
//!
//! ```text
//! Idle --start--> Running --step (i < max)--> Running
//!                 Running --step (i == max)--> Stopped(MaxIterations)
//!                 Running --stop--> Stopped(Requested)
//!                 Running --non-finite step--> Stopped(Diverged)
//!                 Stopped --start--> Running (fresh run)
//! ```
//!
//! A step is atomic: its population is published only after the whole
//! iteration succeeded, so a rejected step leaves the last valid state intact.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::algorithms::traits::{ensure_finite, OptimizerStrategy, StepContext, StepOutcome};
use crate::algorithms::Optimizer;
use crate::config::{Algorithm, RunConfig};
use crate::diagnostics::tracker::BestTracker;
use crate::diagnostics::IterationStats;
use crate::error::{EngineError, EngineResult};
use crate::fitness::benchmarks::Rastrigin;
use crate::fitness::traits::ObjectiveFunction;
use crate::population::candidate::Candidate;
use crate::population::population::Population;
use crate::space::search_space::SearchSpace;

/// Lifecycle state of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// Configured but never started
    Idle,
    /// Accepting steps
    Running,
    /// Finished, see [`StopReason`]
    Stopped,
}

/// Why a run stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// The iteration budget was used up
    MaxIterations,
    /// `stop()` was called
    Requested,
    /// A step produced a non-finite fitness or position
    Diverged,
}

/// Immutable view of a run after a completed iteration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Identifier of the run, incremented on every start
    pub run_id: u64,
    /// Algorithm driving the run
    pub algorithm: Algorithm,
    /// Last completed iteration (0 = initial population)
    pub iteration: usize,
    /// Iteration budget
    pub max_iterations: usize,
    /// Lifecycle state
    pub status: RunStatus,
    /// Set once the run stopped
    pub stop_reason: Option<StopReason>,
    /// Current population
    pub population: Population,
    /// Best candidate seen so far
    pub global_best: Candidate,
    /// Best-so-far fitness per iteration
    pub history: Vec<f64>,
    /// Iterations since the global best last improved
    pub stagnation: usize,
    /// Statistics of the current population
    pub stats: IterationStats,
    /// Value of the algorithm's control parameter at this iteration (GWO `a`)
    pub control_parameter: Option<f64>,
}

struct RunState {
    optimizer: Optimizer,
    space: SearchSpace,
    max_iterations: usize,
    population: Population,
    tracker: BestTracker,
    rng: StdRng,
}

impl RunState {
    fn iteration(&self) -> usize {
        self.population.iteration()
    }

    /// Reject outcomes that break population invariants
    fn check(&self, outcome: &StepOutcome) -> EngineResult<()> {
        let expected = self.population.len();
        if outcome.population.len() != expected {
            return Err(EngineError::InvalidState(format!(
                "{} returned {} candidates, expected {}",
                self.optimizer.name(),
                outcome.population.len(),
                expected
            )));
        }
        ensure_finite(&outcome.population)?;
        if let Some(seen) = &outcome.best_seen {
            if !seen.is_finite() {
                return Err(EngineError::Numerical(format!(
                    "mid-step best is not finite: {:?}",
                    seen
                )));
            }
        }
        if !outcome.population.is_within(&self.space) {
            return Err(EngineError::InvalidState(format!(
                "{} left the search space",
                self.optimizer.name()
            )));
        }
        Ok(())
    }
}

/// Drives one optimization run at a time
pub struct RunController<O: ObjectiveFunction = Rastrigin> {
    objective: O,
    config: RunConfig,
    status: RunStatus,
    stop_reason: Option<StopReason>,
    run_id: u64,
    state: Option<RunState>,
}

impl RunController<Rastrigin> {
    /// Controller minimizing Rastrigin with the default configuration
    pub fn new() -> Self {
        Self::with_objective(Rastrigin::new())
    }
}

impl Default for RunController<Rastrigin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ObjectiveFunction> RunController<O> {
    /// Controller minimizing a custom objective
    pub fn with_objective(objective: O) -> Self {
        Self {
            objective,
            config: RunConfig::default(),
            status: RunStatus::Idle,
            stop_reason: None,
            run_id: 0,
            state: None,
        }
    }

    /// Builder form of [`RunController::configure`]
    pub fn configured(mut self, config: RunConfig) -> EngineResult<Self> {
        self.configure(config)?;
        Ok(self)
    }

    /// Replace the configuration used by the next `start()`
    pub fn configure(&mut self, config: RunConfig) -> EngineResult<()> {
        if self.status == RunStatus::Running {
            return Err(EngineError::InvalidState(
                "cannot reconfigure a running optimization".to_string(),
            ));
        }
        config.validate()?;
        debug!(algorithm = %config.algorithm.algorithm(), "configured");
        self.config = config;
        Ok(())
    }

    /// Start a fresh run from the stored configuration
    ///
    /// No-op while already running. On error the status is unchanged.
    pub fn start(&mut self) -> EngineResult<()> {
        if self.status == RunStatus::Running {
            return Ok(());
        }

        self.config.validate()?;
        let space = self.config.search_space()?;
        let optimizer = Optimizer::from(&self.config.algorithm);
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let population = optimizer.initialize(
            &space,
            &self.objective,
            self.config.algorithm.population_size(),
            &mut rng,
        )?;
        let tracker = BestTracker::new(&population).ok_or(EngineError::EmptyPopulation)?;

        self.run_id += 1;
        info!(
            run = self.run_id,
            algorithm = optimizer.name(),
            population = population.len(),
            dimensions = space.dimension(),
            seed = ?self.config.seed,
            best = tracker.best_fitness(),
            "run started"
        );

        self.state = Some(RunState {
            optimizer,
            space,
            max_iterations: self.config.algorithm.max_iterations(),
            population,
            tracker,
            rng,
        });
        self.status = RunStatus::Running;
        self.stop_reason = None;
        Ok(())
    }

    /// Stop a running optimization
    ///
    /// Returns true if the run was running.
    pub fn stop(&mut self) -> bool {
        if self.status != RunStatus::Running {
            return false;
        }
        info!(run = self.run_id, iteration = self.iteration(), "run stopped on request");
        self.finish(StopReason::Requested);
        true
    }

    /// Execute one iteration
    ///
    /// Does nothing unless running. A step that produces a non-finite value
    /// stops the run with [`StopReason::Diverged`] and returns the error.
    pub fn step(&mut self) -> EngineResult<RunStatus> {
        if self.status != RunStatus::Running {
            return Ok(self.status);
        }

        let state = self
            .state
            .as_mut()
            .ok_or_else(|| EngineError::InvalidState("running without a run state".to_string()))?;

        if state.iteration() >= state.max_iterations {
            self.finish(StopReason::MaxIterations);
            return Ok(self.status);
        }

        let iteration = state.iteration() + 1;
        let result = {
            let ctx = StepContext {
                space: &state.space,
                objective: &self.objective,
                iteration,
                max_iterations: state.max_iterations,
                global_best: state.tracker.best(),
            };
            state
                .optimizer
                .step(&state.population, &ctx, &mut state.rng)
                .and_then(|outcome| state.check(&outcome).map(|_| outcome))
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(run = self.run_id, iteration, error = %err, "step rejected");
                self.finish(StopReason::Diverged);
                return Err(err);
            }
        };

        state.population = outcome.population.at_iteration(iteration);
        let improved = state
            .tracker
            .observe(&state.population, outcome.best_seen.as_ref());
        debug!(
            run = self.run_id,
            iteration,
            best = state.tracker.best_fitness(),
            improved,
            "iteration complete"
        );

        if iteration >= state.max_iterations {
            info!(
                run = self.run_id,
                iterations = iteration,
                best = state.tracker.best_fitness(),
                "run finished"
            );
            self.finish(StopReason::MaxIterations);
        }
        Ok(self.status)
    }

    /// Start and step until the run stops
    pub fn run_to_completion(&mut self) -> EngineResult<Snapshot> {
        self.start()?;
        while self.step()? == RunStatus::Running {}
        self.snapshot()
            .ok_or_else(|| EngineError::InvalidState("no run to report".to_string()))
    }

    fn finish(&mut self, reason: StopReason) {
        self.status = RunStatus::Stopped;
        self.stop_reason = Some(reason);
    }

    /// Immutable view of the current run, `None` before the first start
    pub fn snapshot(&self) -> Option<Snapshot> {
        let state = self.state.as_ref()?;
        let iteration = state.iteration();
        Some(Snapshot {
            run_id: self.run_id,
            algorithm: state.optimizer.algorithm(),
            iteration,
            max_iterations: state.max_iterations,
            status: self.status,
            stop_reason: self.stop_reason,
            population: state.population.clone(),
            global_best: state.tracker.best().clone(),
            history: state.tracker.history().to_vec(),
            stagnation: state.tracker.stagnation(),
            stats: IterationStats::from_population(&state.population),
            control_parameter: state
                .optimizer
                .control_parameter(iteration, state.max_iterations),
        })
    }

    /// Lifecycle state
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Why the last run stopped
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Stored configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Objective being minimized
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Identifier of the current run (0 before the first start)
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Last completed iteration
    pub fn iteration(&self) -> usize {
        self.state.as_ref().map_or(0, RunState::iteration)
    }

    /// Current population
    pub fn population(&self) -> Option<&Population> {
        self.state.as_ref().map(|s| &s.population)
    }

    /// Best candidate seen in the current run
    pub fn global_best(&self) -> Option<&Candidate> {
        self.state.as_ref().map(|s| s.tracker.best())
    }

    /// Best-so-far fitness per iteration
    pub fn history(&self) -> &[f64] {
        self.state.as_ref().map_or(&[][..], |s| s.tracker.history())
    }
}
