//! Frame-paced playback of a run
//!
//! The animator owns a [`RunController`] and a [`Scheduler`]. Starting a run
//! schedules a tick; every tick performs one step and schedules the next
//! while the run is still going. Stopping cancels the pending tick, so no
//! further step happens after `stop()` returns.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::RunConfig;
use crate::error::EngineResult;
use crate::fitness::benchmarks::Rastrigin;
use crate::fitness::traits::ObjectiveFunction;
use crate::run::controller::{RunController, RunStatus, Snapshot};
use crate::run::scheduler::{CancellationToken, Scheduler, VirtualTimer};

/// Delay between two animation frames
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Request to perform the next iteration of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Run the tick belongs to
    pub run_id: u64,
}

/// Drives a controller one iteration per frame
pub struct Animator<O: ObjectiveFunction = Rastrigin, S: Scheduler<Tick> = VirtualTimer<Tick>> {
    controller: RunController<O>,
    scheduler: S,
    frame_delay: Duration,
    pending: Option<CancellationToken>,
}

impl<O: ObjectiveFunction> Animator<O, VirtualTimer<Tick>> {
    /// Animate `controller` on a virtual clock
    pub fn new(controller: RunController<O>) -> Self {
        Self::with_scheduler(controller, VirtualTimer::new())
    }
}

impl<O: ObjectiveFunction, S: Scheduler<Tick>> Animator<O, S> {
    /// Animate `controller` with a custom scheduler
    pub fn with_scheduler(controller: RunController<O>, scheduler: S) -> Self {
        Self {
            controller,
            scheduler,
            frame_delay: DEFAULT_FRAME_DELAY,
            pending: None,
        }
    }

    /// Set the delay between frames
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Delay between frames
    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// The animated controller
    pub fn controller(&self) -> &RunController<O> {
        &self.controller
    }

    /// The scheduler
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Whether a tick is waiting to fire
    pub fn has_pending_tick(&self) -> bool {
        self.pending.as_ref().map_or(false, |t| !t.is_cancelled())
    }

    /// Reconfigure the controller (rejected while running)
    pub fn configure(&mut self, config: RunConfig) -> EngineResult<()> {
        self.controller.configure(config)
    }

    /// Start a run and schedule its first frame
    pub fn start(&mut self) -> EngineResult<()> {
        if self.controller.status() == RunStatus::Running {
            return Ok(());
        }
        self.cancel_pending();
        self.controller.start()?;
        self.schedule_tick();
        Ok(())
    }

    /// Stop the run and cancel its pending frame
    pub fn stop(&mut self) -> bool {
        self.cancel_pending();
        self.controller.stop()
    }

    /// Let `elapsed` time pass, running every frame that falls due
    ///
    /// Returns the number of iterations performed. A step error stops the
    /// animation and is returned.
    pub fn advance(&mut self, elapsed: Duration) -> EngineResult<usize> {
        let deadline = self.scheduler.now() + elapsed;
        let mut steps = 0;

        while let Some(tick) = self.scheduler.poll(deadline) {
            self.pending = None;
            if tick.run_id != self.controller.run_id() {
                trace!(tick = tick.run_id, run = self.controller.run_id(), "stale tick ignored");
                continue;
            }
            let status = self.controller.step()?;
            steps += 1;
            if status == RunStatus::Running {
                self.schedule_tick();
            }
        }

        Ok(steps)
    }

    /// Start a run and play it to the end on the scheduler's clock
    pub fn run_to_completion(&mut self) -> EngineResult<Snapshot> {
        self.start()?;
        while self.has_pending_tick() {
            self.advance(self.frame_delay)?;
        }
        self.snapshot()
            .ok_or_else(|| crate::error::EngineError::InvalidState("no run to report".to_string()))
    }

    /// Snapshot of the animated run
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.controller.snapshot()
    }

    /// Give back the controller
    pub fn into_controller(self) -> RunController<O> {
        self.controller
    }

    fn schedule_tick(&mut self) {
        let tick = Tick {
            run_id: self.controller.run_id(),
        };
        let token = self.scheduler.schedule(tick, self.frame_delay);
        debug!(run = tick.run_id, token = token.id(), "frame scheduled");
        self.pending = Some(token);
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(&token);
            debug!(token = token.id(), "frame cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PsoConfig;

    fn animator(iterations: usize) -> Animator {
        let config = RunConfig::new(PsoConfig {
            num_particles: 5,
            dimensions: 2,
            max_iterations: iterations,
            ..Default::default()
        })
        .with_seed(42);
        Animator::new(RunController::new().configured(config).unwrap())
    }

    #[test]
    fn test_one_step_per_frame() {
        let mut animator = animator(10);
        animator.start().unwrap();
        assert_eq!(animator.controller().iteration(), 0);

        assert_eq!(animator.advance(Duration::from_millis(99)).unwrap(), 0);
        assert_eq!(animator.advance(Duration::from_millis(1)).unwrap(), 1);
        assert_eq!(animator.advance(Duration::from_millis(350)).unwrap(), 3);
        assert_eq!(animator.controller().iteration(), 4);
    }

    #[test]
    fn test_stop_cancels_next_frame() {
        let mut animator = animator(10);
        animator.start().unwrap();
        animator.advance(DEFAULT_FRAME_DELAY * 2).unwrap();
        assert!(animator.has_pending_tick());

        assert!(animator.stop());
        assert!(!animator.has_pending_tick());
        assert_eq!(animator.scheduler().pending(), 0);
        assert_eq!(animator.advance(Duration::from_secs(10)).unwrap(), 0);
        assert_eq!(animator.controller().iteration(), 2);
    }

    #[test]
    fn test_frames_stop_at_max_iterations() {
        let mut animator = animator(3);
        animator.start().unwrap();
        assert_eq!(animator.advance(Duration::from_secs(10)).unwrap(), 3);
        assert!(!animator.has_pending_tick());
        assert_eq!(animator.controller().status(), RunStatus::Stopped);
    }

    #[test]
    fn test_restart_drops_old_frames() {
        let mut animator = animator(10);
        animator.start().unwrap();
        animator.advance(DEFAULT_FRAME_DELAY).unwrap();
        animator.stop();
        animator.start().unwrap();

        assert_eq!(animator.scheduler().pending(), 1);
        assert_eq!(animator.advance(DEFAULT_FRAME_DELAY).unwrap(), 1);
        assert_eq!(animator.controller().run_id(), 2);
        assert_eq!(animator.controller().iteration(), 1);
    }

    #[test]
    fn test_run_to_completion_matches_controller() {
        let mut animated = animator(8);
        let snapshot = animated.run_to_completion().unwrap();

        let mut direct = animator(8).into_controller();
        let expected = direct.run_to_completion().unwrap();

        assert_eq!(snapshot.population, expected.population);
        assert_eq!(snapshot.history, expected.history);
        assert_eq!(snapshot.iteration, 8);
    }

    #[test]
    fn test_zero_frame_delay() {
        let mut animator = animator(5).with_frame_delay(Duration::ZERO);
        let snapshot = animator.run_to_completion().unwrap();
        assert_eq!(snapshot.iteration, 5);
        assert_eq!(animator.scheduler().now(), Duration::ZERO);
    }
}
