//! Parameter schedules for deterministic control
//!
//! Schedules provide predetermined parameter values based on the iteration number.

/// Parameter schedule trait
///
/// Defines how a parameter changes over the course of a run.
pub trait ParameterSchedule: Send + Sync {
    /// Get the parameter value at a given iteration
    fn value_at(&self, iteration: usize, max_iterations: usize) -> f64;
}

/// Linear annealing: p(t) = p_start + (p_end - p_start) * t / T
///
/// Drives the Grey Wolf control parameter `a` from its start value to 0.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearAnnealing {
    /// Starting value
    pub start: f64,
    /// Ending value
    pub end: f64,
}

impl LinearAnnealing {
    /// Create a new linear annealing schedule
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Create a schedule that decreases from `start` to zero
    pub fn to_zero(start: f64) -> Self {
        Self::new(start, 0.0)
    }
}

impl ParameterSchedule for LinearAnnealing {
    fn value_at(&self, iteration: usize, max_iterations: usize) -> f64 {
        if max_iterations == 0 {
            return self.start;
        }
        let t = iteration.min(max_iterations) as f64 / max_iterations as f64;
        self.start + (self.end - self.start) * t
    }
}
