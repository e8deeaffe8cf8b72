//! Run lifecycle
//!
//! This module provides the run controller, its snapshots and frame-paced
//! playback on top of a scheduler.

pub mod animator;
pub mod controller;
pub mod scheduler;

pub mod prelude {
    pub use super::animator::*;
    pub use super::controller::*;
    pub use super::scheduler::*;
}
