//! Deterministic parameter control
//!
//! Parameters that change according to a predetermined schedule over the
//! iteration budget of a run.

pub mod schedules;

pub mod prelude {
    pub use super::schedules::*;
}
