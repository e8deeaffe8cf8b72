//! # swarmlab
//!
//! Population-based metaheuristics for continuous minimization.
//!
//! Six algorithms share one engine: Particle Swarm Optimization, a Genetic
//! Algorithm, Differential Evolution, the Firefly Algorithm, the Bat Algorithm
//! and the Grey Wolf Optimizer. A run is driven one iteration at a time by a
//! [`RunController`](run::controller::RunController), which exposes immutable
//! snapshots suitable for animation.
//!
//! ## Core Concepts
//!
//! - **Search space**: a 2D or 3D hypercube, every coordinate within the same bounds
//! - **Strategies**: each algorithm maps population `t` to population `t + 1`
//! - **Injected randomness**: every draw flows through a seeded `rand::Rng`
//! - **Best tracking**: the run-level best and its history never get worse
//!
//! ## Quick Start
//!
//! ```rust
//! use swarmlab::prelude::*;
//!
//! let config = RunConfig::new(PsoConfig {
//!     num_particles: 10,
//!     dimensions: 2,
//!     ..Default::default()
//! })
//! .with_seed(42);
//!
//! let mut controller = RunController::new().configured(config)?;
//! let snapshot = controller.run_to_completion()?;
//!
//! assert_eq!(snapshot.iteration, 100);
//! assert!(snapshot.global_best.fitness <= snapshot.history[0]);
//! # Ok::<(), swarmlab::error::EngineError>(())
//! ```

pub mod algorithms;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod hyperparameter;
pub mod population;
pub mod run;
pub mod space;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::config::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::hyperparameter::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::run::prelude::*;
    pub use crate::space::prelude::*;
}
