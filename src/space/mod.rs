//! Search space definition
//!
//! This module provides the bounds and dimensionality of the decision vector.

pub mod bounds;
pub mod search_space;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::search_space::*;
}
