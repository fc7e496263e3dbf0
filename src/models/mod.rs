//! Callendar-Van Dusen model evaluation.
//!
//! Models are implemented as small, pure functions so that the solver and the
//! reporting code share one definition of the regressors.

pub mod model;

pub use model::*;
