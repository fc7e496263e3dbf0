//! Coefficient fitting.
//!
//! Responsibilities:
//!
//! - choose the model order from the samples
//! - build the design matrix and solve the normal equations
//! - classify degenerate data as a singular system

pub mod solver;

pub use solver::*;
