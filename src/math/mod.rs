//! Numerical utilities: least squares through the normal equations.

pub mod ols;

pub use ols::*;
