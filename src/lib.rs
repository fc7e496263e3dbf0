//! `cvd-calibration` library crate.
//!
//! Fits Callendar-Van Dusen coefficients (A, B and, with sub-zero samples, C)
//! for resistance temperature detectors from `(temperature, resistance)`
//! samples and the resistance at 0 °C.
//!
//! The binary (`cvd`) is a thin wrapper around this library so that the
//! solver is testable without spawning processes.
//!
//! ```
//! use cvd_calibration::{Sample, solve};
//!
//! let samples = [
//!     Sample::new(-50.0, 80.3),
//!     Sample::new(0.0, 100.0),
//!     Sample::new(50.0, 119.4),
//!     Sample::new(100.0, 138.5),
//! ];
//! let result = solve(&samples, 100.0).unwrap();
//! assert!(result.coefficients.c().is_some());
//! ```

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

pub use domain::{CalibrationFit, CalibrationInput, CoefficientResult, Coefficients, ModelOrder, Sample};
pub use error::{AppError, CalibrationError};
pub use fit::{fit, solve};
