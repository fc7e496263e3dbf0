//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - calibration inputs (`Sample`, `CalibrationInput`)
//! - the fitted model shape (`ModelOrder`, `Coefficients`)
//! - fit outputs (`CoefficientResult`, `CalibrationFit`, `FitQuality`)
//! - presentation and demo settings (`ReportConfig`, `SyntheticConfig`)

pub mod types;

pub use types::*;
