//! Error types.
//!
//! Two layers:
//!
//! - [`CalibrationError`]: what the solver and its input boundary can report.
//! - [`AppError`]: what the binary reports, carrying a process exit code.

use thiserror::Error;

/// Exit code for bad input, usage and I/O problems.
pub const EXIT_INPUT: u8 = 2;

/// Exit code for estimation failures (singular system, non-finite coefficients).
pub const EXIT_ESTIMATION: u8 = 4;

/// Failures of the coefficient solver and of input validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// No samples were supplied.
    #[error("no calibration samples supplied")]
    EmptySamples,

    /// A sample holds NaN or an infinite value.
    #[error("sample {index} is not finite (temperature={temperature}, resistance={resistance})")]
    NonFiniteSample {
        /// Zero-based position in the input sequence.
        index: usize,
        temperature: f64,
        resistance: f64,
    },

    /// R0 is zero, negative or not finite.
    #[error("reference resistance R0 must be a positive finite number (got {value})")]
    InvalidReferenceResistance { value: f64 },

    /// The normal matrix cannot be inverted for this data.
    #[error(
        "singular normal matrix: {samples} sample(s) with {distinct_temperatures} distinct temperature(s) cannot determine {columns} coefficients"
    )]
    SingularMatrix {
        samples: usize,
        distinct_temperatures: usize,
        columns: usize,
    },

    /// Regressors or normalized resistances exceed the `f64` range.
    #[error(
        "samples are too large to fit: design values overflow (temperature span [{t_min}, {t_max}] °C)"
    )]
    NumericOverflow { t_min: f64, t_max: f64 },

    /// The solve completed but produced NaN or infinite coefficients.
    #[error("least-squares solve produced non-finite coefficients")]
    NonFiniteCoefficients,
}

impl CalibrationError {
    /// True for failures of the estimation itself (as opposed to rejected input).
    pub fn is_estimation_failure(&self) -> bool {
        matches!(
            self,
            CalibrationError::SingularMatrix { .. }
                | CalibrationError::NumericOverflow { .. }
                | CalibrationError::NonFiniteCoefficients
        )
    }

    /// True when the normal matrix could not be inverted.
    pub fn is_singular(&self) -> bool {
        matches!(self, CalibrationError::SingularMatrix { .. })
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CalibrationError> for AppError {
    fn from(err: CalibrationError) -> Self {
        let code = if err.is_estimation_failure() {
            EXIT_ESTIMATION
        } else {
            EXIT_INPUT
        };
        AppError::new(code, format!("Calibration failed: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_errors_map_to_exit_codes() {
        let singular = CalibrationError::SingularMatrix {
            samples: 2,
            distinct_temperatures: 2,
            columns: 3,
        };
        assert_eq!(AppError::from(singular).exit_code(), EXIT_ESTIMATION);

        let bad_r0 = CalibrationError::InvalidReferenceResistance { value: 0.0 };
        assert_eq!(AppError::from(bad_r0).exit_code(), EXIT_INPUT);
    }

    #[test]
    fn singular_message_names_the_shortfall() {
        let err = CalibrationError::SingularMatrix {
            samples: 2,
            distinct_temperatures: 2,
            columns: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 sample(s)"), "{msg}");
        assert!(msg.contains("3 coefficients"), "{msg}");
        assert!(err.is_singular());
    }
}
