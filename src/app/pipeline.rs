//! Shared "calibration pipeline" used by every front-end.
//!
//! validate -> fit -> residuals
//!
//! The interactive, CSV and demo commands then only differ in where samples
//! come from and how results are presented.

use crate::domain::{CalibrationFit, CalibrationInput, ReportConfig, Sample, SampleResidual};
use crate::error::{AppError, CalibrationError};
use crate::report::{compute_residuals, format_calibration, format_calibration_error};

/// All computed outputs of a successful calibration.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: CalibrationInput,
    pub fit: CalibrationFit,
    pub residuals: Vec<SampleResidual>,
}

/// Result of one calibration attempt.
///
/// A rejected input or singular system is an expected outcome that the
/// front-ends display; only infrastructure problems are `AppError`s.
#[derive(Debug, Clone)]
pub enum Outcome {
    Fitted(RunOutput),
    Failed(CalibrationError),
}

/// Validate the samples, fit the coefficients and compute residuals.
pub fn run_calibration(samples: Vec<Sample>, r0: f64) -> Result<Outcome, AppError> {
    let input = match CalibrationInput::new(samples, r0) {
        Ok(input) => input,
        Err(err) => return Ok(Outcome::Failed(err)),
    };

    let fit = match crate::fit::fit(&input) {
        Ok(fit) => fit,
        Err(err) => return Ok(Outcome::Failed(err)),
    };

    let residuals = compute_residuals(input.samples(), &fit)?;
    Ok(Outcome::Fitted(RunOutput {
        input,
        fit,
        residuals,
    }))
}

/// Text rendering of an outcome: summary (+ plot) or the error diagnostic.
pub fn render_text(outcome: &Outcome, config: &ReportConfig) -> String {
    match outcome {
        Outcome::Fitted(run) => {
            let mut out = format_calibration(&run.input, &run.fit, &run.residuals);
            if config.plot {
                out.push('\n');
                out.push_str(&crate::plot::render_ascii_plot(
                    run.input.samples(),
                    &run.fit,
                    config.plot_width,
                    config.plot_height,
                ));
            }
            out
        }
        Outcome::Failed(err) => format_calibration_error(err),
    }
}
