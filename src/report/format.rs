//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the solver stays free of I/O
//! - output changes are localized

use serde::Serialize;

use crate::domain::{CalibrationFit, CalibrationInput, CoefficientResult, FitQuality, ModelOrder, SampleResidual};
use crate::error::{AppError, CalibrationError, EXIT_INPUT};

const NO_SUB_ZERO_WARNING: &str = "Warning: No temperatures below 0°C. Cubic term will be omitted.";

const SINGULAR_MESSAGE: &str =
    "Error: The matrix is singular and cannot be inverted. Please check your input data.";

/// Format the full calibration summary (dataset, coefficients, diagnostics, residuals).
pub fn format_calibration(input: &CalibrationInput, fit: &CalibrationFit, residuals: &[SampleResidual]) -> String {
    let mut out = String::new();
    let (t_min, t_max) = input.temperature_range();
    let order = fit.result.coefficients.order();

    out.push_str("=== cvd - Callendar-Van Dusen calibration ===\n");
    out.push_str(&format!(
        "Samples: n={} | T=[{t_min:.2}, {t_max:.2}] °C\n",
        input.samples().len()
    ));
    out.push_str(&format!("Model: {}\n", order.display_name()));
    if order == ModelOrder::Quadratic {
        out.push_str(NO_SUB_ZERO_WARNING);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format_coefficients(&fit.result));

    out.push_str("\nFit diagnostics:\n");
    out.push_str(&format_quality(&fit.quality, fit.result.r0));

    out.push_str("\nResiduals:\n");
    out.push_str(&format_table(residuals));

    out
}

/// The coefficient block, one value per line.
pub fn format_coefficients(result: &CoefficientResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("R0: {}\n", result.r0));
    out.push_str(&format!("Coefficient A: {:e}\n", result.coefficients.a()));
    out.push_str(&format!("Coefficient B: {:e}\n", result.coefficients.b()));
    if let Some(c) = result.coefficients.c() {
        out.push_str(&format!("Coefficient C: {c:e}\n"));
    }
    out
}

fn format_quality(quality: &FitQuality, r0: f64) -> String {
    format!(
        "- intercept: {:.9}\n- RMSE: {:.6} Ω | max |residual|: {:.6} Ω (n={})\n",
        quality.intercept,
        quality.rmse * r0,
        quality.max_abs_residual * r0,
        quality.n
    )
}

fn format_table(rows: &[SampleResidual]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>10} {:>14} {:>14} {:>12}\n",
        "temp_c", "r_obs_ohm", "r_fit_ohm", "residual"
    ));
    out.push_str(&format!("{:-<10} {:-<14} {:-<14} {:-<12}\n", "", "", "", ""));
    for r in rows {
        out.push_str(&format!(
            "{:>10.3} {:>14.6} {:>14.6} {:>12.6}\n",
            r.sample.temperature, r.sample.resistance, r.r_fit, r.residual
        ));
    }
    out
}

/// Diagnostic shown when the solver fails.
pub fn format_calibration_error(err: &CalibrationError) -> String {
    if err.is_singular() {
        format!("{SINGULAR_MESSAGE}\n({err})\n")
    } else {
        format!("Error: {err}\n")
    }
}

/// Side-by-side generating vs. recovered coefficients for demo runs.
pub fn format_comparison(truth: &CoefficientResult, fitted: &CoefficientResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<6} {:>16} {:>16} {:>12}\n", "coef", "generating", "fitted", "rel_err"));
    out.push_str(&format!("{:-<6} {:-<16} {:-<16} {:-<12}\n", "", "", "", ""));

    let mut row = |name: &str, expected: f64, actual: f64| {
        let rel = if expected != 0.0 {
            ((actual - expected) / expected).abs()
        } else {
            (actual - expected).abs()
        };
        out.push_str(&format!("{name:<6} {expected:>16.6e} {actual:>16.6e} {rel:>12.3e}\n"));
    };

    row("A", truth.coefficients.a(), fitted.coefficients.a());
    row("B", truth.coefficients.b(), fitted.coefficients.b());
    if let (Some(expected), Some(actual)) = (truth.coefficients.c(), fitted.coefficients.c()) {
        row("C", expected, actual);
    }

    out
}

/// Closing notice and credit block printed after every interactive or text run.
pub fn format_footer() -> String {
    let mut out = String::new();
    out.push_str("\nPlease copy or write the coefficient\n\n");
    out.push_str("Author: Mughni Yumashar\n");
    out.push_str("Contact: mughnimail@gmail.com\n");
    out.push_str("Any non-commercial usage shall include credit to the author.\n");
    out.push_str("Commercial usages are prohibited without consent from the author.\n");
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'a CoefficientResult,
    quality: &'a FitQuality,
    residuals: &'a [SampleResidual],
}

/// Pretty JSON of a successful fit (printed, never written to disk).
pub fn to_json(fit: &CalibrationFit, residuals: &[SampleResidual]) -> Result<String, AppError> {
    let report = JsonReport {
        result: &fit.result,
        quality: &fit.quality,
        residuals,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to serialize result: {e}")))
}
