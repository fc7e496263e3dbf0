//! Model evaluation for the two Callendar-Van Dusen forms.
//!
//! The solver relies on two primitive operations:
//! - build a design row for a given temperature (for the least-squares fit)
//! - evaluate the fitted relation at a temperature (for residuals/plots)

use crate::domain::{CoefficientResult, Coefficients, ModelOrder};

/// Reference temperature of the sub-zero cubic term, in °C.
const CUBIC_PIVOT: f64 = 100.0;

/// Piecewise cubic regressor: `(t − 100)·t³` below 0 °C, exactly zero otherwise.
pub fn cubic_term(t: f64) -> f64 {
    if t < 0.0 {
        (t - CUBIC_PIVOT) * t.powi(3)
    } else {
        0.0
    }
}

/// Fill a design row for the given model order.
///
/// The row includes the constant term first (intercept).
///
/// # Panics
/// Panics if `out` is shorter than `order.column_count()`.
pub fn fill_design_row(order: ModelOrder, t: f64, out: &mut [f64]) {
    out[0] = 1.0;
    out[1] = t;
    out[2] = t * t;
    if order == ModelOrder::CubicBelowZero {
        out[3] = cubic_term(t);
    }
}

/// Fitted normalized resistance `r(t)` including the fitted intercept.
pub fn predict_ratio(coefficients: &Coefficients, intercept: f64, t: f64) -> f64 {
    let base = intercept + coefficients.a() * t + coefficients.b() * t * t;
    match coefficients.c() {
        Some(c) => base + c * cubic_term(t),
        None => base,
    }
}

/// Ideal CVD resistance `R0·(1 + A·t + B·t² + C·(t − 100)·t³)` for a result.
pub fn resistance_at(result: &CoefficientResult, t: f64) -> f64 {
    result.r0 * predict_ratio(&result.coefficients, 1.0, t)
}
