//! Coefficient solver for the Callendar-Van Dusen model.
//!
//! Given samples `(T_i, R_i)` and the reference resistance `R0` we:
//! - normalize `r_i = R_i / R0`
//! - pick the model order from the data (any `T_i < 0` enables the cubic term)
//! - build the design matrix `[1, T, T², (T − 100)·T³·[T < 0]]`
//! - solve the normal equations and map `β` onto `A`, `B`, `C`
//!
//! `β0` is the fitted intercept. It is kept in [`FitQuality`] for diagnostics
//! but is not one of the named coefficients.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, info, info_span};

use crate::domain::{
    CalibrationFit, CalibrationInput, CoefficientResult, Coefficients, FitQuality, ModelOrder,
    Sample,
};
use crate::error::CalibrationError;
use crate::math::solve_normal_equations;
use crate::models::fill_design_row;

/// Validate the raw inputs and fit the coefficients.
pub fn solve(samples: &[Sample], r0: f64) -> Result<CoefficientResult, CalibrationError> {
    let input = CalibrationInput::new(samples.to_vec(), r0)?;
    Ok(fit(&input)?.result)
}

/// Fit the coefficients of a validated input, returning fit diagnostics too.
pub fn fit(input: &CalibrationInput) -> Result<CalibrationFit, CalibrationError> {
    let samples = input.samples();
    let order = input.model_order();
    let columns = order.column_count();

    let span = info_span!("cvd.fit", samples = samples.len(), columns);
    let _guard = span.enter();

    match order {
        ModelOrder::CubicBelowZero => {
            let below_zero = samples.iter().filter(|s| s.temperature < 0.0).count();
            info!(below_zero, "cubic term active for samples below 0 °C");
        }
        ModelOrder::Quadratic => {
            info!("no temperatures below 0 °C; cubic term omitted");
        }
    }

    // Identical rows cannot add rank, so this shortfall is certain before any numerics.
    let distinct_temperatures = input.distinct_temperatures();
    let singular = || CalibrationError::SingularMatrix {
        samples: samples.len(),
        distinct_temperatures,
        columns,
    };
    if distinct_temperatures < columns {
        return Err(singular());
    }

    let x = build_design_matrix(samples, order);
    let r = normalized_resistances(samples, input.r0());
    let column_overflow = (0..x.ncols()).any(|j| !x.column(j).norm().is_finite());
    if column_overflow || !r.norm().is_finite() {
        let (t_min, t_max) = input.temperature_range();
        return Err(CalibrationError::NumericOverflow { t_min, t_max });
    }

    let beta = solve_normal_equations(&x, &r).ok_or_else(singular)?;
    if beta.iter().any(|v| !v.is_finite()) {
        return Err(CalibrationError::NonFiniteCoefficients);
    }
    debug!(beta = ?beta.as_slice(), "normal equations solved");

    let coefficients = match order {
        ModelOrder::Quadratic => Coefficients::Quadratic {
            a: beta[1],
            b: beta[2],
        },
        ModelOrder::CubicBelowZero => Coefficients::CubicBelowZero {
            a: beta[1],
            b: beta[2],
            c: beta[3],
        },
    };

    Ok(CalibrationFit {
        result: CoefficientResult {
            r0: input.r0(),
            coefficients,
        },
        quality: fit_quality(&x, &r, &beta),
    })
}

/// Build the `n × k` design matrix, preserving sample order.
pub fn build_design_matrix(samples: &[Sample], order: ModelOrder) -> DMatrix<f64> {
    let k = order.column_count();
    let mut x = DMatrix::<f64>::zeros(samples.len(), k);
    let mut row = vec![0.0; k];

    for (i, s) in samples.iter().enumerate() {
        fill_design_row(order, s.temperature, &mut row);
        for (j, &v) in row.iter().enumerate() {
            x[(i, j)] = v;
        }
    }

    x
}

/// `R_i / R0` for every sample.
pub fn normalized_resistances(samples: &[Sample], r0: f64) -> DVector<f64> {
    DVector::from_iterator(samples.len(), samples.iter().map(|s| s.resistance / r0))
}

fn fit_quality(x: &DMatrix<f64>, r: &DVector<f64>, beta: &DVector<f64>) -> FitQuality {
    let residuals = r - x * beta;
    let n = residuals.len();
    let sse = residuals.norm_squared();
    let max_abs_residual = residuals.iter().fold(0.0_f64, |m, e| m.max(e.abs()));

    FitQuality {
        intercept: beta[0],
        sse,
        rmse: (sse / n as f64).sqrt(),
        max_abs_residual,
        n,
    }
}
