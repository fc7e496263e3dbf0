//! Reporting utilities: residuals and formatted terminal output.

use crate::domain::{CalibrationFit, Sample, SampleResidual};
use crate::error::{AppError, EXIT_ESTIMATION};
use crate::models::predict_ratio;

pub mod format;

pub use format::*;

/// Compute fitted resistances and residuals (Ω) for each sample.
pub fn compute_residuals(samples: &[Sample], fit: &CalibrationFit) -> Result<Vec<SampleResidual>, AppError> {
    let r0 = fit.result.r0;
    let mut out = Vec::with_capacity(samples.len());
    for s in samples {
        let r_fit = r0 * predict_ratio(&fit.result.coefficients, fit.quality.intercept, s.temperature);
        if !r_fit.is_finite() {
            return Err(AppError::new(
                EXIT_ESTIMATION,
                "Non-finite model prediction during residual computation.",
            ));
        }
        out.push(SampleResidual {
            sample: *s,
            r_fit,
            residual: s.resistance - r_fit,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoefficientResult, Coefficients, FitQuality};

    #[test]
    fn compute_residuals_basic() {
        let samples = vec![Sample::new(0.0, 100.0), Sample::new(100.0, 139.0)];
        let fit = CalibrationFit {
            result: CoefficientResult {
                r0: 100.0,
                coefficients: Coefficients::Quadratic { a: 3.85e-3, b: 0.0 },
            },
            quality: FitQuality {
                intercept: 1.0,
                sse: 0.0,
                rmse: 0.0,
                max_abs_residual: 0.0,
                n: 2,
            },
        };

        let residuals = compute_residuals(&samples, &fit).unwrap();
        assert_eq!(residuals.len(), 2);
        assert!(residuals[0].residual.abs() < 1e-9);
        assert!((residuals[1].r_fit - 138.5).abs() < 1e-9);
        assert!((residuals[1].residual - 0.5).abs() < 1e-9);
    }
}
