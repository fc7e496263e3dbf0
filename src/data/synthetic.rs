//! Synthetic platinum RTD samples from the IEC 60751 coefficients.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{CoefficientResult, Coefficients, Sample, SyntheticConfig};
use crate::error::{AppError, EXIT_INPUT};
use crate::models::resistance_at;

/// IEC 60751 coefficient A (°C⁻¹).
pub const IEC_60751_A: f64 = 3.9083e-3;
/// IEC 60751 coefficient B (°C⁻²).
pub const IEC_60751_B: f64 = -5.775e-7;
/// IEC 60751 coefficient C (°C⁻⁴), applied below 0 °C only.
pub const IEC_60751_C: f64 = -4.183e-12;

/// Upper bound on generated points; keeps a typo in `--step` from exhausting memory.
const MAX_POINTS: usize = 100_000;

/// The standard platinum sensor for a given `R0`.
pub fn iec_60751(r0: f64) -> CoefficientResult {
    CoefficientResult {
        r0,
        coefficients: Coefficients::CubicBelowZero {
            a: IEC_60751_A,
            b: IEC_60751_B,
            c: IEC_60751_C,
        },
    }
}

/// Generate samples on `t_min, t_min + step, …, ≤ t_max` with optional Gaussian noise.
///
/// Returns the samples together with the generating coefficients.
pub fn generate_samples(config: &SyntheticConfig) -> Result<(Vec<Sample>, CoefficientResult), AppError> {
    if !(config.r0.is_finite() && config.r0 > 0.0) {
        return Err(AppError::new(EXIT_INPUT, "R0 must be a positive number."));
    }
    if !(config.t_min.is_finite() && config.t_max.is_finite() && config.t_max > config.t_min) {
        return Err(AppError::new(EXIT_INPUT, "Invalid temperature range for sample generation."));
    }
    if !(config.step.is_finite() && config.step > 0.0) {
        return Err(AppError::new(EXIT_INPUT, "Temperature step must be > 0."));
    }
    if !(config.noise_ohm.is_finite() && config.noise_ohm >= 0.0) {
        return Err(AppError::new(EXIT_INPUT, "Noise level must be >= 0."));
    }

    let count = ((config.t_max - config.t_min) / config.step).floor() as usize + 1;
    if count > MAX_POINTS {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("Temperature grid would have {count} points (max {MAX_POINTS})."),
        ));
    }

    let truth = iec_60751(config.r0);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_ohm)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Noise distribution error: {e}")))?;

    let samples = (0..count)
        .map(|i| {
            let t = config.t_min + i as f64 * config.step;
            let noise = if config.noise_ohm > 0.0 {
                normal.sample(&mut rng)
            } else {
                0.0
            };
            Sample::new(t, resistance_at(&truth, t) + noise)
        })
        .collect();

    Ok((samples, truth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SyntheticConfig {
        SyntheticConfig {
            r0: 100.0,
            t_min: -200.0,
            t_max: 850.0,
            step: 50.0,
            noise_ohm: 0.0,
            seed: 42,
        }
    }

    #[test]
    fn grid_is_inclusive_of_both_ends() {
        let (samples, truth) = generate_samples(&config()).unwrap();
        assert_eq!(samples.len(), 22);
        assert_eq!(samples[0].temperature, -200.0);
        assert_eq!(samples[21].temperature, 850.0);
        assert_eq!(truth.coefficients.c(), Some(IEC_60751_C));

        // IEC 60751 table: 18.52 Ω at -200 °C, 390.48 Ω at 850 °C for Pt100.
        assert!((samples[0].resistance - 18.52).abs() < 0.01);
        assert!((samples[21].resistance - 390.48).abs() < 0.01);
    }

    #[test]
    fn noise_is_reproducible_per_seed() {
        let noisy = SyntheticConfig {
            noise_ohm: 0.01,
            ..config()
        };
        let (a, _) = generate_samples(&noisy).unwrap();
        let (b, _) = generate_samples(&noisy).unwrap();
        assert_eq!(a, b);

        let (clean, _) = generate_samples(&config()).unwrap();
        assert!(a.iter().zip(&clean).any(|(n, c)| n.resistance != c.resistance));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        for bad in [
            SyntheticConfig { step: 0.0, ..config() },
            SyntheticConfig { t_max: -300.0, ..config() },
            SyntheticConfig { noise_ohm: -1.0, ..config() },
            SyntheticConfig { r0: 0.0, ..config() },
            SyntheticConfig { step: 1e-6, ..config() },
        ] {
            let err = generate_samples(&bad).unwrap_err();
            assert_eq!(err.exit_code(), EXIT_INPUT);
        }
    }
}
