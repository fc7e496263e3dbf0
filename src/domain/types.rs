//! Shared domain types.
//!
//! Results are serializable so the binary can print them as JSON; nothing is
//! ever written to disk.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// One calibration measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Temperature in °C.
    pub temperature: f64,
    /// Measured resistance in Ω.
    pub resistance: f64,
}

impl Sample {
    pub fn new(temperature: f64, resistance: f64) -> Self {
        Self {
            temperature,
            resistance,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.resistance.is_finite()
    }
}

impl From<(f64, f64)> for Sample {
    fn from((temperature, resistance): (f64, f64)) -> Self {
        Self::new(temperature, resistance)
    }
}

/// Which form of the Callendar-Van Dusen polynomial is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelOrder {
    /// `r = β0 + A·T + B·T²` (no sample below 0 °C).
    Quadratic,
    /// Adds `C·(T − 100)·T³`, active only for `T < 0`.
    CubicBelowZero,
}

impl ModelOrder {
    /// Select the model from the data: any sub-zero sample enables the cubic term.
    pub fn from_samples(samples: &[Sample]) -> Self {
        if samples.iter().any(|s| s.temperature < 0.0) {
            ModelOrder::CubicBelowZero
        } else {
            ModelOrder::Quadratic
        }
    }

    /// Number of design-matrix columns (intercept included).
    pub fn column_count(self) -> usize {
        match self {
            ModelOrder::Quadratic => 3,
            ModelOrder::CubicBelowZero => 4,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelOrder::Quadratic => "quadratic (A, B)",
            ModelOrder::CubicBelowZero => "cubic below 0 °C (A, B, C)",
        }
    }
}

/// Validated solver input.
///
/// Construction is the validation boundary: once a value exists, the samples
/// are non-empty and finite and `r0` is a positive finite number.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationInput {
    samples: Vec<Sample>,
    r0: f64,
}

impl CalibrationInput {
    pub fn new(samples: Vec<Sample>, r0: f64) -> Result<Self, CalibrationError> {
        if samples.is_empty() {
            return Err(CalibrationError::EmptySamples);
        }
        if let Some((index, s)) = samples.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(CalibrationError::NonFiniteSample {
                index,
                temperature: s.temperature,
                resistance: s.resistance,
            });
        }
        if !(r0.is_finite() && r0 > 0.0) {
            return Err(CalibrationError::InvalidReferenceResistance { value: r0 });
        }
        Ok(Self { samples, r0 })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn r0(&self) -> f64 {
        self.r0
    }

    pub fn model_order(&self) -> ModelOrder {
        ModelOrder::from_samples(&self.samples)
    }

    /// Count of distinct temperature values (exact float comparison).
    pub fn distinct_temperatures(&self) -> usize {
        let mut temps: Vec<f64> = self.samples.iter().map(|s| s.temperature).collect();
        temps.sort_by(f64::total_cmp);
        temps.dedup();
        temps.len()
    }

    /// Temperature span of the samples as `(min, max)`.
    pub fn temperature_range(&self) -> (f64, f64) {
        self.samples.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.temperature), hi.max(s.temperature))
        })
    }
}

/// Fitted CVD coefficients; the variant fixes whether `C` exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Coefficients {
    Quadratic { a: f64, b: f64 },
    CubicBelowZero { a: f64, b: f64, c: f64 },
}

impl Coefficients {
    pub fn order(&self) -> ModelOrder {
        match self {
            Coefficients::Quadratic { .. } => ModelOrder::Quadratic,
            Coefficients::CubicBelowZero { .. } => ModelOrder::CubicBelowZero,
        }
    }

    pub fn a(&self) -> f64 {
        match *self {
            Coefficients::Quadratic { a, .. } | Coefficients::CubicBelowZero { a, .. } => a,
        }
    }

    pub fn b(&self) -> f64 {
        match *self {
            Coefficients::Quadratic { b, .. } | Coefficients::CubicBelowZero { b, .. } => b,
        }
    }

    pub fn c(&self) -> Option<f64> {
        match *self {
            Coefficients::Quadratic { .. } => None,
            Coefficients::CubicBelowZero { c, .. } => Some(c),
        }
    }
}

/// The calibration result handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientResult {
    pub r0: f64,
    #[serde(flatten)]
    pub coefficients: Coefficients,
}

/// Least-squares diagnostics, in normalized-resistance units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    /// Fitted constant term β0 (ideally close to 1).
    pub intercept: f64,
    pub sse: f64,
    pub rmse: f64,
    pub max_abs_residual: f64,
    pub n: usize,
}

/// Solver output including diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationFit {
    pub result: CoefficientResult,
    pub quality: FitQuality,
}

/// Per-sample fitted value, in Ω.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleResidual {
    pub sample: Sample,
    pub r_fit: f64,
    pub residual: f64,
}

/// Output rendering for the non-interactive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// How a run is presented.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub format: OutputFormat,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            plot: false,
            plot_width: 72,
            plot_height: 20,
        }
    }
}

/// Parameters for synthetic IEC 60751 sample generation.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub r0: f64,
    pub t_min: f64,
    pub t_max: f64,
    pub step: f64,
    /// Standard deviation of additive resistance noise, in Ω.
    pub noise_ohm: f64,
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(temps: &[f64]) -> Vec<Sample> {
        temps.iter().map(|&t| Sample::new(t, 100.0 + 0.39 * t)).collect()
    }

    #[test]
    fn model_order_follows_sub_zero_samples() {
        assert_eq!(ModelOrder::from_samples(&samples(&[0.0, 50.0, 100.0])), ModelOrder::Quadratic);
        assert_eq!(
            ModelOrder::from_samples(&samples(&[-0.5, 50.0, 100.0])),
            ModelOrder::CubicBelowZero
        );
        assert_eq!(ModelOrder::Quadratic.column_count(), 3);
        assert_eq!(ModelOrder::CubicBelowZero.column_count(), 4);
    }

    #[test]
    fn input_validation_rejects_bad_values() {
        assert_eq!(CalibrationInput::new(vec![], 100.0), Err(CalibrationError::EmptySamples));

        let err = CalibrationInput::new(samples(&[0.0, 10.0]), 0.0).unwrap_err();
        assert_eq!(err, CalibrationError::InvalidReferenceResistance { value: 0.0 });

        let err = CalibrationInput::new(samples(&[0.0, 10.0]), -1.0).unwrap_err();
        assert!(matches!(err, CalibrationError::InvalidReferenceResistance { .. }));

        let mut bad = samples(&[0.0, 10.0, 20.0]);
        bad[2].resistance = f64::NAN;
        let err = CalibrationInput::new(bad, 100.0).unwrap_err();
        assert!(matches!(err, CalibrationError::NonFiniteSample { index: 2, .. }));
    }

    #[test]
    fn distinct_temperatures_ignores_repeats() {
        let input = CalibrationInput::new(samples(&[0.0, 100.0, 0.0, 100.0]), 100.0).unwrap();
        assert_eq!(input.distinct_temperatures(), 2);
        assert_eq!(input.temperature_range(), (0.0, 100.0));
    }

    #[test]
    fn coefficient_accessors_follow_variant() {
        let quad = Coefficients::Quadratic { a: 1.0, b: 2.0 };
        assert_eq!(quad.c(), None);
        assert_eq!(quad.order(), ModelOrder::Quadratic);

        let cubic = Coefficients::CubicBelowZero { a: 1.0, b: 2.0, c: 3.0 };
        assert_eq!((cubic.a(), cubic.b(), cubic.c()), (1.0, 2.0, Some(3.0)));
    }

    #[test]
    fn result_serializes_flat_with_model_tag() {
        let result = CoefficientResult {
            r0: 100.0,
            coefficients: Coefficients::Quadratic { a: 3.9e-3, b: -5.8e-7 },
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["model"], "quadratic");
        assert_eq!(json["r0"], 100.0);
        assert!(json.get("c").is_none());
    }
}
