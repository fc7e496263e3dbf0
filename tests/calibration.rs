use std::fmt::Write as _;

use approx::assert_relative_eq;
use tempdir::TempDir;

use cvd_calibration::app::pipeline::{Outcome, run_calibration};
use cvd_calibration::data::{IEC_60751_A, IEC_60751_B, IEC_60751_C, generate_samples};
use cvd_calibration::domain::SyntheticConfig;
use cvd_calibration::io::load_samples;
use cvd_calibration::{CalibrationError, ModelOrder, Sample, solve};

fn pt100_config(noise_ohm: f64) -> SyntheticConfig {
    SyntheticConfig {
        r0: 100.0,
        t_min: -200.0,
        t_max: 850.0,
        step: 10.0,
        noise_ohm,
        seed: 11,
    }
}

fn write_csv(dir: &TempDir, name: &str, samples: &[Sample]) -> std::path::PathBuf {
    let mut body = String::from("temperature,resistance\n");
    for s in samples {
        writeln!(body, "{},{}", s.temperature, s.resistance).unwrap();
    }
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn csv_round_trip_recovers_iec_coefficients() {
    let dir = TempDir::new("cvd_csv").unwrap();
    let (samples, _) = generate_samples(&pt100_config(0.0)).unwrap();
    let path = write_csv(&dir, "pt100.csv", &samples);

    let loaded = load_samples(&path).unwrap();
    assert_eq!(loaded.len(), samples.len());

    let result = solve(&loaded, 100.0).unwrap();
    assert_eq!(result.coefficients.order(), ModelOrder::CubicBelowZero);
    assert_relative_eq!(result.coefficients.a(), IEC_60751_A, max_relative = 1e-6);
    assert_relative_eq!(result.coefficients.b(), IEC_60751_B, max_relative = 1e-6);
    assert_relative_eq!(result.coefficients.c().unwrap(), IEC_60751_C, max_relative = 1e-6);
}

#[test]
fn noisy_pt100_data_still_calibrates_closely() {
    let (samples, _) = generate_samples(&pt100_config(0.005)).unwrap();
    let Outcome::Fitted(run) = run_calibration(samples, 100.0).unwrap() else {
        panic!("expected a fitted outcome");
    };

    assert_relative_eq!(run.fit.result.coefficients.a(), IEC_60751_A, max_relative = 1e-3);
    assert!((run.fit.quality.intercept - 1.0).abs() < 1e-4);
    // 5 mΩ noise should give an RMSE of the same order (in Ω).
    let rmse_ohm = run.fit.quality.rmse * 100.0;
    assert!(rmse_ohm > 0.001 && rmse_ohm < 0.01, "rmse={rmse_ohm}");
    assert_eq!(run.residuals.len(), 106);
}

#[test]
fn positive_only_dataset_fits_quadratic_form() {
    let config = SyntheticConfig {
        t_min: 0.0,
        t_max: 400.0,
        step: 25.0,
        ..pt100_config(0.0)
    };
    let (samples, _) = generate_samples(&config).unwrap();
    let result = solve(&samples, 100.0).unwrap();

    assert_eq!(result.coefficients.order(), ModelOrder::Quadratic);
    assert_eq!(result.coefficients.c(), None);
    assert_relative_eq!(result.coefficients.a(), IEC_60751_A, max_relative = 1e-6);
    assert_relative_eq!(result.coefficients.b(), IEC_60751_B, max_relative = 1e-6);
}

#[test]
fn degenerate_inputs_are_classified() {
    let two_points = [Sample::new(0.0, 100.0), Sample::new(100.0, 138.5)];
    assert!(solve(&two_points, 100.0).unwrap_err().is_singular());

    let sub_zero_three_points = [
        Sample::new(-50.0, 80.3),
        Sample::new(0.0, 100.0),
        Sample::new(50.0, 119.4),
    ];
    assert!(solve(&sub_zero_three_points, 100.0).unwrap_err().is_singular());

    assert_eq!(solve(&[], 100.0).unwrap_err(), CalibrationError::EmptySamples);
    assert!(matches!(
        solve(&two_points, 0.0).unwrap_err(),
        CalibrationError::InvalidReferenceResistance { .. }
    ));
}
