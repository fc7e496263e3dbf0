//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks of a calibration
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - measured samples: `o`
//! - fitted resistance curve: `-` line

use crate::domain::{CalibrationFit, Sample};
use crate::models::predict_ratio;

/// Smallest and largest plot width (columns).
pub const PLOT_WIDTH_RANGE: (usize, usize) = (10, 500);
/// Smallest and largest plot height (rows).
pub const PLOT_HEIGHT_RANGE: (usize, usize) = (5, 200);

/// Render samples and the fitted `R(T)` curve.
///
/// Sizes outside [`PLOT_WIDTH_RANGE`] / [`PLOT_HEIGHT_RANGE`] are clamped.
pub fn render_ascii_plot(samples: &[Sample], fit: &CalibrationFit, width: usize, height: usize) -> String {
    let width = width.clamp(PLOT_WIDTH_RANGE.0, PLOT_WIDTH_RANGE.1);
    let height = height.clamp(PLOT_HEIGHT_RANGE.0, PLOT_HEIGHT_RANGE.1);
    let (t_min, t_max) = temperature_range(samples).unwrap_or((0.0, 100.0));
    let curve = sample_curve(fit, t_min, t_max, width);
    render_plot(samples, &curve, t_min, t_max, width, height)
}

fn render_plot(
    samples: &[Sample],
    curve: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    width: usize,
    height: usize,
) -> String {
    let (r_min, r_max) = resistance_range(samples, curve).unwrap_or((0.0, 1.0));
    let (r_min, r_max) = pad_range(r_min, r_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curve first so points overlay it.
    draw_curve(&mut grid, curve, t_min, t_max, r_min, r_max);

    for s in samples {
        let x = map_x(s.temperature, t_min, t_max, width);
        let y = map_y(s.resistance, r_min, r_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: T=[{t_min:.2}, {t_max:.2}] °C | R=[{r_min:.3}, {r_max:.3}] Ω\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn temperature_range(samples: &[Sample]) -> Option<(f64, f64)> {
    let mut min_t = f64::INFINITY;
    let mut max_t = f64::NEG_INFINITY;
    for s in samples {
        min_t = min_t.min(s.temperature);
        max_t = max_t.max(s.temperature);
    }
    if min_t.is_finite() && max_t.is_finite() && max_t > min_t {
        Some((min_t, max_t))
    } else {
        None
    }
}

fn sample_curve(fit: &CalibrationFit, t_min: f64, t_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let r0 = fit.result.r0;
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let t = t_min + u * (t_max - t_min);
            (t, r0 * predict_ratio(&fit.result.coefficients, fit.quality.intercept, t))
        })
        .collect()
}

fn resistance_range(samples: &[Sample], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let values = samples
        .iter()
        .map(|s| s.resistance)
        .chain(curve.iter().map(|&(_, r)| r));

    let (min_r, max_r) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| (lo.min(r), hi.max(r)));
    if min_r.is_finite() && max_r.is_finite() && max_r > min_r {
        Some((min_r, max_r))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let pad = ((max - min).abs() * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(r: f64, r_min: f64, r_max: f64, height: usize) -> usize {
    let u = ((r - r_min) / (r_max - r_min)).clamp(0.0, 1.0);
    // Highest resistance on row 0.
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, r_min: f64, r_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, r) in curve {
        if !r.is_finite() {
            prev = None;
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let y = map_y(r, r_min, r_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, '-'),
            None => grid[y][x] = '-',
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if let Some(cell) = grid.get_mut(y0 as usize).and_then(|row| row.get_mut(x0 as usize)) {
            if *cell == ' ' {
                *cell = ch;
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoefficientResult, Coefficients, FitQuality};

    fn flat_fit() -> CalibrationFit {
        CalibrationFit {
            result: CoefficientResult {
                r0: 100.0,
                coefficients: Coefficients::Quadratic { a: 0.0, b: 0.0 },
            },
            quality: FitQuality {
                intercept: 1.0,
                sse: 0.0,
                rmse: 0.0,
                max_abs_residual: 0.0,
                n: 2,
            },
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let samples = vec![Sample::new(0.0, 100.0), Sample::new(100.0, 110.0)];
        let txt = render_ascii_plot(&samples, &flat_fit(), 10, 5);
        let expected = concat!(
            "Plot: T=[0.00, 100.00] °C | R=[99.500, 110.500] Ω\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn oversized_plot_is_clamped() {
        let samples = vec![Sample::new(0.0, 100.0), Sample::new(100.0, 110.0)];
        let txt = render_ascii_plot(&samples, &flat_fit(), 1_000_000_000_000, usize::MAX);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), PLOT_HEIGHT_RANGE.1);
        assert!(rows.iter().all(|r| r.chars().count() == PLOT_WIDTH_RANGE.1));
    }
}
