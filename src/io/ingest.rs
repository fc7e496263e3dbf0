//! Sample ingest: CSV files and single console lines.
//!
//! Design goals:
//! - **Strict schema**: `temperature,resistance` columns (clear errors + exit code 2)
//! - **Row-level validation** with line numbers, reported all at once
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::Sample;
use crate::error::{AppError, EXIT_INPUT};

/// Row errors listed in the failure message before truncating.
const MAX_REPORTED_ROW_ERRORS: usize = 5;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct SampleRow {
    temperature: f64,
    resistance: f64,
}

/// Load calibration samples from a CSV file, preserving row order.
pub fn load_samples(path: &Path) -> Result<Vec<Sample>, AppError> {
    let path = validate_csv_path(path)?;
    let file = File::open(&path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_samples(file)
}

/// Parse samples from any CSV reader with a `temperature,resistance` header.
pub fn read_samples<R: std::io::Read>(reader: R) -> Result<Vec<Sample>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, result) in reader.deserialize::<SampleRow>().enumerate() {
        // +2: records start after the header and lines are 1-based.
        let line = idx + 2;
        match result {
            Ok(row) if row.temperature.is_finite() && row.resistance.is_finite() => {
                samples.push(Sample::new(row.temperature, row.resistance));
            }
            Ok(_) => row_errors.push(RowError {
                line,
                message: "temperature and resistance must be finite".to_string(),
            }),
            Err(e) => row_errors.push(RowError {
                line,
                message: format!("CSV parse error: {e}"),
            }),
        }
    }

    if !row_errors.is_empty() {
        return Err(AppError::new(EXIT_INPUT, format_row_errors(&row_errors)));
    }
    if samples.is_empty() {
        return Err(AppError::new(EXIT_INPUT, "CSV contains no samples."));
    }

    Ok(samples)
}

fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = format!("{} invalid CSV row(s):", errors.len());
    for e in errors.iter().take(MAX_REPORTED_ROW_ERRORS) {
        out.push_str(&format!("\n  line {}: {}", e.line, e.message));
    }
    if errors.len() > MAX_REPORTED_ROW_ERRORS {
        out.push_str(&format!("\n  ... and {} more", errors.len() - MAX_REPORTED_ROW_ERRORS));
    }
    out
}

/// Validate the provided path points to a `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("CSV file not found: {}", path.display()),
        ));
    }
    if path.is_dir() {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        != Some(true)
    {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("Expected a .csv file (got: {}).", path.display()),
        ));
    }

    Ok(path.to_path_buf())
}

/// Parse `"<temperature> <resistance>"`: exactly two whitespace-separated,
/// period-decimal numbers.
pub fn parse_sample_line(line: &str) -> Option<Sample> {
    let mut tokens = line.split_whitespace();
    let (Some(t), Some(r), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return None;
    };
    let temperature = parse_number(t)?;
    let resistance = parse_number(r)?;
    Some(Sample::new(temperature, resistance))
}

/// Parse a finite period-decimal number.
pub fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
