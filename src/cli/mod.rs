//! Command-line parsing for the CVD calibration tool.
//!
//! The goal of this module is to keep **argument parsing** and **console
//! prompting** separate from the fitting code.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use crate::domain::{OutputFormat, ReportConfig, SyntheticConfig};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cvd", version, about = "Callendar-Van Dusen coefficient calibration for RTD sensors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enter samples at the console and print the coefficients (default).
    Interactive(InteractiveArgs),
    /// Fit samples read from a CSV file with `temperature,resistance` columns.
    Fit(FitArgs),
    /// Fit synthetic IEC 60751 platinum sensor data and compare coefficients.
    Demo(DemoArgs),
}

/// Plot options shared by all commands.
#[derive(Debug, Args, Clone)]
pub struct PlotOpts {
    /// Render an ASCII plot of samples and the fitted curve.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns, 10-500).
    #[arg(long, default_value_t = 72, value_parser = RangedU64ValueParser::<usize>::new().range(10..=500))]
    pub width: usize,

    /// Plot height (rows, 5-200).
    #[arg(long, default_value_t = 20, value_parser = RangedU64ValueParser::<usize>::new().range(5..=200))]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub plot: PlotOpts,

    /// Do not wait for Enter before exiting.
    #[arg(long)]
    pub no_pause: bool,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// CSV file with `temperature,resistance` header.
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Resistance at 0 °C, in Ω.
    #[arg(long)]
    pub r0: f64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub plot: PlotOpts,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Resistance at 0 °C, in Ω.
    #[arg(long, default_value_t = 100.0)]
    pub r0: f64,

    /// Lowest generated temperature (°C).
    #[arg(long, default_value_t = -200.0, allow_negative_numbers = true)]
    pub t_min: f64,

    /// Highest generated temperature (°C).
    #[arg(long, default_value_t = 850.0, allow_negative_numbers = true)]
    pub t_max: f64,

    /// Temperature step (°C).
    #[arg(long, default_value_t = 50.0)]
    pub step: f64,

    /// Standard deviation of resistance noise (Ω).
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub plot: PlotOpts,
}

impl PlotOpts {
    pub fn report_config(&self, format: OutputFormat) -> ReportConfig {
        ReportConfig {
            format,
            plot: self.plot,
            plot_width: self.width,
            plot_height: self.height,
        }
    }
}

impl DemoArgs {
    pub fn synthetic_config(&self) -> SyntheticConfig {
        SyntheticConfig {
            r0: self.r0,
            t_min: self.t_min,
            t_max: self.t_max,
            step: self.step,
            noise_ohm: self.noise,
            seed: self.seed,
        }
    }
}
