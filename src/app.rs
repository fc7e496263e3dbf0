//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - collects samples (console, CSV or synthetic)
//! - runs the calibration pipeline
//! - prints the report

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::prompt::Prompter;
use crate::cli::{Command, DemoArgs, FitArgs, InteractiveArgs};
use crate::domain::{OutputFormat, ReportConfig};
use crate::error::{AppError, EXIT_INPUT};
use crate::report::{format_comparison, format_footer, to_json};

use self::pipeline::{Outcome, render_text, run_calibration};

pub mod pipeline;

/// Environment variable holding the log filter (e.g. `CVD_LOG=info`).
pub const LOG_ENV: &str = "CVD_LOG";

/// Entry point for the `cvd` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Interactive(args) => handle_interactive(args),
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
    }
}

/// Install the stderr log subscriber; `.env` may provide `CVD_LOG`.
pub fn init_logging() {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second install (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_interactive(args: InteractiveArgs) -> Result<(), AppError> {
    let config = args.plot.report_config(OutputFormat::Text);
    let stdin = io::stdin();
    run_interactive(stdin.lock(), io::stdout().lock(), &config, !args.no_pause)
}

/// Console session: prompts, report, footer, then an optional pause.
///
/// The session ends normally even when the fit failed; the diagnostic is already shown.
pub fn run_interactive<R: BufRead, W: Write>(
    input: R,
    output: W,
    config: &ReportConfig,
    pause: bool,
) -> Result<(), AppError> {
    let mut prompter = Prompter::new(input, output);

    let (samples, r0) = prompter.collect()?;
    let outcome = run_calibration(samples, r0)?;

    let report = format!("\n{}{}", render_text(&outcome, config), format_footer());
    emit(prompter.output(), &report)?;

    if pause {
        prompter.pause()?;
    }
    Ok(())
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = args.plot.report_config(args.format);
    let samples = crate::io::load_samples(&args.input)?;
    let outcome = run_calibration(samples, args.r0)?;
    present(&outcome, &config, None)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = args.plot.report_config(args.format);
    let synthetic = args.synthetic_config();
    let (samples, truth) = crate::data::generate_samples(&synthetic)?;

    let outcome = run_calibration(samples, synthetic.r0)?;
    let comparison = match &outcome {
        Outcome::Fitted(run) => Some(format!(
            "\nIEC 60751 comparison (noise σ={} Ω, seed={}):\n{}",
            synthetic.noise_ohm,
            synthetic.seed,
            format_comparison(&truth, &run.fit.result)
        )),
        Outcome::Failed(_) => None,
    };
    present(&outcome, &config, comparison.as_deref())
}

/// Print an outcome for the non-interactive commands.
fn present(outcome: &Outcome, config: &ReportConfig, extra: Option<&str>) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();

    match config.format {
        OutputFormat::Json => match outcome {
            Outcome::Fitted(run) => emit(&mut stdout, &format!("{}\n", to_json(&run.fit, &run.residuals)?)),
            Outcome::Failed(err) => Err(err.clone().into()),
        },
        OutputFormat::Text => {
            emit(&mut stdout, &render_text(outcome, config))?;
            if let Some(extra) = extra {
                emit(&mut stdout, extra)?;
            }
            emit(&mut stdout, &format_footer())?;

            match outcome {
                Outcome::Fitted(_) => Ok(()),
                Outcome::Failed(err) => Err(AppError::new(
                    AppError::from(err.clone()).exit_code(),
                    "Calibration failed; see the diagnostic above.",
                )),
            }
        }
    }
}

fn emit<W: Write>(out: &mut W, text: &str) -> Result<(), AppError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write output: {e}")))
}

/// Rewrite argv so `cvd` defaults to `cvd interactive`.
///
/// Rules:
/// - `cvd`                      -> `cvd interactive`
/// - `cvd --plot ...`           -> `cvd interactive --plot ...`
/// - `cvd --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("interactive".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "interactive" | "fit" | "demo");
    if is_subcommand {
        return argv;
    }

    // A leading flag is treated as "interactive flags".
    if arg1.starts_with('-') {
        argv.insert(1, "interactive".to_string());
        return argv;
    }

    argv
}
