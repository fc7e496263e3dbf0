//! Interactive console prompts.
//!
//! Kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompter reproduces the "type your calibration points" workflow
//!
//! Every prompt re-asks until the answer parses; end of input is an error.

use std::io::{BufRead, Write};

use crate::domain::Sample;
use crate::error::{AppError, EXIT_INPUT};
use crate::io::{parse_number, parse_sample_line};

const COUNT_PROMPT: &str =
    "Enter the number of calibration data points (do not include the resistance at 0°C, will be asked later): ";
const COUNT_INVALID: &str =
    "Invalid input: the number of data points must be a positive integer. Please enter a valid number.";
const SAMPLE_INVALID: &str = "Invalid input. Please enter the temperature and resistance separated by a space. Decimal value separated using point (.)";
const R0_PROMPT: &str = "Enter the resistance at 0°C (R0): ";
const R0_INVALID: &str = "Invalid input. Please enter a valid positive number for R0.";

/// Upper bound on the up-front sample allocation; larger counts grow as pairs arrive.
const MAX_PREALLOCATED_SAMPLES: usize = 1024;

/// Line-oriented prompter over any reader/writer pair (stdin/stdout in the binary).
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for prompts, for printing results in the same stream.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask for the count, every sample pair, then R0.
    pub fn collect(&mut self) -> Result<(Vec<Sample>, f64), AppError> {
        let n = self.read_sample_count()?;
        let samples = self.read_samples(n)?;
        let r0 = self.read_reference_resistance()?;
        Ok((samples, r0))
    }

    pub fn read_sample_count(&mut self) -> Result<usize, AppError> {
        loop {
            let line = self.ask(COUNT_PROMPT)?;
            match line.trim().parse::<usize>() {
                Ok(n) if n > 0 => return Ok(n),
                _ => self.say(COUNT_INVALID)?,
            }
        }
    }

    pub fn read_samples(&mut self, n: usize) -> Result<Vec<Sample>, AppError> {
        self.say("")?;
        self.say("Enter the temperatures and corresponding resistances:")?;
        self.say("")?;

        let mut samples = Vec::with_capacity(n.min(MAX_PREALLOCATED_SAMPLES));
        for i in 0..n {
            let prompt = format!("Data point {} (temperature resistance): ", i + 1);
            loop {
                let line = self.ask(&prompt)?;
                match parse_sample_line(&line) {
                    Some(sample) => {
                        samples.push(sample);
                        break;
                    }
                    None => self.say(SAMPLE_INVALID)?,
                }
            }
        }
        Ok(samples)
    }

    pub fn read_reference_resistance(&mut self) -> Result<f64, AppError> {
        loop {
            let line = self.ask(R0_PROMPT)?;
            match parse_number(&line) {
                Some(r0) if r0 > 0.0 => return Ok(r0),
                _ => self.say(R0_INVALID)?,
            }
        }
    }

    /// Wait for Enter; end of input also ends the wait.
    pub fn pause(&mut self) -> Result<(), AppError> {
        self.write_prompt("Press Enter to exit...")?;
        let mut buf = String::new();
        self.input
            .read_line(&mut buf)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read input: {e}")))?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, AppError> {
        self.write_prompt(prompt)?;

        let mut line = String::new();
        let bytes = self
            .input
            .read_line(&mut line)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                EXIT_INPUT,
                "No input received. Use `cvd fit --input <file.csv> --r0 <ohms>` for non-interactive runs.",
            ));
        }
        Ok(line)
    }

    fn write_prompt(&mut self, prompt: &str) -> Result<(), AppError> {
        write!(self.output, "{prompt}")
            .and_then(|()| self.output.flush())
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write prompt: {e}")))
    }

    fn say(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.output, "{message}")
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write output: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (Result<(Vec<Sample>, f64), AppError>, String) {
        let mut out = Vec::new();
        let result = Prompter::new(Cursor::new(input.as_bytes()), &mut out).collect();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn collects_samples_and_r0() {
        let (result, _) = run("2\n0 100\n100 138.5\n100\n");
        let (samples, r0) = result.unwrap();
        assert_eq!(samples, vec![Sample::new(0.0, 100.0), Sample::new(100.0, 138.5)]);
        assert_eq!(r0, 100.0);
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let (result, out) = run("zero\n-1\n1\n25,0 109,7\n25 109.7\n0\nabc\n100\n");
        let (samples, r0) = result.unwrap();
        assert_eq!(samples, vec![Sample::new(25.0, 109.7)]);
        assert_eq!(r0, 100.0);

        assert_eq!(out.matches(COUNT_INVALID).count(), 2);
        assert_eq!(out.matches(SAMPLE_INVALID).count(), 1);
        assert_eq!(out.matches(R0_INVALID).count(), 2);
        assert!(out.contains("Data point 1 (temperature resistance): "));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let (result, _) = run("3\n0 100\n");
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().starts_with("No input received"));
    }

    #[test]
    fn huge_count_does_not_preallocate() {
        let (result, out) = run("99999999999999999\n0 100\n");
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(out.contains("Data point 2 (temperature resistance): "));
    }

    #[test]
    fn pause_accepts_end_of_input() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(&b""[..]), &mut out);
        prompter.pause().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Press Enter to exit...");
    }
}
