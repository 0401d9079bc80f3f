//! Tolerant two-stage parser for host command lines.
//!
//! Strategies are tried in order; the first that recovers both values wins:
//! 1. exactly two whitespace-separated numbers: `"500 3.3"`,
//! 2. free text containing the words `frequency` and `amplitude`, each
//!    followed by a decimal number: `"set frequency 500 amplitude 3.3"`.
//!
//! Whatever the strategy, the pair must validate: frequency finite and
//! strictly positive, amplitude finite and non-negative.

use super::error::ParseError;

/// A validated reconfiguration request, one host line's worth.
///
/// Constructed by [`parse_command`], consumed once by
/// [`crate::control::Reconfigurator::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    /// Target frequency, Hz. Finite and > 0 when parsed.
    pub frequency_hz: f32,
    /// Target peak amplitude, volts. Finite and >= 0 when parsed.
    pub amplitude_v: f32,
}

/// Parse one line into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let candidate = parse_pair(line)
        .or_else(|| parse_keywords(line))
        .ok_or(ParseError::Unrecognized)?;
    validate(candidate)
}

fn validate(cmd: Command) -> Result<Command, ParseError> {
    if !cmd.frequency_hz.is_finite() || cmd.frequency_hz <= 0.0 {
        return Err(ParseError::InvalidFrequency);
    }
    if !cmd.amplitude_v.is_finite() || cmd.amplitude_v < 0.0 {
        return Err(ParseError::InvalidAmplitude);
    }
    Ok(cmd)
}

/// Strategy 1: exactly two numeric tokens, frequency then amplitude.
fn parse_pair(line: &str) -> Option<Command> {
    let mut tokens = line.split_whitespace();
    let frequency_hz = tokens.next()?.parse().ok()?;
    let amplitude_v = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some(Command {
        frequency_hz,
        amplitude_v,
    })
}

/// Strategy 2: keyword scan, tolerant of surrounding free text.
fn parse_keywords(line: &str) -> Option<Command> {
    Some(Command {
        frequency_hz: number_after(line, "frequency")?,
        amplitude_v: number_after(line, "amplitude")?,
    })
}

/// Find `keyword` and parse the first decimal number following it.
/// Separators like spaces, `=` or `:` between the two are skipped.
fn number_after(line: &str, keyword: &str) -> Option<f32> {
    let rest = &line[line.find(keyword)? + keyword.len()..];
    let start = rest.find(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')?;
    let num = &rest[start..];
    let end = num
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+')
        .unwrap_or(num.len());
    num[..end].parse().ok()
}
