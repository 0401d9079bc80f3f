//! Byte-at-a-time command handler.
//!
//! Accumulates serial bytes into a line, parses on `\n` (or on a forced
//! boundary when the buffer fills), applies the command, and answers:
//! `ACK` plus a detail line with the effective parameters, or `NACK` plus
//! `PARSE_ERROR`. A failed line mutates nothing.

use core::fmt::Write;

use super::line_buffer::LineBuffer;
use super::parser::parse_command;
use super::ParseError;
use crate::control::{Applied, Reconfigurator};
use crate::hal::SampleTimer;

/// Startup announcement, expected verbatim by the host side.
pub const READY_BANNER: &str = "ARDUINO_READY";

/// Emit the one-time startup announcement. Call once after initialization,
/// before feeding any bytes.
pub fn announce_ready(out: &mut dyn Write) {
    let _ = writeln!(out, "{}", READY_BANNER);
}

/// Protocol state machine: awaiting line → parse → apply/reject → awaiting.
pub struct CommandHandler {
    line: LineBuffer,
}

impl CommandHandler {
    /// Create a handler with an empty line buffer.
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
        }
    }

    /// Feed one inbound byte.
    ///
    /// `\r` is ignored, `\n` completes the line, and a byte that fills the
    /// buffer forces completion (the truncated line is processed as-is).
    /// Returns `Some` once a line has been processed and answered, `None`
    /// while still accumulating. Empty lines are skipped without a response.
    pub fn on_byte<T: SampleTimer>(
        &mut self,
        byte: u8,
        ctl: &mut Reconfigurator<'_, T>,
        out: &mut dyn Write,
    ) -> Option<Result<Applied, ParseError>> {
        match byte {
            b'\r' => None,
            b'\n' => self.finish_line(ctl, out),
            _ => {
                if self.line.push(byte) {
                    self.finish_line(ctl, out)
                } else {
                    None
                }
            }
        }
    }

    fn finish_line<T: SampleTimer>(
        &mut self,
        ctl: &mut Reconfigurator<'_, T>,
        out: &mut dyn Write,
    ) -> Option<Result<Applied, ParseError>> {
        if self.line.is_empty() {
            return None;
        }

        let result = parse_command(self.line.as_str()).and_then(|cmd| {
            // Controller re-checks the frequency; fold its rejection into
            // the protocol's parse-failure taxonomy.
            ctl.apply(cmd).map_err(|_| ParseError::InvalidFrequency)
        });
        self.line.clear();

        match &result {
            Ok(applied) => {
                let _ = writeln!(out, "ACK");
                let _ = writeln!(
                    out,
                    "freq={:.3} amp={:.3} table={} interval_us={}",
                    applied.frequency_hz,
                    applied.amplitude_v,
                    applied.table_size,
                    applied.interval_us
                );
            }
            Err(err) => {
                let _ = writeln!(out, "NACK");
                let _ = writeln!(
                    out,
                    "PARSE_ERROR {} (expected \"<freq_hz> <amplitude_v>\")",
                    err
                );
            }
        }
        Some(result)
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
