//! Safe reconfiguration of frequency, amplitude, and table resolution.
//!
//! [`Reconfigurator::apply`] is the single entry point for changing operating
//! parameters. The amplitude path is one atomic scalar write. The frequency
//! path is the critical section: suspend the timer, rebuild table and size
//! together, recompute the sample interval, resume. Phase is deliberately
//! never touched, which keeps output continuity across resolution changes to
//! within one table step.

use crate::config::SynthConfig;
use crate::hal::SampleTimer;
use crate::logging::LogRing;
use crate::oscillator::OscillatorState;
use crate::policy::TableSizePolicy;
use crate::protocol::Command;
use crate::wavetable::MAX_TABLE_SIZE;
use crate::{log_info, log_warn};

/// Effective parameters after a successful [`Reconfigurator::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied {
    /// Applied frequency, Hz.
    pub frequency_hz: f32,
    /// Applied amplitude after clamping to the supply rail, volts.
    pub amplitude_v: f32,
    /// Resulting table resolution.
    pub table_size: usize,
    /// Resulting sample interval, µs (after the hardware floor).
    pub interval_us: u32,
    /// True when the requested amplitude was sanitized to the rail.
    pub amplitude_clamped: bool,
}

/// Rejected reconfiguration requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyError {
    /// Frequency was zero, negative, or not finite. Nothing was changed.
    InvalidFrequency,
}

impl ApplyError {
    /// Get error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFrequency => "C01",
        }
    }

    /// Get error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidFrequency => "frequency must be > 0",
        }
    }
}

impl core::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Orchestrates parameter changes against the shared oscillator state.
///
/// Owns the timer handle; the matching [`crate::oscillator::Sampler`] owns
/// the PWM output on the interrupt side.
pub struct Reconfigurator<'a, T: SampleTimer> {
    state: &'a OscillatorState,
    timer: T,
    policy: TableSizePolicy,
    config: SynthConfig,
    log: &'a LogRing,
}

impl<'a, T: SampleTimer> Reconfigurator<'a, T> {
    /// Bind the controller to shared state, a timer handle, and a policy.
    pub fn new(
        state: &'a OscillatorState,
        timer: T,
        policy: TableSizePolicy,
        config: SynthConfig,
        log: &'a LogRing,
    ) -> Self {
        Self {
            state,
            timer,
            policy,
            config,
            log,
        }
    }

    /// Apply the configured startup parameters.
    pub fn apply_defaults(&mut self) -> Result<Applied, ApplyError> {
        self.apply(Command {
            frequency_hz: self.config.default_frequency_hz,
            amplitude_v: self.config.default_amplitude_v,
        })
    }

    /// Apply a validated (frequency, amplitude) pair.
    ///
    /// Rejects non-positive frequencies wholesale: frequency and amplitude
    /// are applied only as a pair, so a rejected request leaves every prior
    /// parameter untouched. Out-of-range amplitude is not an error; it is
    /// clamped to the supply rail and the clamped value reported back.
    pub fn apply(&mut self, cmd: Command) -> Result<Applied, ApplyError> {
        if !cmd.frequency_hz.is_finite() || cmd.frequency_hz <= 0.0 {
            return Err(ApplyError::InvalidFrequency);
        }

        // Amplitude path: a single scalar store the sampler reads atomically.
        // No suspension needed.
        let amplitude_v = cmd.amplitude_v.clamp(0.0, self.config.supply_voltage);
        let amplitude_clamped = amplitude_v != cmd.amplitude_v;
        self.state
            .set_amplitude_scale(amplitude_v / self.config.supply_voltage);

        // Frequency/table path: table and size mutate only inside the
        // suspended region, so a tick never sees a mismatched pair.
        let table_size = self.policy.size_for(cmd.frequency_hz).min(MAX_TABLE_SIZE);
        let ideal_us = 1_000_000.0 / (cmd.frequency_hz * table_size as f32);
        let interval_us = (ideal_us as u32).max(self.config.min_interval_us);

        self.timer.suspend();
        self.state.rebuild_table(table_size);
        self.state.set_sample_interval_us(interval_us);
        self.timer.resume(interval_us);

        if amplitude_clamped {
            log_warn!(
                self.log,
                "amplitude {:.3}V clamped to rail {:.3}V",
                cmd.amplitude_v,
                amplitude_v
            );
        }
        log_info!(
            self.log,
            "applied freq={:.3}Hz amp={:.3}V table={} interval={}us",
            cmd.frequency_hz,
            amplitude_v,
            table_size,
            interval_us
        );

        Ok(Applied {
            frequency_hz: cmd.frequency_hz,
            amplitude_v,
            table_size,
            interval_us,
            amplitude_clamped,
        })
    }

    /// The active size policy.
    pub fn policy(&self) -> &TableSizePolicy {
        &self.policy
    }

    /// The engine configuration.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// The timer handle, for inspection.
    pub fn timer(&self) -> &T {
        &self.timer
    }
}
