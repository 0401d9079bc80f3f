//! Operating configuration for the synthesis engine.
//!
//! One plain value struct, passed explicitly to the components that need it.
//! Band tables for the adaptive resolution policy live in [`crate::policy`]
//! and are configuration too, not code.

/// Engine configuration.
///
/// Defaults match the reference 3.3 V board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Supply rail voltage in volts. The amplitude ceiling: requested
    /// amplitudes are clamped into [0, supply_voltage].
    pub supply_voltage: f32,
    /// Hardware floor for the sample timer period, microseconds. Derived
    /// intervals below this are clamped up to stay inside the ISR budget.
    pub min_interval_us: u32,
    /// Ceiling on `frequency × table_size` that any policy band must respect.
    pub max_tick_rate_hz: u32,
    /// Frequency applied at startup, Hz.
    pub default_frequency_hz: f32,
    /// Amplitude applied at startup, volts.
    pub default_amplitude_v: f32,
}

impl SynthConfig {
    /// Reference board configuration: 3.3 V rail, 20 µs timer floor.
    pub const fn new() -> Self {
        Self {
            supply_voltage: 3.3,
            min_interval_us: 20,
            max_tick_rate_hz: 50_000,
            default_frequency_hz: 100.0,
            default_amplitude_v: 3.3,
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::new()
    }
}
