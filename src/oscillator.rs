//! Oscillator core: shared state plus the per-tick sampler.
//!
//! # Architecture
//!
//! ```text
//! main loop                 OscillatorState               timer ISR
//! ─────────                 ───────────────               ─────────
//! Reconfigurator ─────────▶ amplitude_scale ────────────▶ Sampler::tick
//! (timer suspended for      table + table_size            reads once per
//!  table mutations)         phase (ISR-owned)             tick, writes PWM
//! ```
//!
//! Synchronization rules:
//! - `amplitude_scale` is a single atomic scalar and may be written at any
//!   time; the sampler picks it up on the next tick.
//! - `table` and `table_size` are a compound resource. Both are mutated only
//!   while the sample timer is suspended, so a tick never observes a size
//!   that does not match the table contents it indexes.
//! - `phase` is written only by the tick path and persists across
//!   reconfiguration; position is always reinterpreted against the current
//!   table size.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::hal::PwmOutput;
use crate::wavetable::{self, MAX_TABLE_SIZE};

/// State shared between the control path and the timer interrupt.
///
/// `const fn new` so instances can live in a `static`.
pub struct OscillatorState {
    /// Normalized waveform samples. Only the first `table_size` entries are
    /// live; the rest are stale.
    table: UnsafeCell<[f32; MAX_TABLE_SIZE]>,

    /// Number of live table entries. 0 until first configuration; the
    /// sampler treats 0 as "nothing to do".
    table_size: AtomicUsize,

    /// Position within the current cycle, [0, 1), stored as f32 bits.
    phase: AtomicU32,

    /// target_amplitude / supply_voltage, [0, 1], stored as f32 bits.
    amplitude_scale: AtomicU32,

    /// Microseconds between ticks as last applied. Reporting only; the
    /// timer peripheral holds the authoritative value.
    sample_interval_us: AtomicU32,
}

// SAFETY: All scalar fields are atomics. `table` is written only between
// SampleTimer::suspend and resume, while no tick can run; every other access
// is a read from the tick path. See the module synchronization rules.
unsafe impl Sync for OscillatorState {}

impl OscillatorState {
    /// Create unconfigured state (empty table, phase 0, amplitude 0).
    pub const fn new() -> Self {
        Self {
            table: UnsafeCell::new([0.0; MAX_TABLE_SIZE]),
            table_size: AtomicUsize::new(0),
            phase: AtomicU32::new(0),
            amplitude_scale: AtomicU32::new(0),
            sample_interval_us: AtomicU32::new(0),
        }
    }

    /// Current table resolution (0 while unconfigured).
    #[inline]
    pub fn table_size(&self) -> usize {
        self.table_size.load(Ordering::Acquire)
    }

    /// Current cycle position, [0, 1).
    #[inline]
    pub fn phase(&self) -> f32 {
        f32::from_bits(self.phase.load(Ordering::Acquire))
    }

    /// Current amplitude scale, [0, 1].
    #[inline]
    pub fn amplitude_scale(&self) -> f32 {
        f32::from_bits(self.amplitude_scale.load(Ordering::Acquire))
    }

    /// Sample interval as last applied, µs.
    #[inline]
    pub fn sample_interval_us(&self) -> u32 {
        self.sample_interval_us.load(Ordering::Acquire)
    }

    /// Copy of the live table entries, for inspection.
    ///
    /// Call from the control context only, and not during a rebuild.
    pub fn table_snapshot(&self, out: &mut [f32; MAX_TABLE_SIZE]) -> usize {
        let size = self.table_size.load(Ordering::Acquire);
        // SAFETY: rebuilds happen on this same control context, so the table
        // cannot be mid-mutation here; ticks only read.
        let table = unsafe { &*self.table.get() };
        out[..size].copy_from_slice(&table[..size]);
        size
    }

    #[inline]
    pub(crate) fn set_amplitude_scale(&self, scale: f32) {
        self.amplitude_scale.store(scale.to_bits(), Ordering::Release);
    }

    #[inline]
    pub(crate) fn set_sample_interval_us(&self, interval_us: u32) {
        self.sample_interval_us.store(interval_us, Ordering::Release);
    }

    /// Rebuild the waveform table in place at `size` entries and publish the
    /// new size. A `size` of 0 leaves table and size unchanged.
    ///
    /// Contract: the sample timer must be suspended for the whole call.
    /// Table contents and size mutate together here and nowhere else.
    pub(crate) fn rebuild_table(&self, size: usize) {
        // SAFETY: caller holds the timer suspended, so no tick reads the
        // table concurrently; this is the only mutation site.
        let table = unsafe { &mut *self.table.get() };
        let built = wavetable::build(table, size);
        if built > 0 {
            self.table_size.store(built, Ordering::Release);
        }
    }
}

impl Default for OscillatorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic sampler, invoked once per sample interval from the timer ISR.
///
/// Owns the PWM output; shares [`OscillatorState`] with the control path.
pub struct Sampler<'a, P: PwmOutput> {
    state: &'a OscillatorState,
    pwm: P,
}

impl<'a, P: PwmOutput> Sampler<'a, P> {
    /// Bind the sampler to shared state and a PWM output.
    pub fn new(state: &'a OscillatorState, pwm: P) -> Self {
        Self { state, pwm }
    }

    /// One sample tick: interpolate, scale, output, advance phase.
    ///
    /// Bounded time, no blocking, no allocation. With a degenerate (empty)
    /// table the tick is a no-op and the output pin is left untouched.
    ///
    /// # Timing
    ///
    /// O(1): two table reads, a handful of float operations, one PWM write.
    #[inline]
    pub fn tick(&mut self) {
        // Each shared field is read exactly once per tick, so one tick can
        // never mix values from two configurations.
        let size = self.state.table_size.load(Ordering::Acquire);
        if size == 0 || size > MAX_TABLE_SIZE {
            return;
        }
        let phase = f32::from_bits(self.state.phase.load(Ordering::Relaxed));
        let scale = f32::from_bits(self.state.amplitude_scale.load(Ordering::Acquire));

        // SAFETY: table mutation only happens with the timer suspended, and
        // tick runs only from the timer ISR. No concurrent access possible.
        let table = unsafe { &(&*self.state.table.get())[..size] };

        // Phase is normalized; reinterpret against the current resolution.
        let pos = phase * size as f32;
        let whole = pos as usize; // pos >= 0, truncation == floor
        let frac = pos - whole as f32;
        let idx0 = whole % size;
        let idx1 = (idx0 + 1) % size;
        let sample = table[idx0] + (table[idx1] - table[idx0]) * frac;

        let duty = scale * sample;
        let duty = if duty.is_finite() { duty.clamp(0.0, 1.0) } else { 0.0 };
        self.pwm.set_duty(duty);

        // Advance one table step, wrapping to keep phase in [0, 1).
        let mut next = phase + 1.0 / size as f32;
        if next >= 1.0 {
            next -= 1.0;
        }
        self.state.phase.store(next.to_bits(), Ordering::Relaxed);
    }

    /// The PWM output, for inspection.
    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Release the PWM output.
    pub fn into_pwm(self) -> P {
        self.pwm
    }
}
