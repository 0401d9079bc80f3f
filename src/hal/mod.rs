//! Hardware abstraction seam.
//!
//! Business logic stays in the core modules; implementations of these traits
//! are board bring-up (pin setup, timer/PWM peripheral plumbing) and live
//! outside this crate. Host tests substitute recording mocks.

/// PWM duty-cycle output pin.
///
/// The carrier period is fixed by bring-up and is much shorter than one
/// sample interval; after external low-pass filtering, duty 0 reads as 0 V
/// and duty 1 as the supply rail.
pub trait PwmOutput {
    /// Set the output duty cycle, `duty` in [0, 1].
    fn set_duty(&mut self, duty: f32);
}

/// The periodic hardware timer driving [`crate::oscillator::Sampler::tick`].
///
/// Ticks are delivered one at a time: the next tick is scheduled a full
/// period after the previous one, never concurrently.
pub trait SampleTimer {
    /// Stop delivering ticks. Idempotent.
    fn suspend(&mut self);

    /// (Re)start tick delivery with `interval_us` microseconds between ticks.
    fn resume(&mut self, interval_us: u32);
}
