//! Sine waveform lookup table builder.
//!
//! One full cycle, normalized into [0, 1] so samples scale directly into PWM
//! duty space. Entry 0 sits on the sine midpoint rising edge (value 0.5).

use micromath::F32Ext;

/// Hard capacity of the waveform table.
pub const MAX_TABLE_SIZE: usize = 256;

/// Build a sine table of `size` entries into `buf`.
///
/// Entry `i` is `(sin(2π·i/size) + 1) / 2`. A `size` of 0 leaves `buf`
/// untouched; requests beyond [`MAX_TABLE_SIZE`] are clamped. Returns the
/// effective size written (0 for the no-op case).
///
/// The sample timer must be suspended while this runs: the sampler reads the
/// table from interrupt context and a partial rebuild would tear.
pub fn build(buf: &mut [f32; MAX_TABLE_SIZE], size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    let n = size.min(MAX_TABLE_SIZE);
    fill_sine(&mut buf[..n]);
    n
}

/// Fill `table` with one normalized sine cycle sampled at `table.len()`
/// equally spaced phase points.
pub fn fill_sine(table: &mut [f32]) {
    let n = table.len();
    if n == 0 {
        return;
    }
    let step = core::f32::consts::TAU / n as f32;
    for (i, slot) in table.iter_mut().enumerate() {
        // UFCS keeps the micromath path on hosted test builds too.
        *slot = (F32Ext::sin(step * i as f32) + 1.0) / 2.0;
    }
}
