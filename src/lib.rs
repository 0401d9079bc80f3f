//! # PwmSineSynth
//!
//! Real-time analog sine synthesis over a PWM output, driven by a
//! line-oriented host command protocol.
//!
//! ## Architecture
//!
//! ```text
//! host line ──▶ CommandHandler ──▶ Reconfigurator ──▶ OscillatorState
//!               (main loop)        (suspend/resume)        │
//!                                                          ▼
//!                 PWM pin ◀── Sampler::tick ◀── hardware timer ISR
//! ```
//!
//! Two contexts share the oscillator state:
//! - The main loop assembles lines, parses commands, and reconfigures.
//! - The timer interrupt runs [`Sampler::tick`] once per sample interval.
//!
//! Scalar fields cross that boundary as atomics. The waveform table and its
//! size are a compound resource, mutated only while the sample timer is
//! suspended, so a tick never indexes a table that does not match its size.
//!
//! Hardware access goes through the [`hal`] traits; the crate itself is
//! `no_std` and target-agnostic, and the whole engine runs under host tests.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod hal;
pub mod logging;
pub mod oscillator;
pub mod policy;
pub mod protocol;
pub mod wavetable;

pub use config::SynthConfig;
pub use control::{Applied, ApplyError, Reconfigurator};
pub use oscillator::{OscillatorState, Sampler};
pub use policy::{Band, PolicyError, TableSizePolicy};
pub use protocol::{Command, CommandHandler, ParseError};
pub use wavetable::MAX_TABLE_SIZE;
