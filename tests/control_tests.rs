//! Reconfiguration controller tests

use pwm_sine_synth::logging::LogRing;
use pwm_sine_synth::protocol::Command;
use pwm_sine_synth::{
    ApplyError, OscillatorState, Reconfigurator, SynthConfig, TableSizePolicy, MAX_TABLE_SIZE,
};

/// Timer stub recording every suspend/resume in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TimerEvent {
    Suspend,
    Resume(u32),
}

#[derive(Default)]
struct MockTimer {
    events: Vec<TimerEvent>,
}

impl pwm_sine_synth::hal::SampleTimer for MockTimer {
    fn suspend(&mut self) {
        self.events.push(TimerEvent::Suspend);
    }

    fn resume(&mut self, interval_us: u32) {
        self.events.push(TimerEvent::Resume(interval_us));
    }
}

fn controller<'a>(
    state: &'a OscillatorState,
    log: &'a LogRing,
) -> Reconfigurator<'a, MockTimer> {
    Reconfigurator::new(
        state,
        MockTimer::default(),
        TableSizePolicy::default(),
        SynthConfig::default(),
        log,
    )
}

#[test]
fn test_scenario_500hz_full_rail() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    let applied = ctl
        .apply(Command { frequency_hz: 500.0, amplitude_v: 3.3 })
        .unwrap();

    assert_eq!(applied.table_size, 50);
    assert_eq!(applied.interval_us, 40, "1e6 / (500 * 50)");
    assert!((applied.amplitude_v - 3.3).abs() < 1e-6);
    assert!(!applied.amplitude_clamped);

    assert_eq!(state.table_size(), 50);
    assert_eq!(state.sample_interval_us(), 40);
    assert!((state.amplitude_scale() - 1.0).abs() < 1e-6);
}

#[test]
fn test_scenario_2khz_overdriven_amplitude() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    let applied = ctl
        .apply(Command { frequency_hz: 2000.0, amplitude_v: 5.0 })
        .unwrap();

    assert_eq!(applied.table_size, 20, "beyond all bands, coarsest size");
    assert_eq!(applied.interval_us, 25, "1e6 / (2000 * 20)");
    assert!((applied.amplitude_v - 3.3).abs() < 1e-6, "clamped to the rail");
    assert!(applied.amplitude_clamped);
    assert!((state.amplitude_scale() - 1.0).abs() < 1e-6);
}

#[test]
fn test_suspend_resume_brackets_table_swap() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    ctl.apply(Command { frequency_hz: 500.0, amplitude_v: 1.0 })
        .unwrap();

    assert_eq!(
        ctl.timer().events,
        vec![TimerEvent::Suspend, TimerEvent::Resume(40)],
        "exactly one suspend, then one resume at the new interval"
    );
}

#[test]
fn test_interval_floored_at_hardware_minimum() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    // 5 kHz x 20 samples wants 10 µs; the floor is 20 µs.
    let applied = ctl
        .apply(Command { frequency_hz: 5000.0, amplitude_v: 1.0 })
        .unwrap();

    assert_eq!(applied.interval_us, 20);
    assert_eq!(ctl.timer().events.last(), Some(&TimerEvent::Resume(20)));
}

#[test]
fn test_invalid_frequency_rejected_wholesale() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    ctl.apply(Command { frequency_hz: 500.0, amplitude_v: 2.0 })
        .unwrap();
    let events_before = ctl.timer().events.len();
    let scale_before = state.amplitude_scale();
    let size_before = state.table_size();
    let interval_before = state.sample_interval_us();

    for bad in [0.0, -10.0, f32::NAN, f32::INFINITY] {
        let err = ctl
            .apply(Command { frequency_hz: bad, amplitude_v: 1.0 })
            .unwrap_err();
        assert_eq!(err, ApplyError::InvalidFrequency);
    }

    assert_eq!(state.amplitude_scale(), scale_before, "no partial application");
    assert_eq!(state.table_size(), size_before);
    assert_eq!(state.sample_interval_us(), interval_before);
    assert_eq!(ctl.timer().events.len(), events_before, "timer untouched");
}

#[test]
fn test_negative_amplitude_clamped_to_zero() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    let applied = ctl
        .apply(Command { frequency_hz: 100.0, amplitude_v: -1.0 })
        .unwrap();

    assert_eq!(applied.amplitude_v, 0.0);
    assert!(applied.amplitude_clamped);
    assert_eq!(state.amplitude_scale(), 0.0);
}

#[test]
fn test_apply_is_idempotent() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);
    let cmd = Command { frequency_hz: 440.0, amplitude_v: 2.5 };

    let first = ctl.apply(cmd).unwrap();
    let mut table_first = [0.0f32; MAX_TABLE_SIZE];
    let size_first = state.table_snapshot(&mut table_first);

    let second = ctl.apply(cmd).unwrap();
    let mut table_second = [0.0f32; MAX_TABLE_SIZE];
    let size_second = state.table_snapshot(&mut table_second);

    assert_eq!(first, second);
    assert_eq!(size_first, size_second);
    assert_eq!(table_first[..size_first], table_second[..size_second]);
}

#[test]
fn test_phase_survives_reconfiguration() {
    struct NullPwm;
    impl pwm_sine_synth::hal::PwmOutput for NullPwm {
        fn set_duty(&mut self, _duty: f32) {}
    }

    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    ctl.apply(Command { frequency_hz: 500.0, amplitude_v: 3.3 })
        .unwrap();

    // Move the oscillator into the cycle before reconfiguring.
    let mut sampler = pwm_sine_synth::Sampler::new(&state, NullPwm);
    for _ in 0..3 {
        sampler.tick();
    }
    let phase_before = state.phase();
    assert!(phase_before > 0.0);

    // Amplitude-only change: same frequency, new amplitude.
    ctl.apply(Command { frequency_hz: 500.0, amplitude_v: 1.0 })
        .unwrap();
    assert_eq!(state.phase(), phase_before);

    // Resolution change: phase still not reset.
    ctl.apply(Command { frequency_hz: 100.0, amplitude_v: 1.0 })
        .unwrap();
    assert_eq!(state.phase(), phase_before);
}

#[test]
fn test_apply_defaults_uses_config() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    let applied = ctl.apply_defaults().unwrap();

    assert_eq!(applied.frequency_hz, 100.0);
    assert_eq!(applied.table_size, 200);
    assert_eq!(applied.interval_us, 50, "1e6 / (100 * 200)");
    assert!((applied.amplitude_v - 3.3).abs() < 1e-6);
}

#[test]
fn test_amplitude_clamp_is_logged() {
    let state = OscillatorState::new();
    let log = LogRing::new();
    let mut ctl = controller(&state, &log);

    ctl.apply(Command { frequency_hz: 100.0, amplitude_v: 9.9 })
        .unwrap();

    let entry = log.drain().expect("clamp warning expected");
    assert_eq!(entry.level, pwm_sine_synth::logging::LogLevel::Warn);
    assert!(entry.as_str().contains("clamped"));
}
