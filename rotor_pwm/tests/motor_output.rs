use rotor_pwm::*;
extern crate std;
use std::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Call {
    Output(bool),
    Period(u32),
    PulseWidth(u32),
}

#[derive(Default)]
struct RecordingGenerator {
    calls: Vec<Call>,
    fail_pulse_width: bool,
}

#[derive(Debug, PartialEq, Eq)]
struct Rejected;

impl PwmGenerator for RecordingGenerator {
    type Error = Rejected;

    fn set_output(&mut self, enabled: bool) -> Result<(), Rejected> {
        self.calls.push(Call::Output(enabled));
        Ok(())
    }

    fn set_period(&mut self, ticks: u32) -> Result<(), Rejected> {
        self.calls.push(Call::Period(ticks));
        Ok(())
    }

    fn set_pulse_width(&mut self, ticks: u32) -> Result<(), Rejected> {
        if self.fail_pulse_width {
            return Err(Rejected);
        }
        self.calls.push(Call::PulseWidth(ticks));
        Ok(())
    }
}

fn bench_output() -> MotorOutput<RecordingGenerator> {
    let clock = PwmClock::new(16_000_000, 64, 200).unwrap();
    MotorOutput::new(RecordingGenerator::default(), clock)
}

fn take_calls(output: &mut MotorOutput<RecordingGenerator>) -> Vec<Call> {
    core::mem::take(&mut output.generator_mut().calls)
}

fn snapshot(mode: Mode, main_duty: u8) -> StatusSnapshot {
    StatusSnapshot { mode, main_duty }
}

#[test]
fn test_idle_modes_only_disable_output() {
    let mut output = bench_output();
    for mode in [Mode::Idle, Mode::Calibrate, Mode::Landed] {
        let state = output.tick(snapshot(mode, 80)).unwrap();
        assert_eq!(state, OutputState::Idle);
        assert_eq!(take_calls(&mut output), [Call::Output(false)]);
    }
}

#[test]
fn test_driving_modes_apply_duty() {
    let mut output = bench_output();
    for mode in [Mode::Flying, Mode::Landing] {
        let state = output.tick(snapshot(mode, 50)).unwrap();
        assert_eq!(
            state,
            OutputState::Driving {
                duty: 50,
                timing: PwmTiming {
                    period: 1250,
                    pulse_width: 625
                }
            }
        );
        assert_eq!(
            take_calls(&mut output),
            [Call::Output(true), Call::Period(1250), Call::PulseWidth(625)]
        );
    }
}

#[test]
fn test_duty_endpoints() {
    let mut output = bench_output();
    assert_eq!(output.set_duty_cycle(0).unwrap().pulse_width, 0);
    assert_eq!(output.set_duty_cycle(100).unwrap().pulse_width, 1250);
    assert_eq!(
        take_calls(&mut output),
        [
            Call::Period(1250),
            Call::PulseWidth(0),
            Call::Period(1250),
            Call::PulseWidth(1250)
        ]
    );
}

#[test]
fn test_set_duty_cycle_is_repeatable() {
    let mut output = bench_output();
    let first = output.set_duty_cycle(37).unwrap();
    let first_calls = take_calls(&mut output);
    let second = output.set_duty_cycle(37).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_calls, take_calls(&mut output));
}

#[test]
fn test_mode_transitions_follow_shared_status() {
    let status = OperatingStatus::new();
    let mut output = bench_output();

    status.update(Mode::Idle, 75).unwrap();
    assert_eq!(output.tick(status.snapshot()).unwrap(), OutputState::Idle);

    status.set_mode(Mode::Flying);
    let state = output.tick(status.snapshot()).unwrap();
    assert!(state.is_driving());
    take_calls(&mut output);

    status.set_mode(Mode::Landed);
    assert_eq!(output.tick(status.snapshot()).unwrap(), OutputState::Idle);
    assert_eq!(take_calls(&mut output), [Call::Output(false)]);
}

#[test]
fn test_idle_to_flying_programs_three_quarters() {
    let mut output = bench_output();
    output.tick(snapshot(Mode::Idle, 75)).unwrap();
    take_calls(&mut output);

    output.tick(snapshot(Mode::Flying, 75)).unwrap();
    assert_eq!(
        take_calls(&mut output),
        [Call::Output(true), Call::Period(1250), Call::PulseWidth(937)]
    );
}

#[test]
fn test_duty_follows_latest_status() {
    let status = OperatingStatus::new();
    let mut output = bench_output();
    status.update(Mode::Landing, 20).unwrap();
    output.tick(status.snapshot()).unwrap();
    status.set_main_duty(90).unwrap();
    let state = output.tick(status.snapshot()).unwrap();
    assert_eq!(
        state,
        OutputState::Driving {
            duty: 90,
            timing: PwmTiming {
                period: 1250,
                pulse_width: 1125
            }
        }
    );
}

#[test]
fn test_out_of_range_snapshot_is_clamped() {
    let mut output = bench_output();
    output.tick(snapshot(Mode::Flying, 200)).unwrap();
    assert_eq!(
        take_calls(&mut output),
        [Call::Output(true), Call::Period(1250), Call::PulseWidth(1250)]
    );
}

#[test]
fn test_generator_error_propagates() {
    let mut output = bench_output();
    output.generator_mut().fail_pulse_width = true;
    assert_eq!(output.tick(snapshot(Mode::Flying, 10)), Err(Rejected));
    assert_eq!(
        take_calls(&mut output),
        [Call::Output(true), Call::Period(1250)]
    );
}
