use crate::status::StatusSnapshot;
use crate::timing::{pulse_width, PwmClock, PwmTiming};

/// One PWM generator output as seen by the motor task.
///
/// Periods and pulse widths are full-cycle counts of the divided clock; the
/// implementation maps them onto whatever its counter registers expect.
pub trait PwmGenerator {
    type Error;

    fn set_output(&mut self, enabled: bool) -> Result<(), Self::Error>;
    fn set_period(&mut self, ticks: u32) -> Result<(), Self::Error>;
    fn set_pulse_width(&mut self, ticks: u32) -> Result<(), Self::Error>;
}

/// What a tick left the output doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputState {
    Idle,
    Driving { duty: u8, timing: PwmTiming },
}

impl OutputState {
    pub const fn is_driving(&self) -> bool {
        matches!(self, OutputState::Driving { .. })
    }
}

/// Drives the main rotor generator from operating status snapshots.
pub struct MotorOutput<G> {
    generator: G,
    period: u32,
}

impl<G: PwmGenerator> MotorOutput<G> {
    pub fn new(generator: G, clock: PwmClock) -> Self {
        Self {
            generator,
            period: clock.period(),
        }
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// One poll: drive the output in `Flying`/`Landing`, disable it otherwise.
    ///
    /// The output is switched exactly once per call. In the idle branch the
    /// duty cycle is neither read nor programmed.
    pub fn tick(&mut self, status: StatusSnapshot) -> Result<OutputState, G::Error> {
        if status.mode.drives_motor() {
            self.generator.set_output(true)?;
            let timing = self.set_duty_cycle(status.main_duty)?;
            Ok(OutputState::Driving {
                duty: status.main_duty,
                timing,
            })
        } else {
            self.generator.set_output(false)?;
            Ok(OutputState::Idle)
        }
    }

    /// Programs the period followed by the pulse width for `duty_percent`.
    /// The period is rewritten every time even though it never changes.
    pub fn set_duty_cycle(&mut self, duty_percent: u8) -> Result<PwmTiming, G::Error> {
        let timing = PwmTiming {
            period: self.period,
            pulse_width: pulse_width(self.period, duty_percent),
        };
        self.generator.set_period(timing.period)?;
        self.generator.set_pulse_width(timing.pulse_width)?;
        Ok(timing)
    }
}
