use embassy_stm32::gpio::OutputType;
use embassy_stm32::pac;
use embassy_stm32::peripherals::{PB0, TIM3};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::{Channel, CountingMode};
use rotor_pwm::{
    center_aligned, center_aligned_arr, prescaler, CounterError, PwmClock, PwmGenerator,
};

const CHANNEL: Channel = Channel::Ch3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum PwmError {
    Counter(CounterError),
}

impl From<CounterError> for PwmError {
    fn from(e: CounterError) -> Self {
        PwmError::Counter(e)
    }
}

/// Main rotor ESC output: TIM3 channel 3 on PB0 (MOTOR1 pad).
///
/// The timer counts up and down; [`center_aligned`] turns full-cycle tick
/// counts into ARR and CCR.
pub struct MainRotorPwm {
    pwm: SimplePwm<'static, TIM3>,
    period: u32,
}

impl MainRotorPwm {
    pub fn new(tim: TIM3, pin: PB0, clock: &PwmClock) -> Result<Self, PwmError> {
        let psc = prescaler(clock.divider())?;

        // Enables the TIM3 and GPIOB clocks, routes PB0 to AF2 and starts
        // the counter in center-aligned (up-down) mode. Slave mode stays at
        // its reset value, so the counter free-runs unsynchronised.
        let pin = PwmPin::new_ch3(pin, OutputType::PushPull);
        let pwm = SimplePwm::new(
            tim,
            None,
            None,
            Some(pin),
            None,
            Hertz(clock.rate_hz()),
            CountingMode::CenterAlignedBothInterrupts,
        );

        // Replace the HAL's prescaler with the fixed divider so tick counts
        // match `PwmClock`.
        pac::TIM3.psc().write(|w| w.set_psc(psc));

        let mut rotor = Self { pwm, period: 0 };
        rotor.set_period(clock.period())?;
        rotor.set_output(true)?;
        Ok(rotor)
    }
}

impl PwmGenerator for MainRotorPwm {
    type Error = PwmError;

    fn set_output(&mut self, enabled: bool) -> Result<(), PwmError> {
        if enabled {
            self.pwm.enable(CHANNEL);
        } else {
            self.pwm.disable(CHANNEL);
        }
        Ok(())
    }

    fn set_period(&mut self, ticks: u32) -> Result<(), PwmError> {
        let arr = center_aligned_arr(ticks)?;
        // UG restarts the counter, so only touch ARR when the period changes.
        if ticks != self.period {
            pac::TIM3.arr().write(|w| w.set_arr(arr));
            pac::TIM3.egr().write(|w| w.set_ug(true));
            self.period = ticks;
        }
        Ok(())
    }

    fn set_pulse_width(&mut self, ticks: u32) -> Result<(), PwmError> {
        let counts = center_aligned(self.period, ticks)?;
        self.pwm.set_duty(CHANNEL, counts.ccr);
        Ok(())
    }
}
