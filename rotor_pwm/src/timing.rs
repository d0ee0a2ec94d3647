use crate::status::MAX_DUTY_PERCENT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    ZeroDivider,
    ZeroRate,
    /// `clock / divider / rate` truncates to zero ticks.
    PeriodTooShort,
}

/// Period and high time of one PWM cycle, in divided-clock ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    pub period: u32,
    pub pulse_width: u32,
}

/// Clock configuration of a PWM generator running at a fixed rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmClock {
    clock_hz: u32,
    divider: u32,
    rate_hz: u32,
}

impl PwmClock {
    pub const fn new(clock_hz: u32, divider: u32, rate_hz: u32) -> Result<Self, TimingError> {
        if divider == 0 {
            return Err(TimingError::ZeroDivider);
        }
        if rate_hz == 0 {
            return Err(TimingError::ZeroRate);
        }
        if clock_hz / divider / rate_hz == 0 {
            return Err(TimingError::PeriodTooShort);
        }
        Ok(Self {
            clock_hz,
            divider,
            rate_hz,
        })
    }

    pub const fn divider(&self) -> u32 {
        self.divider
    }

    pub const fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    /// Counter ticks per PWM cycle. Divides by the prescaler first, then by
    /// the rate, truncating at each step.
    pub const fn period(&self) -> u32 {
        self.clock_hz / self.divider / self.rate_hz
    }

    /// High time for `duty_percent`, clamped to 100 %.
    pub const fn pulse_width(&self, duty_percent: u8) -> u32 {
        pulse_width(self.period(), duty_percent)
    }
}

/// `period * duty / 100`, multiplying before the truncating division.
pub(crate) const fn pulse_width(period: u32, duty_percent: u8) -> u32 {
    let duty = if duty_percent > MAX_DUTY_PERCENT {
        MAX_DUTY_PERCENT
    } else {
        duty_percent
    };
    (period as u64 * duty as u64 / 100) as u32
}
