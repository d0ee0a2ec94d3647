use core::sync::atomic::{AtomicU16, Ordering};

/// Highest accepted main motor duty cycle, in percent.
pub const MAX_DUTY_PERCENT: u8 = 100;

/// Rig operating mode, written by the mode-transition logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    Idle = 0,
    Calibrate = 1,
    Landed = 2,
    Flying = 3,
    Landing = 4,
}

impl Mode {
    /// Unknown encodings decode to `Idle` so the motor is never driven by accident.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Mode::Calibrate,
            2 => Mode::Landed,
            3 => Mode::Flying,
            4 => Mode::Landing,
            _ => Mode::Idle,
        }
    }

    /// True for the modes in which the main rotor is powered.
    pub const fn drives_motor(self) -> bool {
        matches!(self, Mode::Flying | Mode::Landing)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError {
    DutyOutOfRange(u8),
}

/// A consistent copy of the operating status taken with one atomic load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    pub mode: Mode,
    pub main_duty: u8,
}

impl StatusSnapshot {
    const fn pack(self) -> u16 {
        ((self.mode as u16) << 8) | self.main_duty as u16
    }

    const fn unpack(word: u16) -> Self {
        Self {
            mode: Mode::from_u8((word >> 8) as u8),
            main_duty: (word & 0x00ff) as u8,
        }
    }
}

/// Shared operating status.
///
/// Mode and duty live in one `AtomicU16` (mode in the high byte, duty in the
/// low byte) so readers can never observe a mode from one update paired with
/// a duty from another.
pub struct OperatingStatus {
    word: AtomicU16,
}

impl OperatingStatus {
    /// Starts `Idle` with zero duty.
    pub const fn new() -> Self {
        Self {
            word: AtomicU16::new(0),
        }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::unpack(self.word.load(Ordering::Acquire))
    }

    pub fn mode(&self) -> Mode {
        self.snapshot().mode
    }

    pub fn main_duty(&self) -> u8 {
        self.snapshot().main_duty
    }

    pub fn set_mode(&self, mode: Mode) {
        self.modify(|s| StatusSnapshot { mode, ..s });
    }

    /// Rejects anything above [`MAX_DUTY_PERCENT`] and leaves the record untouched.
    pub fn set_main_duty(&self, percent: u8) -> Result<(), StatusError> {
        check_duty(percent)?;
        self.modify(|s| StatusSnapshot {
            main_duty: percent,
            ..s
        });
        Ok(())
    }

    pub fn update(&self, mode: Mode, percent: u8) -> Result<(), StatusError> {
        check_duty(percent)?;
        let next = StatusSnapshot {
            mode,
            main_duty: percent,
        };
        self.word.store(next.pack(), Ordering::Release);
        Ok(())
    }

    fn modify(&self, f: impl Fn(StatusSnapshot) -> StatusSnapshot) {
        // The closure never returns None, so fetch_update cannot fail.
        let _ = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                Some(f(StatusSnapshot::unpack(word)).pack())
            });
    }
}

impl Default for OperatingStatus {
    fn default() -> Self {
        Self::new()
    }
}

fn check_duty(percent: u8) -> Result<(), StatusError> {
    if percent > MAX_DUTY_PERCENT {
        return Err(StatusError::DutyOutOfRange(percent));
    }
    Ok(())
}
