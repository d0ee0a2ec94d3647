#![cfg_attr(not(test), no_std)]

//! Main rotor PWM output logic, independent of any particular timer peripheral.
//!
//! The firmware supplies a [`PwmGenerator`] for its timer and a shared
//! [`OperatingStatus`]; [`MotorOutput::tick`] decides what to program on
//! every poll.

mod counter;
mod output;
mod status;
mod timing;

pub use counter::{center_aligned, center_aligned_arr, prescaler, CenterAligned, CounterError};
pub use output::{MotorOutput, OutputState, PwmGenerator};
pub use status::{Mode, OperatingStatus, StatusError, StatusSnapshot, MAX_DUTY_PERCENT};
pub use timing::{PwmClock, PwmTiming, TimingError};
