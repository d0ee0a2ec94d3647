//! Shared state read by the motor task and written by the attitude and
//! mode-transition tasks.
//!
//! `OperatingStatus` packs mode and main duty into one atomic word, so a
//! plain `static` is enough; no mutex or channel is involved.

use rotor_pwm::OperatingStatus;

pub static OPERATING_STATUS: OperatingStatus = OperatingStatus::new();
