use defmt::{info, warn};
use embassy_executor::{task, SendSpawner, SpawnError};
use embassy_stm32::peripherals::{PB0, TIM3};
use embassy_time::{Duration, Ticker};
use rotor_pwm::{MotorOutput, OperatingStatus, PwmClock, TimingError};

use crate::board::APB1_TIMER_CLOCK_HZ;
use crate::drivers::main_rotor::{MainRotorPwm, PwmError};

// ── Output configuration ──────────────────────────────────────────────────────

/// Status poll period (40 Hz)
const POLL_PERIOD: Duration = Duration::from_millis(25);
/// Timer clock prescaler
const PWM_DIVIDER: u32 = 64;
/// ESC input frequency
const PWM_FIXED_RATE_HZ: u32 = 200;

#[derive(Debug, defmt::Format)]
pub enum InitError {
    Timing(TimingError),
    Pwm(PwmError),
    Spawn(SpawnError),
}

impl From<TimingError> for InitError {
    fn from(e: TimingError) -> Self {
        InitError::Timing(e)
    }
}

impl From<PwmError> for InitError {
    fn from(e: PwmError) -> Self {
        InitError::Pwm(e)
    }
}

impl From<SpawnError> for InitError {
    fn from(e: SpawnError) -> Self {
        InitError::Spawn(e)
    }
}

// ── Task ─────────────────────────────────────────────────────────────────────

/// Main rotor output task — polls the operating status at 40 Hz and drives
/// the ESC only while flying or landing.
#[task]
pub async fn motor_task(
    mut output: MotorOutput<MainRotorPwm>,
    status: &'static OperatingStatus,
) -> ! {
    info!("motor task starting");

    // Ticker deadlines advance from the previous deadline, not from when the
    // loop body finished, so the poll rate does not drift.
    let mut ticker = Ticker::every(POLL_PERIOD);
    let mut was_driving = false;

    loop {
        match output.tick(status.snapshot()) {
            Ok(state) => {
                if state.is_driving() != was_driving {
                    info!("main rotor: {}", state);
                    was_driving = state.is_driving();
                }
            }
            Err(e) => warn!("main rotor output: {}", e),
        }

        ticker.next().await;
    }
}

/// Configures TIM3 for the main rotor and spawns [`motor_task`] on `spawner`.
pub fn motor_task_init(
    spawner: SendSpawner,
    tim: TIM3,
    pin: PB0,
    status: &'static OperatingStatus,
) -> Result<(), InitError> {
    let clock = PwmClock::new(APB1_TIMER_CLOCK_HZ, PWM_DIVIDER, PWM_FIXED_RATE_HZ)?;
    let rotor = MainRotorPwm::new(tim, pin, &clock)?;

    spawner.spawn(motor_task(MotorOutput::new(rotor, clock), status))?;

    info!(
        "motor task initialized: {} Hz, period {} ticks",
        clock.rate_hz(),
        clock.period()
    );
    Ok(())
}
