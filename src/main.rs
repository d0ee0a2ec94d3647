#![no_std]
#![no_main]

mod board;
mod drivers;
mod state;
mod tasks;

use defmt::{error, info};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use crate::board::Board;
use crate::state::OPERATING_STATUS;
use crate::tasks::motor_task::motor_task_init;

// ── Executors ─────────────────────────────────────────────────────────────────
//  The motor task runs on its own interrupt executor so it preempts everything
//  on the thread-mode executor. UART5 is unused on this board and lends its
//  vector.
static EXECUTOR_MOTOR: InterruptExecutor = InterruptExecutor::new();
const MOTOR_TASK_PRIORITY: Priority = Priority::P6;

#[interrupt]
unsafe fn UART5() {
    EXECUTOR_MOTOR.on_interrupt()
}

// ── Main ──────────────────────────────────────────────────────────────────────
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // 1. Board init (168 MHz PLL)
    let board = Board::init();
    let p = board.p;

    // 2. Heartbeat LED (PC13)
    let mut led = Output::new(p.PC13, Level::High, Speed::Low);

    // 3. Main rotor output on TIM3 CH3 / PB0, high priority executor
    interrupt::UART5.set_priority(MOTOR_TASK_PRIORITY);
    let motor_spawner = EXECUTOR_MOTOR.start(interrupt::UART5);

    if let Err(e) = motor_task_init(motor_spawner, p.TIM3, p.PB0, &OPERATING_STATUS) {
        // The ESC sees no pulses; keep the heartbeat so the fault is visible.
        error!("main rotor init failed: {}", e);
    }

    info!("mode {}, duty {}%", OPERATING_STATUS.mode(), OPERATING_STATUS.main_duty());

    // 4. Main task: LED heartbeat @ 1 Hz
    loop {
        led.toggle();
        Timer::after(Duration::from_millis(500)).await;
    }
}
