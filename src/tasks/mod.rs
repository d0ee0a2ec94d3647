pub mod motor_task;
