//! Status LED driver, pattern tables and the blink task.

pub mod blink_task;
pub mod led_patterns;
pub mod status_led;
