//! Blink task: realises the requested pattern on the status LED.
//!
//! Polls the [`RequestedPattern`] register once per base interval and
//! writes the current step of its sequence. The reactor timer
//! (`async-io-mini`) is the only suspension point, so a new pattern is
//! visible within one interval.
//!
//! Termination:
//! - `Exit` observed: LED driven to logical 0, task ends. A failure of
//!   that final write is logged only.
//! - Write failure during normal operation: logged, task ends. A failing
//!   line is treated as persistent and is not retried.
//!
//! The task owns the [`StatusLed`] and hands it back when it returns so
//! the service can release the line after both tasks are done.

use core::time::Duration;

use log::{error, info, warn};

use crate::app::channels::RequestedPattern;
use crate::app::ports::OutputLine;
use crate::drivers::led_patterns::{Level, PatternStepper, Step};
use crate::drivers::status_led::StatusLed;

/// Why the blink task returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkExit {
    /// `Exit` observed, final off-write attempted.
    Shutdown,
    /// A step write failed; LED left at its last successful level.
    WriteFailed,
}

pub async fn run_blink<L: OutputLine>(
    requested: &RequestedPattern,
    mut led: StatusLed<L>,
    interval: Duration,
) -> (StatusLed<L>, BlinkExit) {
    let mut stepper = PatternStepper::new();

    loop {
        match stepper.observe(requested.load()) {
            Step::Exit => {
                if let Err(e) = led.set_output(Level::Low) {
                    warn!("LED: final off write failed: {}", e);
                }
                info!("LED: blink task stopped");
                return (led, BlinkExit::Shutdown);
            }
            Step::Write(level) => {
                if let Err(e) = led.set_output(level) {
                    error!(
                        "LED: write failed in {:?}: {}, stopping blink task",
                        stepper.current(),
                        e
                    );
                    return (led, BlinkExit::WriteFailed);
                }
            }
        }

        async_io_mini::Timer::after(interval).await;
        stepper.advance();
    }
}
