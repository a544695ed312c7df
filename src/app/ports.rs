//! Port traits: the hexagonal boundary between the LED service and the
//! GPIO backend.
//!
//! ```text
//!   LineProvider ──open──▶ OutputLine ──▶ StatusLed ──▶ blink task
//! ```
//!
//! Adapters (sysfs, embedded-hal pins, simulation) implement these traits.
//! The [`LedService`](super::service::LedService) consumes them via
//! generics, so the service core never touches hardware directly.

use crate::drivers::led_patterns::Level;
use crate::error::DeviceError;

// ───────────────────────────────────────────────────────────────
// Output line (driven adapter: service → hardware)
// ───────────────────────────────────────────────────────────────

/// One exclusively owned digital output line.
pub trait OutputLine {
    /// Drive the physical line to `level`.
    fn write_level(&mut self, level: Level) -> Result<(), DeviceError>;

    /// Return the line to the system. Consumes the handle, so a line is
    /// released at most once.
    fn release(self) -> Result<(), DeviceError>
    where
        Self: Sized;
}

// ───────────────────────────────────────────────────────────────
// Line provider (acquisition)
// ───────────────────────────────────────────────────────────────

/// Acquires output lines from a GPIO controller.
pub trait LineProvider {
    type Line: OutputLine;

    /// Request `line` on `chip` as an output, initially driven low.
    fn open(&mut self, chip: &str, line: u32) -> Result<Self::Line, DeviceError>;
}
