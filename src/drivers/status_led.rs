//! Single-line status LED.
//!
//! Applies the configured polarity inversion and forwards the level to
//! the underlying [`OutputLine`]. Write failures are returned to the
//! caller unchanged; there are no retries here.

use crate::app::ports::OutputLine;
use crate::drivers::led_patterns::Level;
use crate::error::DeviceError;

pub struct StatusLed<L: OutputLine> {
    line: L,
    invert: bool,
    /// Last logical level written successfully.
    current: Option<Level>,
}

impl<L: OutputLine> StatusLed<L> {
    pub fn new(line: L, invert: bool) -> Self {
        Self {
            line,
            invert,
            current: None,
        }
    }

    /// Drive the LED to a logical level.
    pub fn set_output(&mut self, level: Level) -> Result<(), DeviceError> {
        let physical = if self.invert { level.inverted() } else { level };
        self.line.write_level(physical)?;
        self.current = Some(level);
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), DeviceError> {
        self.set_output(Level::Low)
    }

    pub fn current_level(&self) -> Option<Level> {
        self.current
    }

    /// Hand the line back to the system.
    pub fn release(self) -> Result<(), DeviceError> {
        self.line.release()
    }
}
