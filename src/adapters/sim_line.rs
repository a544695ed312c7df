//! Simulated GPIO lines for host runs without hardware.
//!
//! Tracks the physical level in memory and logs every transition, the
//! same way the firmware drivers behave on non-hardware targets.

use log::{debug, info};

use crate::app::ports::{LineProvider, OutputLine};
use crate::drivers::led_patterns::Level;
use crate::error::DeviceError;

#[derive(Debug, Default)]
pub struct SimLineProvider;

impl SimLineProvider {
    pub fn new() -> Self {
        Self
    }
}

impl LineProvider for SimLineProvider {
    type Line = SimLine;

    fn open(&mut self, chip: &str, line: u32) -> Result<SimLine, DeviceError> {
        if chip.is_empty() {
            return Err(DeviceError::ChipNotFound);
        }
        info!("SIM: requested {} line {} as output", chip, line);
        Ok(SimLine {
            name: format!("{chip}:{line}"),
            level: Level::Low,
        })
    }
}

#[derive(Debug)]
pub struct SimLine {
    name: String,
    level: Level,
}

impl SimLine {
    pub fn level(&self) -> Level {
        self.level
    }
}

impl OutputLine for SimLine {
    fn write_level(&mut self, level: Level) -> Result<(), DeviceError> {
        if level != self.level {
            debug!("SIM: {} -> {:?}", self.name, level);
        }
        self.level = level;
        Ok(())
    }

    fn release(self) -> Result<(), DeviceError> {
        info!("SIM: released {}", self.name);
        Ok(())
    }
}
