//! Linux sysfs GPIO backend (feature `sysfs`).
//!
//! Resolves a controller name (`gpiochipN` or `/dev/gpiochipN`) to its
//! sysfs base number, exports `base + line` and configures it as an
//! output driven low. On release the line is switched back to an input
//! before it is unexported, leaving the pin floating rather than driven.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use log::{info, warn};
use sysfs_gpio::{Direction, Pin};

use crate::app::ports::{LineProvider, OutputLine};
use crate::drivers::led_patterns::Level;
use crate::error::DeviceError;

/// Attempts to configure direction while udev adjusts permissions on a
/// freshly exported pin.
const EXPORT_SETTLE_ATTEMPTS: u32 = 10;
const EXPORT_SETTLE_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug)]
pub struct SysfsLineProvider {
    sysfs_root: PathBuf,
}

impl SysfsLineProvider {
    pub fn new() -> Self {
        Self {
            sysfs_root: PathBuf::from("/sys"),
        }
    }

    /// Read `base` and `ngpio` for a controller.
    fn chip_range(&self, chip: &str) -> Result<(u64, u64), DeviceError> {
        let name = chip.trim_start_matches("/dev/");
        let dir = self.chip_dir(name).ok_or(DeviceError::ChipNotFound)?;
        let read = |file: &str| -> Result<u64, DeviceError> {
            fs::read_to_string(dir.join(file))
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .ok_or(DeviceError::ChipNotFound)
        };
        Ok((read("base")?, read("ngpio")?))
    }

    /// Character-device names live under `bus/gpio/devices`, with the
    /// legacy sysfs entry nested below; fall back to `class/gpio/<name>`.
    fn chip_dir(&self, name: &str) -> Option<PathBuf> {
        let nested = self.sysfs_root.join("bus/gpio/devices").join(name).join("gpio");
        if let Ok(entries) = fs::read_dir(&nested) {
            for entry in entries.flatten() {
                if entry.file_name().to_string_lossy().starts_with("gpiochip") {
                    return Some(entry.path());
                }
            }
        }
        let legacy = self.sysfs_root.join("class/gpio").join(name);
        legacy.join("base").exists().then_some(legacy)
    }
}

impl Default for SysfsLineProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LineProvider for SysfsLineProvider {
    type Line = SysfsLine;

    fn open(&mut self, chip: &str, line: u32) -> Result<SysfsLine, DeviceError> {
        let (base, ngpio) = self.chip_range(chip)?;
        if u64::from(line) >= ngpio {
            warn!("sysfs: line {} out of range for {} ({} lines)", line, chip, ngpio);
            return Err(DeviceError::LineUnavailable);
        }

        let pin = Pin::new(base + u64::from(line));
        pin.export().map_err(|e| {
            warn!("sysfs: export of gpio{} failed: {}", pin.get_pin_num(), e);
            DeviceError::LineUnavailable
        })?;

        let mut attempt = 0;
        loop {
            match pin.set_direction(Direction::Low) {
                Ok(()) => break,
                Err(e) if attempt + 1 >= EXPORT_SETTLE_ATTEMPTS => {
                    warn!("sysfs: gpio{} not configurable as output: {}", pin.get_pin_num(), e);
                    if let Err(e) = pin.unexport() {
                        warn!("sysfs: gpio{} unexport after failed setup: {}", pin.get_pin_num(), e);
                    }
                    return Err(DeviceError::LineUnavailable);
                }
                Err(_) => {
                    attempt += 1;
                    thread::sleep(EXPORT_SETTLE_DELAY);
                }
            }
        }

        info!("sysfs: gpio{} ({} line {}) exported as output", pin.get_pin_num(), chip, line);
        Ok(SysfsLine { pin })
    }
}

#[derive(Debug)]
pub struct SysfsLine {
    pin: Pin,
}

impl OutputLine for SysfsLine {
    fn write_level(&mut self, level: Level) -> Result<(), DeviceError> {
        self.pin.set_value(level as u8).map_err(|e| {
            warn!("sysfs: gpio{} write failed: {}", self.pin.get_pin_num(), e);
            DeviceError::WriteFailed
        })
    }

    fn release(self) -> Result<(), DeviceError> {
        let num = self.pin.get_pin_num();
        let reconfigured = self.pin.set_direction(Direction::In);
        if let Err(e) = &reconfigured {
            warn!("sysfs: gpio{} reconfigure as input failed: {}", num, e);
        }
        self.pin.unexport().map_err(|e| {
            warn!("sysfs: gpio{} unexport failed: {}", num, e);
            DeviceError::ReleaseFailed
        })?;
        reconfigured.map_err(|_| DeviceError::ReleaseFailed)
    }
}
