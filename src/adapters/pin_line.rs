//! `OutputLine` over any embedded-hal output pin.
//!
//! Lets the service drive a pin from a HAL crate (or a GPIO expander)
//! without a dedicated adapter. The pin is set low on release.

use embedded_hal::digital::OutputPin;

use crate::app::ports::OutputLine;
use crate::drivers::led_patterns::Level;
use crate::error::DeviceError;

pub struct PinLine<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> PinLine<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> OutputLine for PinLine<P> {
    fn write_level(&mut self, level: Level) -> Result<(), DeviceError> {
        let res = if level.is_high() {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|e| {
            log::warn!("pin write failed: {:?}", e);
            DeviceError::WriteFailed
        })
    }

    fn release(mut self) -> Result<(), DeviceError> {
        self.pin.set_low().map_err(|_| DeviceError::ReleaseFailed)
    }
}
