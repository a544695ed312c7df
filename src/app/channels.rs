//! Inter-task communication for the LED service.
//!
//! ```text
//! ┌──────────┐  bool   ┌──────────┐ RequestedPattern ┌──────────────┐
//! │ producer │───────▶│ selector │─────────────────▶│  blink task  │
//! └──────────┘         └──────────┘                  └──────────────┘
//!                           ▲
//!                 ShutdownSignal (stop)
//! ```
//!
//! The connection channel and the shutdown signal use `embassy-sync`
//! primitives so both tasks can await them. The requested pattern is a
//! plain atomic register: one writer (selector), one reader (blink task).

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::drivers::led_patterns::BlinkPattern;

/// Channel depth for connection-state events.
pub const STATE_QUEUE_DEPTH: usize = 8;

/// Connection-state events: `true` = connected, `false` = not connected.
pub type ConnectionChannel = Channel<CriticalSectionRawMutex, bool, STATE_QUEUE_DEPTH>;

/// Raised once by `stop()` to end the selector.
pub type ShutdownSignal = Signal<CriticalSectionRawMutex, ()>;

/// Single-value register holding the currently requested pattern.
#[derive(Debug)]
pub struct RequestedPattern(AtomicU8);

impl RequestedPattern {
    pub const fn new(initial: BlinkPattern) -> Self {
        Self(AtomicU8::new(initial as u8))
    }

    pub fn load(&self) -> BlinkPattern {
        BlinkPattern::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, pattern: BlinkPattern) {
        self.0.store(pattern as u8, Ordering::Release);
    }
}

impl Default for RequestedPattern {
    fn default() -> Self {
        Self::new(BlinkPattern::Off)
    }
}
