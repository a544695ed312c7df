//! Connection-state status LED service.
//!
//! Translates a boolean "connected" signal into a blink pattern on one
//! GPIO output line:
//!
//! - LED on: connected.
//! - LED blinking: trying to connect.
//! - LED off: service stopped.
//!
//! Hardware is reached only through the port traits in [`app::ports`];
//! `adapters` provides sysfs, embedded-hal and simulated backends.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;

pub use app::channels::ConnectionChannel;
pub use app::service::{LedService, Lifecycle};
pub use config::LedConfig;
pub use drivers::led_patterns::{BlinkPattern, Level};
pub use error::{DeviceError, Error, Result};
