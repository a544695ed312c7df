//! Unified error types for the LED service.
//!
//! A single `Error` enum that every subsystem converts into. All variants
//! are `Copy` so they can be passed through the service lifecycle and the
//! worker thread without allocation. Detailed causes from the underlying
//! GPIO backend are logged where they occur.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level service error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The output line could not be acquired, written or released.
    Device(DeviceError),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// An operation was requested in the wrong lifecycle state.
    Lifecycle(&'static str),
    /// The worker thread could not be created.
    Spawn,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "device: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Lifecycle(msg) => write!(f, "lifecycle: {msg}"),
            Self::Spawn => write!(f, "worker thread spawn failed"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Device errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// The GPIO controller does not exist or cannot be queried.
    ChipNotFound,
    /// The line could not be requested as an output.
    LineUnavailable,
    /// Setting the output value failed.
    WriteFailed,
    /// Returning the line to the system failed.
    ReleaseFailed,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChipNotFound => write!(f, "GPIO chip not found"),
            Self::LineUnavailable => write!(f, "GPIO line unavailable"),
            Self::WriteFailed => write!(f, "GPIO write failed"),
            Self::ReleaseFailed => write!(f, "GPIO release failed"),
        }
    }
}

impl std::error::Error for DeviceError {}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
