//! Service core: task logic and lifecycle, no direct hardware access.
//!
//! The selector and the LED service talk to the output line only
//! through the **port traits** in [`ports`], keeping this layer fully
//! testable with mock lines.

pub mod channels;
pub mod ports;
pub mod selector;
pub mod service;
