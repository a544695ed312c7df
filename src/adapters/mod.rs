//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements               | Connects to                  |
//! |------------|--------------------------|------------------------------|
//! | `pin_line` | OutputLine               | any embedded-hal `OutputPin` |
//! | `sim_line` | LineProvider, OutputLine | in-memory simulation         |
//! | `sysfs`    | LineProvider, OutputLine | Linux `/sys/class/gpio`      |

pub mod pin_line;
pub mod sim_line;
#[cfg(feature = "sysfs")]
pub mod sysfs;
