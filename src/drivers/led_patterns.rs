//! Blink pattern tables and the step engine.
//!
//! Each visible pattern is a fixed-length sequence of logical output
//! levels that the driver cycles through at the base interval. `On` and
//! `Off` are degenerate sequences with both steps identical, so a single
//! mechanism covers all three visible states.
//!
//! | Pattern | Steps      | Meaning                 |
//! |---------|------------|-------------------------|
//! | Off     | `[0, 0]`   | Service idle / stopped  |
//! | Blink   | `[0, 1]`   | Trying to connect       |
//! | On      | `[1, 1]`   | Connected               |
//!
//! `Exit` is a sentinel asking the driver to terminate; it has no table
//! entry.

/// Number of steps in every pattern sequence.
pub const PATTERN_STEPS: usize = 2;

/// Logical output value, before polarity inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Level {
    Low = 0,
    High = 1,
}

impl Level {
    /// Flip the level (`v XOR 1`).
    pub const fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

/// What the LED should currently be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BlinkPattern {
    Off = 0,
    Blink = 1,
    On = 2,
    /// Terminal sentinel: stop the driver.
    Exit = 3,
}

const OFF_STEPS: [Level; PATTERN_STEPS] = [Level::Low, Level::Low];
const BLINK_STEPS: [Level; PATTERN_STEPS] = [Level::Low, Level::High];
const ON_STEPS: [Level; PATTERN_STEPS] = [Level::High, Level::High];

impl BlinkPattern {
    /// Pattern shown for a connection state.
    pub const fn for_connection(connected: bool) -> Self {
        if connected { Self::On } else { Self::Blink }
    }

    /// Step sequence for a visible pattern; `None` for [`BlinkPattern::Exit`].
    pub const fn sequence(self) -> Option<&'static [Level; PATTERN_STEPS]> {
        match self {
            Self::Off => Some(&OFF_STEPS),
            Self::Blink => Some(&BLINK_STEPS),
            Self::On => Some(&ON_STEPS),
            Self::Exit => None,
        }
    }

    /// Decode the raw register value. Unknown values are treated as `Exit`.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Off,
            1 => Self::Blink,
            2 => Self::On,
            _ => Self::Exit,
        }
    }
}

/// Outcome of observing the requested pattern for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Drive the line to this logical level.
    Write(Level),
    /// Shutdown requested.
    Exit,
}

/// Driver-local cursor: the last observed pattern and the step index
/// into its sequence.
#[derive(Debug)]
pub struct PatternStepper {
    current: BlinkPattern,
    step: usize,
}

impl PatternStepper {
    pub fn new() -> Self {
        Self {
            current: BlinkPattern::Off,
            step: 0,
        }
    }

    /// Observe the requested pattern and return the level for this step.
    /// A pattern different from the last observed one restarts at step 0.
    pub fn observe(&mut self, requested: BlinkPattern) -> Step {
        let Some(steps) = requested.sequence() else {
            return Step::Exit;
        };
        if requested != self.current {
            self.step = 0;
            self.current = requested;
        }
        Step::Write(steps[self.step])
    }

    /// Move to the next step, wrapping at the sequence length.
    pub fn advance(&mut self) {
        self.step = (self.step + 1) % PATTERN_STEPS;
    }

    pub fn current(&self) -> BlinkPattern {
        self.current
    }

    pub fn step_index(&self) -> usize {
        self.step
    }
}

impl Default for PatternStepper {
    fn default() -> Self {
        Self::new()
    }
}
