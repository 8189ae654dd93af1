//! Configuration traits and implementations for input timing.
//!
//! The `InputConfig` trait supplies compile-time defaults for a session.
//! Values that the editor may change while running (the keyboard timeout)
//! are seeded from here and then live in the session state.

use core::time::Duration;

/// Input configuration trait.
///
/// Typeahead capacity is not part of this trait: it sizes a `heapless`
/// buffer and is therefore the session's const generic parameter.
pub trait InputConfig {
    /// Timeout used by availability checks, in microseconds (default: 100 000)
    const KEYBOARD_TIMEOUT_US: u32;
}

/// Default configuration: 0.1 s availability timeout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl InputConfig for DefaultConfig {
    const KEYBOARD_TIMEOUT_US: u32 = 100_000;
}

/// Configuration for callback-driven editors that poll often.
///
/// - KEYBOARD_TIMEOUT_US: 10 ms
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FastConfig;

impl InputConfig for FastConfig {
    const KEYBOARD_TIMEOUT_US: u32 = 10_000;
}

/// Availability-check timeout in microseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyboardTimeout(u32);

impl KeyboardTimeout {
    /// Timeout from a microsecond count.
    pub const fn from_micros(us: u32) -> Self {
        Self(us)
    }

    /// Timeout seeded from a config type.
    pub const fn of<C: InputConfig>() -> Self {
        Self(C::KEYBOARD_TIMEOUT_US)
    }

    /// Microsecond count.
    pub const fn as_micros(self) -> u32 {
        self.0
    }

    /// As a `Duration` for the poller.
    pub fn as_duration(self) -> Duration {
        Duration::from_micros(u64::from(self.0))
    }
}

impl Default for KeyboardTimeout {
    fn default() -> Self {
        Self::of::<DefaultConfig>()
    }
}
