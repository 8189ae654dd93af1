//! # nut-input
//!
//! Character-input engine for line editors, with no heap allocation in the core.
//!
//! **Key features:**
//! - **Typeahead buffer** - Fixed-capacity FIFO with stuff, unget and pending-key support
//! - **Prioritized key reader** - Pending key, macro, typeahead, then the raw source
//! - **Signal-aware reads** - Interrupted reads retry, fatal signals end the read
//! - **Event-hook polling** - Gather available input and run a callback while idle
//! - **Multibyte assembly** - Incremental decoders for UTF-8 and single-byte encodings
//! - **Flexible I/O** - Platform-agnostic raw input trait
//!
//! ## Optional Features
//!
//! - `std` - POSIX descriptor input (`pselect`, `FIONREAD`) and signal monitoring
//! - `multibyte` - Multibyte character assembly on top of the key reader
//! - `tracing` - Debug logging through the `tracing` crate
//! - `keytest` - The `nut-input-keytest` diagnostic binary
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[cfg(feature = "std")]
extern crate std;

extern crate heapless;

// ============================================================================
// Module Declarations
// ============================================================================

// Configuration and errors
pub mod config;
pub mod error;
pub mod signal;

// Raw input sources
pub mod console;
pub mod io;
#[cfg(all(unix, feature = "std"))]
pub mod posix;

// Decoding and buffering
pub mod decoder;
pub mod typeahead;

// Session orchestration
pub mod hooks;
pub mod session;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Core I/O
pub use io::RawInput;

// Configuration
pub use config::{DefaultConfig, FastConfig, InputConfig, KeyboardTimeout};

// Error types
pub use error::{InputError, RawError};

// Signals
pub use signal::{NoSignals, Signal, SignalCheck};

// Buffering and decoding
pub use decoder::{Decoded, MbDecoder, SingleByteDecoder, Utf8Decoder};
pub use typeahead::TypeaheadBuffer;

// Session types
pub use hooks::{EventHook, InputHooks, Keymap, NoHooks, TextSink};
pub use session::{InputSession, InputState, PendingKey, SessionFlags};

#[cfg(feature = "multibyte")]
pub use session::MbRead;

// Platform sources
pub use console::{ConsoleEvents, ConsoleInput};
#[cfg(all(unix, feature = "std"))]
pub use posix::{CaughtSignals, FdInput};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
