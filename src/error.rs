//! Error types for key acquisition.
//!
//! Two layers: `RawError` is what an input primitive reports for a single
//! attempt, `InputError` is what the key reader surfaces to the editor once
//! retries and signal handling are done.

use core::fmt;

use crate::signal::Signal;

/// Outcome of a failed raw input primitive.
///
/// Only the blocking byte reader and the gatherer look at these. Transient
/// variants are retried internally and never reach the editor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RawError {
    /// Descriptor is in non-blocking mode and nothing is queued (EAGAIN/EWOULDBLOCK)
    WouldBlock,

    /// Call was interrupted by a signal (EINTR)
    Interrupted,

    /// Device-level I/O failure (EIO), usually a hung-up terminal
    Device,

    /// Any other failure, carrying the platform error code
    Other(i32),
}

impl fmt::Display for RawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawError::WouldBlock => write!(f, "Operation would block"),
            RawError::Interrupted => write!(f, "Interrupted by signal"),
            RawError::Device => write!(f, "Input device error"),
            RawError::Other(code) => write!(f, "Input error (code {})", code),
        }
    }
}

/// Key reader error type.
///
/// These are the only non-character outcomes of
/// [`InputSession::read_key()`](crate::InputSession::read_key).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Input stream closed, or a read failed outside of command reading
    EndOfStream,

    /// Read failed while `READ_COMMAND` was set
    ReadError,

    /// Signal check asked the caller to stop reading
    Terminated(Signal),
}

impl InputError {
    /// True for the two end-of-input outcomes (not for termination).
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, InputError::EndOfStream | InputError::ReadError)
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EndOfStream => write!(f, "End of input"),
            InputError::ReadError => write!(f, "Read error"),
            InputError::Terminated(signal) => write!(f, "Terminated by {}", signal),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RawError {}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}
