//! Raw input source abstraction.
//!
//! The `RawInput` trait is the only thing the key reader knows about where
//! bytes come from. [`FdInput`](crate::posix::FdInput) implements it over a
//! POSIX descriptor, [`ConsoleInput`](crate::console::ConsoleInput) over a
//! console event queue, and tests substitute scripted sources.
//!
//! Capability queries return `None` when the source has no such primitive,
//! so the availability poller can fall through to the next strategy.

use core::time::Duration;

use crate::error::RawError;

/// Platform-agnostic single-byte input source.
pub trait RawInput {
    /// Read exactly one byte.
    ///
    /// Returns:
    /// - `Ok(Some(byte))` when a byte was read
    /// - `Ok(None)` at end of stream
    /// - `Err(RawError)` on failure (the reader decides whether to retry)
    fn read_byte(&mut self) -> Result<Option<u8>, RawError>;

    /// Block until the source is readable.
    ///
    /// Sources with a signal-safe wait primitive (`pselect`) use it here so a
    /// signal arriving during the wait is reported as `Interrupted` instead
    /// of being lost. Default: no separate wait, `read_byte()` blocks.
    fn wait_readable(&mut self) -> Result<(), RawError> {
        Ok(())
    }

    /// Readiness multiplex wait (read and exceptional conditions).
    ///
    /// `Some(ready)` if the source supports it, `None` otherwise.
    fn poll_readable(&mut self, timeout: Duration) -> Option<bool> {
        let _ = timeout;
        None
    }

    /// Number of bytes queued by the OS.
    ///
    /// `Ok(None)` when unsupported or when the query failed for a reason
    /// other than a device error.
    fn queued_len(&mut self) -> Result<Option<usize>, RawError> {
        Ok(None)
    }

    /// Key-hit primitive of console platforms.
    fn key_hit(&mut self) -> Option<bool> {
        None
    }

    /// Read one byte without blocking, leaving the blocking mode as it was.
    ///
    /// `Err(RawError::WouldBlock)` when nothing is available.
    fn read_byte_nonblocking(&mut self) -> Result<Option<u8>, RawError> {
        Err(RawError::WouldBlock)
    }

    /// Clear non-blocking mode after a would-block read.
    fn set_blocking(&mut self) -> Result<(), RawError> {
        Ok(())
    }
}

impl<T: RawInput + ?Sized> RawInput for &mut T {
    fn read_byte(&mut self) -> Result<Option<u8>, RawError> {
        (**self).read_byte()
    }

    fn wait_readable(&mut self) -> Result<(), RawError> {
        (**self).wait_readable()
    }

    fn poll_readable(&mut self, timeout: Duration) -> Option<bool> {
        (**self).poll_readable(timeout)
    }

    fn queued_len(&mut self) -> Result<Option<usize>, RawError> {
        (**self).queued_len()
    }

    fn key_hit(&mut self) -> Option<bool> {
        (**self).key_hit()
    }

    fn read_byte_nonblocking(&mut self) -> Result<Option<u8>, RawError> {
        (**self).read_byte_nonblocking()
    }

    fn set_blocking(&mut self) -> Result<(), RawError> {
        (**self).set_blocking()
    }
}
