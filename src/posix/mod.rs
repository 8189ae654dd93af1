//! POSIX descriptor input.
//!
//! [`FdInput`] reads single bytes from any descriptor (normally the
//! terminal on stdin). Blocking reads wait in `pselect` with the caller's
//! signal mask so a signal delivered while idle interrupts the wait. The
//! availability primitives map onto `select` and `FIONREAD`, and the
//! non-blocking probe toggles `O_NONBLOCK` around a single read.

use std::os::fd::{AsFd, BorrowedFd};
use std::time::Duration;

use nix::sys::select::{FdSet, pselect, select};
use nix::sys::signal::SigSet;
use nix::sys::time::{TimeVal, TimeValLike};
use rustix::fs::{OFlags, fcntl_getfl, fcntl_setfl};
use rustix::io::Errno;

use crate::error::RawError;
use crate::io::RawInput;

mod signals;

pub use signals::CaughtSignals;

/// Raw input source over a file descriptor.
#[derive(Debug)]
pub struct FdInput<F: AsFd> {
    fd: F,
    /// Mask installed for the duration of the `pselect` wait
    wait_mask: Option<SigSet>,
}

impl<F: AsFd> FdInput<F> {
    /// Read from `fd`, waiting with the thread's current signal mask.
    pub fn new(fd: F) -> Self {
        Self { fd, wait_mask: None }
    }

    /// Read from `fd`, waiting with `mask` installed.
    ///
    /// Useful when the application blocks signals around the editor and
    /// wants them delivered only while the reader is idle.
    pub fn with_wait_mask(fd: F, mask: SigSet) -> Self {
        Self {
            fd,
            wait_mask: Some(mask),
        }
    }

    /// Underlying descriptor.
    pub fn get_ref(&self) -> &F {
        &self.fd
    }

    /// Release the descriptor.
    pub fn into_inner(self) -> F {
        self.fd
    }

    fn borrowed(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }

    fn read_one(&self) -> Result<Option<u8>, RawError> {
        let mut buf = [0u8; 1];
        match rustix::io::read(self.borrowed(), &mut buf[..]) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(err) => Err(raw_error(err)),
        }
    }
}

impl<F: AsFd> RawInput for FdInput<F> {
    fn read_byte(&mut self) -> Result<Option<u8>, RawError> {
        self.read_one()
    }

    fn wait_readable(&mut self) -> Result<(), RawError> {
        let fd = self.fd.as_fd();
        let mask = match self.wait_mask {
            Some(mask) => mask,
            None => SigSet::thread_get_mask().map_err(nix_error)?,
        };

        let mut readfds = FdSet::new();
        readfds.insert(fd);

        pselect(None, &mut readfds, None, None, None, &mask)
            .map(|_| ())
            .map_err(nix_error)
    }

    fn poll_readable(&mut self, timeout: Duration) -> Option<bool> {
        let fd = self.fd.as_fd();
        let mut readfds = FdSet::new();
        readfds.insert(fd);
        let mut exceptfds = FdSet::new();
        exceptfds.insert(fd);

        let micros = i64::try_from(timeout.as_micros()).unwrap_or(i64::MAX);
        let mut tv = TimeVal::microseconds(micros);

        match select(None, &mut readfds, None, &mut exceptfds, &mut tv) {
            Ok(ready) => Some(ready > 0),
            // An interrupted or failed wait falls through to the next strategy
            Err(_) => None,
        }
    }

    fn queued_len(&mut self) -> Result<Option<usize>, RawError> {
        match rustix::io::ioctl_fionread(self.borrowed()) {
            Ok(n) => Ok(Some(usize::try_from(n).unwrap_or(usize::MAX))),
            Err(Errno::IO) => Err(RawError::Device),
            Err(_) => Ok(None),
        }
    }

    fn read_byte_nonblocking(&mut self) -> Result<Option<u8>, RawError> {
        let fd = self.borrowed();
        let flags = fcntl_getfl(fd).map_err(raw_error)?;
        fcntl_setfl(fd, flags | OFlags::NONBLOCK).map_err(raw_error)?;

        let result = self.read_one();

        // Restore the caller's mode whatever the read did
        let restored = fcntl_setfl(self.borrowed(), flags).map_err(raw_error);
        match (result, restored) {
            (Err(err), _) => Err(err),
            (Ok(_), Err(err)) => Err(err),
            (Ok(byte), Ok(())) => Ok(byte),
        }
    }

    fn set_blocking(&mut self) -> Result<(), RawError> {
        let fd = self.borrowed();
        let flags = fcntl_getfl(fd).map_err(raw_error)?;
        if flags.contains(OFlags::NONBLOCK) {
            fcntl_setfl(fd, flags - OFlags::NONBLOCK).map_err(raw_error)?;
        }
        Ok(())
    }
}

fn raw_error(err: Errno) -> RawError {
    if err == Errno::INTR {
        RawError::Interrupted
    } else if err == Errno::AGAIN || err == Errno::WOULDBLOCK {
        RawError::WouldBlock
    } else if err == Errno::IO {
        RawError::Device
    } else {
        RawError::Other(err.raw_os_error())
    }
}

fn nix_error(err: nix::errno::Errno) -> RawError {
    raw_error(Errno::from_raw_os_error(err as i32))
}
