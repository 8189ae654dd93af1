//! Blocking byte reader.

use crate::error::{InputError, RawError};
use crate::hooks::InputHooks;
use crate::io::RawInput;
use crate::signal::SignalCheck;

use super::InputSession;

impl<IO, H, S, const N: usize> InputSession<IO, H, S, N>
where
    IO: RawInput,
    H: InputHooks<N>,
    S: SignalCheck,
{
    /// Obtain exactly one byte from the raw source, blocking if necessary.
    ///
    /// Would-block clears non-blocking mode and retries. An interrupted read
    /// retries unless the caught signal is fatal (hang-up, terminate), in
    /// which case it fails like any other read error: `ReadError` while
    /// reading a command, `EndOfStream` otherwise.
    pub fn read_byte_blocking(&mut self) -> Result<u8, InputError> {
        loop {
            self.check_signals()?;

            let result = self
                .io
                .wait_readable()
                .and_then(|()| self.io.read_byte());

            match result {
                Ok(Some(byte)) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(byte, "read byte");
                    return Ok(byte);
                }

                Ok(None) => return Err(InputError::EndOfStream),

                Err(RawError::WouldBlock) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("read would block, clearing non-blocking mode");
                    if self.io.set_blocking().is_err() {
                        return Err(InputError::EndOfStream);
                    }
                }

                Err(RawError::Interrupted) => {
                    match self.signals.caught() {
                        Some(signal) if signal.is_fatal() => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(%signal, "read interrupted by fatal signal");
                            return Err(self.read_failure());
                        }
                        Some(signal) if signal.is_keyboard() || signal.is_async() => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(%signal, "read interrupted, handling signal");
                            self.check_signals()?;
                        }
                        _ => {}
                    }
                    self.hooks.on_signal_event(&mut self.state);
                }

                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_err, "read failed");
                    return Err(self.read_failure());
                }
            }
        }
    }
}
