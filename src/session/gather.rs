//! Typeahead gatherer.

use crate::error::{InputError, RawError};
use crate::hooks::InputHooks;
use crate::io::RawInput;
use crate::signal::SignalCheck;
use crate::typeahead::TypeaheadBuffer;

use super::InputSession;

/// How much input the gatherer found waiting.
enum Waiting {
    /// OS reported this many bytes queued
    Queued(usize),
    /// Non-blocking probe already consumed this byte
    Probed(u8),
}

impl<IO, H, S, const N: usize> InputSession<IO, H, S, N>
where
    IO: RawInput,
    H: InputHooks<N>,
    S: SignalCheck,
{
    /// Move currently available input into the typeahead without blocking.
    ///
    /// Returns the number of bytes stuffed (0 if nothing was waiting). A
    /// device error fails with the read-failure mapping.
    ///
    /// Input is only gathered into an empty buffer, one byte at a time, and
    /// gathering stops after a newline or carriage return so that the editor
    /// sees line boundaries as soon as they arrive.
    pub fn gather_typeahead(&mut self) -> Result<usize, InputError> {
        if self.io.poll_readable(self.state.timeout().as_duration()) == Some(false) {
            return Ok(0);
        }

        let waiting = match self.io.queued_len() {
            Ok(Some(queued)) => Waiting::Queued(queued),
            Err(RawError::Device) => return Err(self.device_failure()),
            Ok(None) | Err(_) => match self.io.read_byte_nonblocking() {
                Ok(Some(byte)) => Waiting::Probed(byte),
                Ok(None) => return Ok(usize::from(self.state.stuff_eof())),
                Err(RawError::Device) => return Err(self.device_failure()),
                Err(_) => return Ok(0),
            },
        };

        let space = self.state.typeahead().space_available();

        match waiting {
            Waiting::Probed(byte) => {
                // The byte is already off the descriptor; keep it if it fits
                Ok(usize::from(self.state.stuff_char(byte)))
            }
            Waiting::Queued(queued) => {
                let mut budget = queued.min(space);
                if space < TypeaheadBuffer::<N>::USABLE {
                    budget = 0;
                }

                let mut stuffed = 0;
                while budget > 0 {
                    budget -= 1;
                    self.check_signals()?;

                    let byte = match self.read_byte_blocking() {
                        Ok(byte) => byte,
                        Err(InputError::EndOfStream) => {
                            if self.state.stuff_eof() {
                                stuffed += 1;
                            }
                            break;
                        }
                        Err(err) => return Err(err),
                    };

                    if !self.state.stuff_char(byte) {
                        break;
                    }
                    stuffed += 1;
                    if byte == b'\n' || byte == b'\r' {
                        break;
                    }
                }

                #[cfg(feature = "tracing")]
                tracing::debug!(queued, stuffed, "gathered typeahead");
                Ok(stuffed)
            }
        }
    }

    fn device_failure(&self) -> InputError {
        #[cfg(feature = "tracing")]
        tracing::warn!("input device error while gathering");
        self.read_failure()
    }
}
