//! Availability poller.

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
    /// Is input waiting on the raw source?
    ///
    /// An installed availability hook answers exclusively. Otherwise the
    /// source is asked, in order: readiness wait with the keyboard timeout,
    /// OS queue length, key-hit. The typeahead buffer is not consulted.
    pub fn input_available(&mut self) -> bool {
        if let Some(answer) = self.hooks.input_available(&self.state) {
            return answer;
        }

        if let Some(ready) = self.io.poll_readable(self.state.timeout().as_duration()) {
            return ready;
        }

        if let Ok(Some(queued)) = self.io.queued_len() {
            return queued > 0;
        }

        self.io.key_hit().unwrap_or(false)
    }

    /// [`input_available()`](Self::input_available) with a one-off timeout.
    ///
    /// The session's keyboard timeout is restored afterwards.
    pub fn input_queued(&mut self, timeout_us: u32) -> bool {
        let old = self.state.set_keyboard_timeout(timeout_us);
        let available = self.input_available();
        self.state.set_keyboard_timeout(old);
        available
    }

    /// Bytes queued by the OS, independent of the typeahead buffer.
    ///
    /// `Ok(0)` when the source cannot tell. A device error is reported with
    /// the same mapping the key reader uses for failed reads.
    pub fn nchars_available(&mut self) -> Result<usize, InputError> {
        match self.io.queued_len() {
            Ok(queued) => Ok(queued.unwrap_or(0)),
            Err(RawError::Device) => Err(self.read_failure()),
            Err(_) => Ok(0),
        }
    }
}
