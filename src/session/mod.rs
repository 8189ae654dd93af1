//! Input session and key reader.
//!
//! The `InputSession` struct owns the raw input source, the embedding
//! application's hooks, the signal check and the session state, and answers
//! "what is the next key" in a fixed priority order:
//!
//! 1. pending input scheduled with `execute_next()` (or a stuffed EOF)
//! 2. the active macro
//! 3. the typeahead buffer
//! 4. with an event hook: gather/poll loop, calling the hook while idle
//! 5. without one: a blocking single-byte read

use crate::config::InputConfig;
use crate::error::InputError;
use crate::hooks::{InputHooks, Keymap, TextSink};
use crate::io::RawInput;
use crate::signal::SignalCheck;
use crate::typeahead::DEFAULT_TYPEAHEAD;

// Sub-modules
mod gather;
#[cfg(feature = "multibyte")]
mod multibyte;
mod poll;
mod reader;
pub mod state;

// Re-export key types
#[cfg(feature = "multibyte")]
pub use multibyte::MbRead;
pub use state::{InputState, PendingKey, SessionFlags};

/// Key acquisition session.
///
/// Generic over:
/// - `IO`: raw input source
/// - `H`: embedding-application hooks
/// - `S`: signal check
/// - `N`: typeahead capacity (`N - 1` usable bytes)
pub struct InputSession<IO, H, S, const N: usize = DEFAULT_TYPEAHEAD>
where
    IO: RawInput,
    H: InputHooks<N>,
    S: SignalCheck,
{
    /// Raw byte source
    io: IO,

    /// Event, signal-event and availability hooks plus macro playback
    hooks: H,

    /// Signal-check collaborator
    signals: S,

    /// Typeahead, pending key, timeout and flags
    state: InputState<N>,
}

// ============================================================================
// Debug implementation
// ============================================================================

impl<IO, H, S, const N: usize> core::fmt::Debug for InputSession<IO, H, S, N>
where
    IO: RawInput,
    H: InputHooks<N>,
    S: SignalCheck,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InputSession")
            .field("state", &self.state)
            .field("event_hook", &self.hooks.has_event_hook())
            .field("caught_signal", &self.signals.caught())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl<IO, H, S, const N: usize> InputSession<IO, H, S, N>
where
    IO: RawInput,
    H: InputHooks<N>,
    S: SignalCheck,
{
    /// Create a session with the default keyboard timeout.
    pub fn new(io: IO, hooks: H, signals: S) -> Self {
        Self {
            io,
            hooks,
            signals,
            state: InputState::new(),
        }
    }

    /// Create a session seeded from config `C`.
    pub fn with_config<C: InputConfig>(io: IO, hooks: H, signals: S) -> Self {
        Self {
            io,
            hooks,
            signals,
            state: InputState::with_config::<C>(),
        }
    }

    /// Session state.
    pub fn state(&self) -> &InputState<N> {
        &self.state
    }

    /// Mutable session state.
    pub fn state_mut(&mut self) -> &mut InputState<N> {
        &mut self.state
    }

    /// Raw input source.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Mutable raw input source.
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Installed hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable hooks.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Signal check.
    pub fn signals_mut(&mut self) -> &mut S {
        &mut self.signals
    }

    /// Tear the session apart.
    pub fn into_parts(self) -> (IO, H, S, InputState<N>) {
        (self.io, self.hooks, self.signals, self.state)
    }

    /// Make `key` the next key returned. See [`InputState::execute_next`].
    pub fn execute_next(&mut self, key: u8) {
        self.state.execute_next(key);
    }

    /// Drop any pending key.
    pub fn clear_pending_input(&mut self) {
        self.state.clear_pending_input();
    }

    /// Stuff `key` into the typeahead. False if full.
    pub fn stuff_char(&mut self, key: u8) -> bool {
        self.state.stuff_char(key)
    }

    /// Stuff end of input. See [`InputState::stuff_eof`].
    pub fn stuff_eof(&mut self) -> bool {
        self.state.stuff_eof()
    }

    /// Push `key` back to the front of the typeahead. False if full.
    pub fn unget_char(&mut self, key: u8) -> bool {
        self.state.unget_char(key)
    }

    /// True if typeahead is queued.
    pub fn any_typein(&self) -> bool {
        self.state.any_typein()
    }

    /// Keyboard timeout in microseconds.
    pub fn keyboard_timeout(&self) -> u32 {
        self.state.keyboard_timeout()
    }

    /// Set the keyboard timeout, returning the old value.
    pub fn set_keyboard_timeout(&mut self, us: u32) -> u32 {
        self.state.set_keyboard_timeout(us)
    }
}

// ============================================================================
// Key reader
// ============================================================================

impl<IO, H, S, const N: usize> InputSession<IO, H, S, N>
where
    IO: RawInput,
    H: InputHooks<N>,
    S: SignalCheck,
{
    /// Read the next key.
    ///
    /// Returns the key byte, or an [`InputError`] for end of input, a read
    /// failure while reading a command, or termination requested by the
    /// signal check. Retryable conditions never surface here.
    pub fn read_key(&mut self) -> Result<u8, InputError> {
        if let Some(pending) = self.state.take_pending() {
            return match pending {
                PendingKey::Key(key) => Ok(key),
                PendingKey::Eof => Err(InputError::EndOfStream),
            };
        }

        // Macro keys bypass every other layer
        if let Some(key) = self.hooks.next_macro_key() {
            return Ok(key);
        }

        while self.hooks.has_event_hook() {
            if let Some(key) = self.state.typeahead_mut().take() {
                return Ok(key);
            }

            match self.gather_typeahead() {
                Err(err) => {
                    if err.is_end_of_input() {
                        self.state.set_done(true);
                    }
                    return Err(err);
                }
                Ok(0) => {}
                Ok(_) => continue,
            }

            self.check_signals()?;
            if self.state.is_done() {
                return Ok(b'\n');
            }
            self.hooks.on_wait_tick(&mut self.state);
        }

        let key = match self.state.typeahead_mut().take() {
            Some(key) => Ok(key),
            None => self.read_byte_blocking(),
        };
        self.check_signals()?;
        key
    }

    /// Read a key through the bracketed path.
    ///
    /// Identical to [`read_key()`](Self::read_key) except that
    /// `BRACKETED_READ` is set for the duration, so a paste-bracket handler
    /// watching the state can recognize the first unit of a character.
    pub fn read_bracketed_key(&mut self) -> Result<u8, InputError> {
        self.state.flags_mut().insert(SessionFlags::BRACKETED_READ);
        let key = self.read_key();
        self.state.flags_mut().remove(SessionFlags::BRACKETED_READ);
        key
    }

    /// Insert `first` plus every queued key bound to self-insert as one unit.
    ///
    /// Stops at the first queued key that is not a self-insert key and pushes
    /// it back to the front of the typeahead.
    pub fn insert_typein<K, T>(&mut self, first: u8, keymap: &K, sink: &mut T)
    where
        K: Keymap + ?Sized,
        T: TextSink + ?Sized,
    {
        let mut text: heapless::Vec<u8, N> = heapless::Vec::new();
        // Capacity N always fits one key plus the N - 1 bytes the buffer can hold
        let _ = text.push(first);

        while let Some(key) = self.state.typeahead_mut().take() {
            if keymap.is_self_insert(key) && text.push(key).is_ok() {
                continue;
            }
            self.state.unget_char(key);
            break;
        }

        sink.insert_text(&text);
    }

    /// Run the signal check, turning a termination request into an error.
    fn check_signals(&mut self) -> Result<(), InputError> {
        self.signals.check().map_err(InputError::Terminated)
    }

    /// Error value for a failed read: `ReadError` while reading a command,
    /// `EndOfStream` otherwise.
    fn read_failure(&self) -> InputError {
        if self.state.flags().contains(SessionFlags::READ_COMMAND) {
            InputError::ReadError
        } else {
            InputError::EndOfStream
        }
    }
}
