//! Session state shared between the key reader and the hooks.
//!
//! Typeahead, pending input, keyboard timeout and state bits all live here,
//! owned by one session, so several sessions can coexist in one process.

use bitflags::bitflags;

use crate::config::{InputConfig, KeyboardTimeout};
use crate::typeahead::{DEFAULT_TYPEAHEAD, TypeaheadBuffer};

bitflags! {
    /// Externally visible session state bits.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct SessionFlags: u16 {
        /// A pending key is scheduled
        const INPUT_PENDING = 1 << 0;
        /// The current line is finished; waiting reads return a newline
        const DONE = 1 << 1;
        /// Reading a key for command dispatch (read failures become `ReadError`)
        const READ_COMMAND = 1 << 2;
        /// Reading continuation bytes of a multibyte character
        const MORE_INPUT = 1 << 3;
        /// First unit of a character is being read through the bracketed path
        const BRACKETED_READ = 1 << 4;
    }
}

/// A key scheduled ahead of all other input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PendingKey {
    /// Ordinary key
    Key(u8),
    /// End of input, delivered as `InputError::EndOfStream`
    Eof,
}

/// Mutable state of one input session.
#[derive(Debug)]
pub struct InputState<const N: usize = DEFAULT_TYPEAHEAD> {
    typeahead: TypeaheadBuffer<N>,
    pending: Option<PendingKey>,
    timeout: KeyboardTimeout,
    flags: SessionFlags,
}

impl<const N: usize> InputState<N> {
    /// Fresh state with the default keyboard timeout.
    pub fn new() -> Self {
        Self {
            typeahead: TypeaheadBuffer::new(),
            pending: None,
            timeout: KeyboardTimeout::default(),
            flags: SessionFlags::empty(),
        }
    }

    /// Fresh state seeded from `C`.
    pub fn with_config<C: InputConfig>() -> Self {
        Self {
            timeout: KeyboardTimeout::of::<C>(),
            ..Self::new()
        }
    }

    // ------------------------------------------------------------------
    // Typeahead
    // ------------------------------------------------------------------

    /// Typeahead buffer.
    pub fn typeahead(&self) -> &TypeaheadBuffer<N> {
        &self.typeahead
    }

    /// Mutable typeahead buffer.
    pub fn typeahead_mut(&mut self) -> &mut TypeaheadBuffer<N> {
        &mut self.typeahead
    }

    /// True if typeahead is queued.
    pub fn any_typein(&self) -> bool {
        self.typeahead.any_queued()
    }

    /// Add a key to the back of the typeahead. False if the buffer is full.
    pub fn stuff_char(&mut self, key: u8) -> bool {
        self.typeahead.stuff(key)
    }

    /// Stuff end of input.
    ///
    /// A newline goes into the buffer (terminating the current line) and the
    /// end of input itself is scheduled as the pending key. Nothing changes
    /// if the buffer is full.
    pub fn stuff_eof(&mut self) -> bool {
        if !self.typeahead.stuff(b'\n') {
            return false;
        }
        self.pending = Some(PendingKey::Eof);
        self.flags.insert(SessionFlags::INPUT_PENDING);
        #[cfg(feature = "tracing")]
        tracing::debug!("end of input stuffed as newline plus pending EOF");
        true
    }

    /// Push a key back to the front of the typeahead.
    pub fn unget_char(&mut self, key: u8) -> bool {
        self.typeahead.unstuff_front(key)
    }

    // ------------------------------------------------------------------
    // Pending input
    // ------------------------------------------------------------------

    /// Make `key` the next key returned, ahead of everything else.
    ///
    /// Overwrites a previously scheduled key.
    pub fn execute_next(&mut self, key: u8) {
        self.pending = Some(PendingKey::Key(key));
        self.flags.insert(SessionFlags::INPUT_PENDING);
    }

    /// Drop the pending key, if any.
    pub fn clear_pending_input(&mut self) {
        self.pending = None;
        self.flags.remove(SessionFlags::INPUT_PENDING);
    }

    /// Currently scheduled key.
    pub fn pending(&self) -> Option<PendingKey> {
        self.pending
    }

    /// Consume the pending key, clearing the flag in the same step.
    pub(crate) fn take_pending(&mut self) -> Option<PendingKey> {
        let key = self.pending.take();
        self.flags.remove(SessionFlags::INPUT_PENDING);
        key
    }

    // ------------------------------------------------------------------
    // Timeout and flags
    // ------------------------------------------------------------------

    /// Availability-check timeout in microseconds.
    pub fn keyboard_timeout(&self) -> u32 {
        self.timeout.as_micros()
    }

    /// Set the availability-check timeout, returning the previous value.
    pub fn set_keyboard_timeout(&mut self, us: u32) -> u32 {
        let old = self.timeout.as_micros();
        self.timeout = KeyboardTimeout::from_micros(us);
        old
    }

    pub(crate) fn timeout(&self) -> KeyboardTimeout {
        self.timeout
    }

    /// Session state bits.
    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// Mutable session state bits.
    pub fn flags_mut(&mut self) -> &mut SessionFlags {
        &mut self.flags
    }

    /// Mark the current line finished (or not).
    pub fn set_done(&mut self, done: bool) {
        self.flags.set(SessionFlags::DONE, done);
    }

    /// True once the line has been marked finished.
    pub fn is_done(&self) -> bool {
        self.flags.contains(SessionFlags::DONE)
    }

    /// Set or clear the command-reading state.
    pub fn set_reading_command(&mut self, reading: bool) {
        self.flags.set(SessionFlags::READ_COMMAND, reading);
    }
}

impl<const N: usize> Default for InputState<N> {
    fn default() -> Self {
        Self::new()
    }
}
