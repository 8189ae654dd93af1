//! Console-event input source.
//!
//! Platforms without a byte-stream terminal deliver input as a queue of
//! console records (key presses, mouse activity, focus changes). This module
//! turns key-down records into the byte stream the key reader expects:
//!
//! - key-up records and bare modifier keys are skipped
//! - a repeat count emits the key that many times
//! - cursor-block keys become the equivalent control characters
//! - Alt sends an ESC prefix before each repetition of the key
//!
//! Access to the real console is behind the [`ConsoleEvents`] trait.

use core::time::Duration;

use bitflags::bitflags;

use crate::error::RawError;
use crate::io::RawInput;

/// Virtual-key codes the translation cares about.
pub mod vk {
    /// Shift
    pub const SHIFT: u16 = 0x10;
    /// Control
    pub const CONTROL: u16 = 0x11;
    /// Alt (menu)
    pub const MENU: u16 = 0x12;
    /// Escape
    pub const ESCAPE: u16 = 0x1B;
    /// End
    pub const END: u16 = 0x23;
    /// Home
    pub const HOME: u16 = 0x24;
    /// Left arrow
    pub const LEFT: u16 = 0x25;
    /// Up arrow
    pub const UP: u16 = 0x26;
    /// Right arrow
    pub const RIGHT: u16 = 0x27;
    /// Down arrow
    pub const DOWN: u16 = 0x28;
    /// Delete
    pub const DELETE: u16 = 0x2E;
}

bitflags! {
    /// Modifier and key-class bits of a key record.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct ControlKeyState: u32 {
        /// Right Alt held
        const RIGHT_ALT = 0x0001;
        /// Left Alt held
        const LEFT_ALT = 0x0002;
        /// Right Ctrl held
        const RIGHT_CTRL = 0x0004;
        /// Left Ctrl held
        const LEFT_CTRL = 0x0008;
        /// Shift held
        const SHIFT = 0x0010;
        /// Key from the enhanced (cursor/editing) block
        const ENHANCED_KEY = 0x0100;
    }
}

/// One key record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Press (true) or release (false)
    pub key_down: bool,
    /// Auto-repeat count
    pub repeat_count: u16,
    /// Virtual-key code
    pub virtual_key: u16,
    /// Translated character, 0 if none
    pub ascii: u8,
    /// Modifier state
    pub control: ControlKeyState,
}

impl KeyRecord {
    /// Plain key press producing `ascii` once.
    pub fn press(ascii: u8) -> Self {
        Self {
            key_down: true,
            repeat_count: 1,
            virtual_key: u16::from(ascii.to_ascii_uppercase()),
            ascii,
            control: ControlKeyState::empty(),
        }
    }
}

/// Record read from the console queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConsoleRecord {
    /// Keyboard activity
    Key(KeyRecord),
    /// Mouse activity (ignored by the input layer)
    Mouse,
    /// Buffer size change
    Resize {
        /// Columns
        cols: u16,
        /// Rows
        rows: u16,
    },
    /// Focus or menu record
    Other,
}

/// Access to a console input queue.
pub trait ConsoleEvents {
    /// Wait until a record is queued, or until `timeout` passes.
    fn wait(&mut self, timeout: Option<Duration>) -> Result<bool, RawError>;

    /// Remove the next record, blocking if none is queued. `None` when the
    /// console has gone away.
    fn read_record(&mut self) -> Result<Option<ConsoleRecord>, RawError>;

    /// True if a key press is queued.
    fn key_hit(&mut self) -> bool;
}

/// Raw input source over a console event queue.
#[derive(Debug)]
pub struct ConsoleInput<E> {
    events: E,
    /// Key being repeated
    pending_key: u8,
    /// ESC for Alt-modified keys, 0 otherwise
    pending_prefix: u8,
    /// Bytes of the current record still to emit
    pending_count: u32,
}

impl<E: ConsoleEvents> ConsoleInput<E> {
    /// Wrap a console queue.
    pub fn new(events: E) -> Self {
        Self {
            events,
            pending_key: 0,
            pending_prefix: 0,
            pending_count: 0,
        }
    }

    /// Underlying queue.
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// True while bytes of an earlier record are still queued.
    pub fn has_pending(&self) -> bool {
        self.pending_count > 0
    }

    fn next_pending(&mut self) -> u8 {
        self.pending_count -= 1;
        if self.pending_prefix != 0 && self.pending_count & 1 == 1 {
            self.pending_prefix
        } else {
            self.pending_key
        }
    }

    /// Translate a key record, returning the first byte it produces.
    fn translate(&mut self, key: &KeyRecord) -> Option<u8> {
        if !key.key_down || (vk::SHIFT..=vk::MENU).contains(&key.virtual_key) {
            return None;
        }

        let mut ascii = key.ascii;
        if key.control.contains(ControlKeyState::ENHANCED_KEY) {
            ascii = match key.virtual_key {
                vk::HOME => ctrl(b'a'),
                vk::END => ctrl(b'e'),
                vk::LEFT => ctrl(b'b'),
                vk::RIGHT => ctrl(b'f'),
                vk::UP => ctrl(b'p'),
                vk::DOWN => ctrl(b'n'),
                vk::DELETE => ctrl(b'd'),
                _ => ascii,
            };
        }

        let repeat = u32::from(key.repeat_count.max(1));
        self.pending_key = ascii;
        self.pending_prefix = 0;

        if key
            .control
            .intersects(ControlKeyState::LEFT_ALT | ControlKeyState::RIGHT_ALT)
        {
            // Prefix and key alternate for every repetition
            self.pending_prefix = vk::ESCAPE as u8;
            self.pending_count = repeat * 2 - 1;
            return Some(self.pending_prefix);
        }

        self.pending_count = if ascii != 0 { repeat - 1 } else { repeat };
        Some(ascii)
    }
}

const fn ctrl(c: u8) -> u8 {
    c - b'a' + 1
}

impl<E: ConsoleEvents> RawInput for ConsoleInput<E> {
    fn read_byte(&mut self) -> Result<Option<u8>, RawError> {
        if self.pending_count > 0 {
            return Ok(Some(self.next_pending()));
        }

        loop {
            match self.events.read_record()? {
                None => return Ok(None),
                Some(ConsoleRecord::Key(key)) => {
                    if let Some(byte) = self.translate(&key) {
                        return Ok(Some(byte));
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn wait_readable(&mut self) -> Result<(), RawError> {
        if self.pending_count == 0 {
            // An untimed wait only comes back empty when the console is gone;
            // the following read reports that
            self.events.wait(None)?;
        }
        Ok(())
    }

    fn key_hit(&mut self) -> Option<bool> {
        Some(self.pending_count > 0 || self.events.key_hit())
    }

    fn read_byte_nonblocking(&mut self) -> Result<Option<u8>, RawError> {
        if self.pending_count > 0 {
            return Ok(Some(self.next_pending()));
        }

        // Only drain while a key press is queued; modifiers and key-ups may
        // translate to nothing
        while self.events.key_hit() {
            match self.events.read_record()? {
                None => return Ok(None),
                Some(ConsoleRecord::Key(key)) => {
                    if let Some(byte) = self.translate(&key) {
                        return Ok(Some(byte));
                    }
                }
                Some(_) => {}
            }
        }
        Err(RawError::WouldBlock)
    }
}
