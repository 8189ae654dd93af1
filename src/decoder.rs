//! Incremental multibyte decoders.
//!
//! Provides state machines that accept one code unit at a time and report
//! when a complete character has been seen. The multibyte assembler drives
//! them with bytes obtained from the key reader.
//!
//! This is a pure decoder - it doesn't manage buffers or I/O.

/// Result of feeding one unit to a decoder.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A complete character ended with this unit
    Char(char),

    /// The unit completed a null character
    Null,

    /// More units are needed; decoder state is preserved
    Incomplete,

    /// The sequence is invalid; decoder state is reset
    Invalid,
}

/// Stateful multibyte decoder for the active encoding.
pub trait MbDecoder {
    /// Feed one unit.
    fn feed(&mut self, byte: u8) -> Decoded;

    /// Return to the initial shift state.
    fn reset(&mut self);

    /// True if `prefix` is a valid but incomplete character.
    ///
    /// Decodes from the initial state; the current state is discarded.
    fn needs_more(&mut self, prefix: &[u8]) -> bool {
        self.reset();
        for &byte in prefix {
            if self.feed(byte) != Decoded::Incomplete {
                self.reset();
                return false;
            }
        }
        self.reset();
        !prefix.is_empty()
    }
}

/// Decoder state for UTF-8 sequences.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Utf8State {
    /// Expecting a lead byte
    Ground,

    /// Inside a sequence
    Continuation {
        /// Continuation bytes still expected
        remaining: u8,
        /// Code point bits accumulated so far
        acc: u32,
        /// Lowest acceptable next byte
        lo: u8,
        /// Highest acceptable next byte
        hi: u8,
    },
}

/// UTF-8 decoder.
///
/// Accepts exactly the well-formed sequences of the Unicode standard:
/// overlong forms, surrogates and code points above U+10FFFF are rejected
/// as soon as the offending unit arrives.
#[derive(Debug)]
pub struct Utf8Decoder {
    state: Utf8State,
}

impl Utf8Decoder {
    /// Create a decoder in the ground state.
    pub fn new() -> Self {
        Self {
            state: Utf8State::Ground,
        }
    }

    /// Current decoder state (for testing/debugging).
    pub fn state(&self) -> Utf8State {
        self.state
    }

    fn decode_lead(&mut self, byte: u8) -> Decoded {
        let (remaining, acc, lo, hi) = match byte {
            0x00 => return Decoded::Null,
            0x01..=0x7F => return Decoded::Char(char::from(byte)),
            0xC2..=0xDF => (1, byte & 0x1F, 0x80, 0xBF),
            // No overlong three-byte forms
            0xE0 => (2, byte & 0x0F, 0xA0, 0xBF),
            // No surrogates
            0xED => (2, byte & 0x0F, 0x80, 0x9F),
            0xE1..=0xEF => (2, byte & 0x0F, 0x80, 0xBF),
            // No overlong four-byte forms
            0xF0 => (3, byte & 0x07, 0x90, 0xBF),
            0xF1..=0xF3 => (3, byte & 0x07, 0x80, 0xBF),
            // Nothing above U+10FFFF
            0xF4 => (3, byte & 0x07, 0x80, 0x8F),
            _ => return Decoded::Invalid,
        };

        self.state = Utf8State::Continuation {
            remaining,
            acc: u32::from(acc),
            lo,
            hi,
        };
        Decoded::Incomplete
    }

    fn decode_continuation(&mut self, byte: u8, remaining: u8, acc: u32, lo: u8, hi: u8) -> Decoded {
        if !(lo..=hi).contains(&byte) {
            self.state = Utf8State::Ground;
            return Decoded::Invalid;
        }

        let acc = (acc << 6) | u32::from(byte & 0x3F);
        if remaining > 1 {
            self.state = Utf8State::Continuation {
                remaining: remaining - 1,
                acc,
                lo: 0x80,
                hi: 0xBF,
            };
            return Decoded::Incomplete;
        }

        self.state = Utf8State::Ground;
        char::from_u32(acc).map_or(Decoded::Invalid, Decoded::Char)
    }
}

impl MbDecoder for Utf8Decoder {
    fn feed(&mut self, byte: u8) -> Decoded {
        match self.state {
            Utf8State::Ground => self.decode_lead(byte),
            Utf8State::Continuation {
                remaining,
                acc,
                lo,
                hi,
            } => self.decode_continuation(byte, remaining, acc, lo, hi),
        }
    }

    fn reset(&mut self) {
        self.state = Utf8State::Ground;
    }
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoder for single-byte encodings: every byte is a character (Latin-1).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SingleByteDecoder;

impl MbDecoder for SingleByteDecoder {
    fn feed(&mut self, byte: u8) -> Decoded {
        match byte {
            0 => Decoded::Null,
            _ => Decoded::Char(char::from(byte)),
        }
    }

    fn reset(&mut self) {}
}
