//! Multibyte assembler.
//!
//! Reads one unit at a time through the key reader and feeds a
//! [`MbDecoder`] until it reports a complete character, an invalid
//! sequence or a null, or the caller's budget runs out.

use crate::decoder::{Decoded, MbDecoder};
use crate::error::InputError;
use crate::hooks::InputHooks;
use crate::io::RawInput;
use crate::signal::SignalCheck;

use super::{InputSession, SessionFlags};

/// Outcome of [`InputSession::read_mbchar()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MbRead {
    /// Units consumed and written to the caller's buffer
    pub len: usize,

    /// Decoder verdict on the last unit (`Incomplete` if the budget or the input ran out)
    pub decoded: Decoded,
}

impl<IO, H, S, const N: usize> InputSession<IO, H, S, N>
where
    IO: RawInput,
    H: InputHooks<N>,
    S: SignalCheck,
{
    /// Read one multibyte character into `buf`.
    ///
    /// The first unit is read with [`read_bracketed_key()`](Self::read_bracketed_key),
    /// the rest with [`read_key()`](Self::read_key). At most `buf.len()`
    /// units are read. An invalid sequence stops the read and leaves the
    /// units consumed so far in `buf`; a null character is reported as a
    /// single zero unit.
    ///
    /// End of input or a read error after the first unit ends the character
    /// early: the units already consumed are returned as `Incomplete` and the
    /// condition is left for the next read. A termination request always
    /// propagates.
    pub fn read_mbchar<D>(&mut self, decoder: &mut D, buf: &mut [u8]) -> Result<MbRead, InputError>
    where
        D: MbDecoder + ?Sized,
    {
        decoder.reset();
        let mut len = 0;
        let mut decoded = Decoded::Incomplete;

        while len < buf.len() {
            let unit = if len == 0 {
                self.read_bracketed_key()?
            } else {
                match self.read_key() {
                    Ok(unit) => unit,
                    Err(err) if err.is_end_of_input() => break,
                    Err(err) => return Err(err),
                }
            };

            buf[len] = unit;
            len += 1;

            decoded = decoder.feed(unit);
            match decoded {
                Decoded::Incomplete => continue,
                Decoded::Null => {
                    buf[0] = 0;
                    len = 1;
                    break;
                }
                Decoded::Char(_) | Decoded::Invalid => break,
            }
        }

        Ok(MbRead { len, decoded })
    }

    /// Complete a multibyte character whose first unit `first` is known.
    ///
    /// Units are appended to `buf` (zeroed first) until the accumulated
    /// prefix no longer needs more input or `buf` is full. `MORE_INPUT` is
    /// set while each continuation unit is read. Returns the last unit read,
    /// which is `first` if no continuation was needed.
    pub fn read_mbstring<D>(&mut self, decoder: &mut D, first: u8, buf: &mut [u8]) -> Result<u8, InputError>
    where
        D: MbDecoder + ?Sized,
    {
        buf.fill(0);
        let mut last = first;

        for i in 0..buf.len() {
            buf[i] = last;
            if !decoder.needs_more(&buf[..=i]) {
                break;
            }

            self.state.flags_mut().insert(SessionFlags::MORE_INPUT);
            let next = self.read_key();
            self.state.flags_mut().remove(SessionFlags::MORE_INPUT);
            last = next?;
        }

        Ok(last)
    }
}
