//! Typeahead buffer.
//!
//! Fixed-capacity byte queue holding input that has been read (or stuffed)
//! but not yet consumed by the key reader. Built on `heapless::Deque` with an
//! explicit length instead of the classic reserved-slot ring, but keeps the
//! same sizing: a buffer of capacity `N` accepts `N - 1` bytes.

/// Default typeahead capacity.
pub const DEFAULT_TYPEAHEAD: usize = 512;

/// Fixed-capacity FIFO of pending input bytes.
///
/// Overflow is never fatal: mutating operations return `false` and leave the
/// buffer untouched.
#[derive(Debug)]
pub struct TypeaheadBuffer<const N: usize = DEFAULT_TYPEAHEAD> {
    queue: heapless::Deque<u8, N>,
}

impl<const N: usize> TypeaheadBuffer<N> {
    /// Number of bytes the buffer can hold.
    pub const USABLE: usize = N - 1;

    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            queue: heapless::Deque::new(),
        }
    }

    /// Free slots left for stuffing.
    pub fn space_available(&self) -> usize {
        Self::USABLE.saturating_sub(self.queue.len())
    }

    /// Number of queued bytes.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// True if something is queued.
    pub fn any_queued(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Append a byte at the back.
    pub fn stuff(&mut self, byte: u8) -> bool {
        if self.space_available() == 0 {
            return false;
        }
        self.queue.push_back(byte).is_ok()
    }

    /// Push a byte back to the front, to be returned by the next `take()`.
    pub fn unstuff_front(&mut self, byte: u8) -> bool {
        if self.space_available() == 0 {
            return false;
        }
        self.queue.push_front(byte).is_ok()
    }

    /// Pop the oldest byte.
    pub fn take(&mut self) -> Option<u8> {
        self.queue.pop_front()
    }

    /// Discard everything queued.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Iterate queued bytes oldest first without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.queue.iter()
    }
}

impl<const N: usize> Default for TypeaheadBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
