//! Bounded accumulator for inbound command bytes.

use heapless::Vec;

/// Capacity of one command line. Input beyond this forces an early line
/// boundary so a babbling host cannot grow state.
pub const LINE_CAP: usize = 64;

/// Line input buffer.
pub struct LineBuffer {
    buf: Vec<u8, LINE_CAP>,
}

impl LineBuffer {
    /// Create empty buffer.
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append a byte. Returns `true` once the buffer is full: the caller
    /// must treat the line as complete and process it as-is.
    pub fn push(&mut self, byte: u8) -> bool {
        let _ = self.buf.push(byte);
        self.buf.len() == LINE_CAP
    }

    /// Buffer contents as a string slice (empty on invalid UTF-8).
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf).unwrap_or("")
    }

    /// Discard the accumulated line.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Accumulated length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
