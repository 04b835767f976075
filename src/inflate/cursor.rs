//! Byte cursor over the caller's input for the duration of one `step` call.

/// Borrowed view of the not-yet-consumed part of an input slice.
///
/// `consumed` counts every byte taken through [`next_byte`](Self::next_byte)
/// or [`advance`](Self::advance) since the cursor was created; the session adds
/// it to its cumulative `total_in` when the call returns.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        ByteCursor { input, pos: 0 }
    }

    /// Bytes still available.
    #[inline]
    pub fn available(&self) -> usize {
        self.input.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Bytes consumed since the cursor was created.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// The unconsumed tail.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Extract one byte, or `None` when the input is exhausted.
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let b = *self.input.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    /// Mark `n` bytes as consumed after handing [`remaining`](Self::remaining)
    /// to another decoder. `n` is clamped to what is available.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n.min(self.available());
    }

    /// Consume everything that is left. Returns the number of bytes skipped.
    pub fn drain(&mut self) -> usize {
        let n = self.available();
        self.pos = self.input.len();
        n
    }
}
