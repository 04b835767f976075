//! Trailer checksum reconciliation, plus a thin wrapper around the
//! `simd-adler32` crate for the Adler-32 value the trailer carries.

pub use simd_adler32::Adler32 as Adler32State;

/// One-shot Adler-32 of `data`.
///
/// # Parity vectors
/// * `adler32_oneshot(b"")` == `0x0000_0001`
/// * `adler32_oneshot(b"Wikipedia")` == `0x11E6_0398`
#[inline]
pub fn adler32_oneshot(data: &[u8]) -> u32 {
    let mut state = Adler32State::new();
    state.write(data);
    state.finish()
}

/// Big-endian trailer accumulator.
///
/// Holds the checksum computed by the block decoder (`computed`) and the value
/// read from the stream so far (`expected`). `remaining` is the number of
/// trailer bytes still to be read, 4 down to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailerCheck {
    computed: u32,
    expected: u32,
    remaining: u8,
}

impl TrailerCheck {
    /// Fresh accumulator: all four trailer bytes still to come.
    pub fn new(computed: u32) -> Self {
        TrailerCheck { computed, expected: 0, remaining: 4 }
    }

    /// Accumulator whose first (most significant) byte was already consumed
    /// by the block decoder.
    pub fn seeded(computed: u32, first: u8) -> Self {
        TrailerCheck { computed, expected: u32::from(first) << 24, remaining: 3 }
    }

    /// Trailer bytes still to be read.
    #[inline]
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Fold in the next trailer byte. No-op once complete.
    pub fn push(&mut self, byte: u8) {
        if self.remaining == 0 {
            return;
        }
        self.remaining -= 1;
        self.expected |= u32::from(byte) << (8 * u32::from(self.remaining));
    }

    /// Value computed over the decoded output.
    #[inline]
    pub fn computed(&self) -> u32 {
        self.computed
    }

    /// Trailer value assembled so far.
    #[inline]
    pub fn expected(&self) -> u32 {
        self.expected
    }

    /// Exact comparison. Only meaningful once [`is_complete`](Self::is_complete).
    #[inline]
    pub fn matches(&self) -> bool {
        self.computed == self.expected
    }
}
