//! zlib container types, constants, and error handling.
//!
//! Covers:
//! - Container constants (`Z_DEFLATED`, the reserved flag bit, the header check modulus)
//! - Window-size bounds for [`Inflater`](crate::inflate::Inflater) construction
//! - [`Status`] / [`StepResult`] returned by every `step` call
//! - [`InflateMode`], the observable position of the session state machine
//! - [`InflateError`] / [`DataError`] with `Display` + `Error` impls

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Container constants
// ─────────────────────────────────────────────────────────────────────────────

/// Compression method code for DEFLATE (low nibble of the CMF byte).
pub const Z_DEFLATED: u8 = 8;

/// Reserved bit of the FLG byte. Must be clear.
pub const FLG_RESERVED: u8 = 0x20;

/// `(CMF << 8 | FLG)` must be a multiple of this value.
pub const HEADER_CHECK_MODULUS: u32 = 31;

/// Size of the big-endian Adler-32 trailer.
pub const TRAILER_SIZE: usize = 4;

/// Smallest accepted log2 window size.
pub const MIN_WBITS: u8 = 8;

/// Largest accepted log2 window size (32 KiB window).
pub const MAX_WBITS: u8 = 15;

/// Window size used by [`Inflater::new`](crate::inflate::Inflater::new).
pub const DEF_WBITS: u8 = MAX_WBITS;

// ─────────────────────────────────────────────────────────────────────────────
// Step results
// ─────────────────────────────────────────────────────────────────────────────

/// Non-error outcome of a `step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Progress was made; call again with more input or output space.
    Ok,
    /// The stream (and its trailer, unless raw) has been fully decoded.
    StreamEnd,
    /// Nothing could be done with the supplied buffers.
    NeedMoreInput,
}

/// Outcome of one `step` call: byte counts plus the status or error.
///
/// The counts are exact even when `status` is an error, so the caller
/// always knows how far into its buffers the session advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Input bytes consumed by this call.
    pub bytes_consumed: usize,
    /// Output bytes written by this call.
    pub bytes_written: usize,
    pub status: Result<Status, InflateError>,
}

impl StepResult {
    pub(crate) fn new(
        bytes_consumed: usize,
        bytes_written: usize,
        status: Result<Status, InflateError>,
    ) -> Self {
        StepResult { bytes_consumed, bytes_written, status }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Observable state-machine position
// ─────────────────────────────────────────────────────────────────────────────

/// Current mode of a session.
///
/// Declared in transition order; every transition moves forward in this
/// order except the jump to [`InflateMode::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InflateMode {
    /// Waiting for the CMF byte.
    Method,
    /// Waiting for the FLG byte.
    Flag,
    /// Header accepted (or skipped); block decoder not yet created.
    Start,
    /// Compressed payload is being handed to the block decoder.
    Blocks,
    /// Four trailer bytes to go.
    Check4,
    Check3,
    Check2,
    /// Last trailer byte to go.
    Check1,
    /// Stream fully decoded and verified.
    Done,
    /// A framing error occurred. Sticky until reset.
    Error,
}

impl InflateMode {
    /// `true` for [`InflateMode::Done`] and [`InflateMode::Error`].
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, InflateMode::Done | InflateMode::Error)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error codes
// ─────────────────────────────────────────────────────────────────────────────

/// Reason a stream was rejected. Reported through [`InflateError::Data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataError {
    /// CMF low nibble is not [`Z_DEFLATED`].
    UnsupportedMethod,
    /// CMF high nibble exceeds the session's window bits.
    InvalidWindowSize,
    /// FLG has [`FLG_RESERVED`] set.
    ReservedBitSet,
    /// `(CMF << 8 | FLG) % 31 != 0`.
    HeaderChecksumMismatch,
    /// Trailer does not match the checksum of the decoded output.
    DataIntegrityMismatch,
    /// The block decoder read past the end of a raw stream.
    InternalFraming,
    /// The block decoder rejected the compressed payload.
    BlockData(&'static str),
    /// Input ended before the stream was complete.
    Truncated,
    /// Input was discarded by [`Inflater::sync`](crate::inflate::Inflater::sync).
    Desync,
}

impl DataError {
    /// Human-readable message stored as the session's last message.
    pub fn message(&self) -> &'static str {
        match self {
            DataError::UnsupportedMethod => "unknown compression method",
            DataError::InvalidWindowSize => "invalid window size",
            DataError::ReservedBitSet => "invalid reserved bit",
            DataError::HeaderChecksumMismatch => "incorrect header check",
            DataError::DataIntegrityMismatch => "incorrect data check",
            DataError::InternalFraming => "inflate bug--took one too many bytes",
            DataError::BlockData(msg) => msg,
            DataError::Truncated => "unexpected end of stream",
            DataError::Desync => "no sync point found",
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors reported by the inflater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflateError {
    /// Malformed call: out-of-range window bits, or a session already ended.
    InvalidArgument,
    /// The session or its block decoder could not be allocated.
    OutOfMemory,
    /// The compressed stream is invalid.
    Data(DataError),
}

impl InflateError {
    /// Short code name, stable across releases (used in CLI diagnostics).
    pub fn error_name(&self) -> &'static str {
        match self {
            InflateError::InvalidArgument => "Z_STREAM_ERROR",
            InflateError::OutOfMemory => "Z_MEM_ERROR",
            InflateError::Data(_) => "Z_DATA_ERROR",
        }
    }

    /// The data error kind, if this is one.
    #[inline]
    pub fn data_error(&self) -> Option<DataError> {
        match self {
            InflateError::Data(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<DataError> for InflateError {
    fn from(kind: DataError) -> Self {
        InflateError::Data(kind)
    }
}

impl fmt::Display for InflateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InflateError::InvalidArgument => f.write_str("invalid argument"),
            InflateError::OutOfMemory => f.write_str("out of memory"),
            InflateError::Data(kind) => write!(f, "data error: {kind}"),
        }
    }
}

impl std::error::Error for InflateError {}
