//! Block decoder interface and the `miniz_oxide`-backed implementation.
//!
//! The session never looks inside a block decoder. It creates one through a
//! [`DecoderFactory`] once the header is accepted, feeds it through
//! [`BlockDecoder::decode`] until it reports [`BlockStatus::StreamEnd`], then
//! calls [`BlockDecoder::finish`] to obtain the checksum of the decoded
//! output and whether the decoder read into the trailer. Dropping a decoder
//! tears it down.

use miniz_oxide::inflate::stream::{inflate, InflateState};
use miniz_oxide::{DataFormat, MZError, MZFlush, MZStatus};

use crate::inflate::checksum::Adler32State;
use crate::inflate::types::InflateError;

// ─────────────────────────────────────────────────────────────────────────────
// Interface
// ─────────────────────────────────────────────────────────────────────────────

/// What a single `decode` call achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// No progress possible without more input (or output space).
    NeedsInput,
    /// Input was consumed and/or output produced; the stream continues.
    Progress,
    /// The final block has been decoded and all its output delivered.
    StreamEnd,
    /// The payload is corrupt. The decoder keeps reporting this.
    Failed(&'static str),
}

/// Byte counts and status of one `decode` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProgress {
    pub consumed: usize,
    pub written: usize,
    pub status: BlockStatus,
}

/// Whether the decoder consumed input beyond the end of the compressed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAhead {
    /// Consumption stopped exactly at the end of the payload.
    Exact,
    /// One byte past the payload was consumed; it is the first trailer byte.
    TrailerByte(u8),
}

/// Values handed back when a decoder is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTrailer {
    /// Adler-32 of everything the decoder produced.
    pub checksum: u32,
    pub read_ahead: ReadAhead,
}

/// Incremental decoder for the compressed payload.
pub trait BlockDecoder {
    /// Decode from `input` into `output`. `consumed` never exceeds
    /// `input.len()` and `written` never exceeds `output.len()`.
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> BlockProgress;

    /// Report the final checksum and read-ahead state. Called once, right
    /// after [`BlockStatus::StreamEnd`]; the decoder is dropped afterwards.
    fn finish(&mut self) -> BlockTrailer;
}

/// Creates block decoders. This is the session's only source of decoder
/// memory; a factory may refuse a window it cannot provide.
pub trait DecoderFactory {
    type Decoder: BlockDecoder;

    /// Create a decoder for a window of `window_size` bytes.
    ///
    /// # Errors
    ///
    /// [`InflateError::OutOfMemory`] when the decoder cannot be allocated.
    fn create(&mut self, window_size: usize) -> Result<Self::Decoder, InflateError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// miniz_oxide implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Default factory. Produces [`MinizBlockDecoder`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinizFactory {
    /// Largest window this factory will allocate; `None` = unlimited.
    pub memory_limit: Option<usize>,
}

impl MinizFactory {
    pub fn new() -> Self {
        MinizFactory::default()
    }

    /// Refuse windows larger than `limit` bytes with `OutOfMemory`.
    pub fn with_memory_limit(limit: usize) -> Self {
        MinizFactory { memory_limit: Some(limit) }
    }
}

impl DecoderFactory for MinizFactory {
    type Decoder = MinizBlockDecoder;

    fn create(&mut self, window_size: usize) -> Result<MinizBlockDecoder, InflateError> {
        if self.memory_limit.is_some_and(|limit| window_size > limit) {
            return Err(InflateError::OutOfMemory);
        }
        Ok(MinizBlockDecoder::new(window_size))
    }
}

/// Raw DEFLATE decoder backed by `miniz_oxide`, with a running Adler-32 over
/// its output.
///
/// `miniz_oxide` hands back any bits it buffered past the final block, so
/// this decoder always reports [`ReadAhead::Exact`].
pub struct MinizBlockDecoder {
    state: Box<InflateState>,
    adler: Adler32State,
    window_size: usize,
    failed: Option<&'static str>,
}

impl MinizBlockDecoder {
    pub fn new(window_size: usize) -> Self {
        MinizBlockDecoder {
            state: InflateState::new_boxed(DataFormat::Raw),
            adler: Adler32State::new(),
            window_size,
            failed: None,
        }
    }

    /// Window size this decoder was created for.
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl std::fmt::Debug for MinizBlockDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinizBlockDecoder")
            .field("window_size", &self.window_size)
            .field("failed", &self.failed)
            .finish()
    }
}

fn mz_error_message(e: MZError) -> &'static str {
    match e {
        MZError::Data => "invalid block data",
        MZError::Mem => "insufficient memory",
        MZError::Stream => "inconsistent stream state",
        MZError::Param => "invalid parameter",
        _ => "invalid block data",
    }
}

impl BlockDecoder for MinizBlockDecoder {
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> BlockProgress {
        if let Some(msg) = self.failed {
            return BlockProgress { consumed: 0, written: 0, status: BlockStatus::Failed(msg) };
        }

        let res = inflate(&mut self.state, input, output, MZFlush::None);
        self.adler.write(&output[..res.bytes_written]);

        let moved = res.bytes_consumed > 0 || res.bytes_written > 0;
        let status = match res.status {
            Ok(MZStatus::StreamEnd) => BlockStatus::StreamEnd,
            Ok(_) if moved => BlockStatus::Progress,
            Ok(_) => BlockStatus::NeedsInput,
            // Buf: no progress possible with these buffers; not fatal.
            Err(MZError::Buf) if moved => BlockStatus::Progress,
            Err(MZError::Buf) => BlockStatus::NeedsInput,
            Err(e) => {
                let msg = mz_error_message(e);
                self.failed = Some(msg);
                BlockStatus::Failed(msg)
            }
        };
        BlockProgress { consumed: res.bytes_consumed, written: res.bytes_written, status }
    }

    fn finish(&mut self) -> BlockTrailer {
        BlockTrailer { checksum: self.adler.finish(), read_ahead: ReadAhead::Exact }
    }
}
