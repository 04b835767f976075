//! zlib stream inflation.
//!
//! [`Inflater`] is the resumable session: feed it whatever input is at hand
//! with [`Inflater::step`] and call again until it reports
//! [`Status::StreamEnd`]. Payload decoding is delegated to a
//! [`BlockDecoder`] obtained from a [`DecoderFactory`]; the default factory
//! wraps `miniz_oxide`.

pub mod blocks;
pub mod checksum;
pub mod cursor;
pub mod reader;
pub mod session;
pub mod types;

// Re-export key public API items at the module level.
pub use blocks::{
    BlockDecoder, BlockProgress, BlockStatus, BlockTrailer, DecoderFactory, MinizBlockDecoder,
    MinizFactory, ReadAhead,
};
pub use checksum::{adler32_oneshot, Adler32State, TrailerCheck};
pub use cursor::ByteCursor;
pub use reader::{
    decompress_raw_to_vec, decompress_to_vec, decompress_with, inflate_err_to_io, InflateReader,
};
pub use session::Inflater;
pub use types::{
    DataError, InflateError, InflateMode, Status, StepResult, DEF_WBITS, MAX_WBITS, MIN_WBITS,
    Z_DEFLATED,
};
