//! `std::io` adapters and one-shot helpers built on [`Inflater`].

use std::io::{self, BufRead, Read};

use crate::config::DECOMP_CHUNK_SIZE;
use crate::inflate::blocks::{DecoderFactory, MinizFactory};
use crate::inflate::session::Inflater;
use crate::inflate::types::{DataError, InflateError, Status};

/// Convert an [`InflateError`] into an `io::Error` of kind `InvalidData`
/// (or `InvalidInput` for misuse, `OutOfMemory` for allocation failures).
pub fn inflate_err_to_io(e: InflateError) -> io::Error {
    let kind = match e {
        InflateError::InvalidArgument => io::ErrorKind::InvalidInput,
        InflateError::OutOfMemory => io::ErrorKind::OutOfMemory,
        InflateError::Data(DataError::Truncated) => io::ErrorKind::UnexpectedEof,
        InflateError::Data(_) => io::ErrorKind::InvalidData,
    };
    io::Error::new(kind, e)
}

// ─────────────────────────────────────────────────────────────────────────────
// InflateReader
// ─────────────────────────────────────────────────────────────────────────────

/// Decompressing reader over a buffered source.
///
/// Only the bytes the session actually consumed are taken from `inner`, so
/// whatever follows the compressed stream is still there after
/// [`into_inner`](Self::into_inner).
pub struct InflateReader<R, F: DecoderFactory = MinizFactory> {
    inner: R,
    inflater: Inflater<F>,
    done: bool,
}

impl<R: BufRead> InflateReader<R, MinizFactory> {
    /// Reader for a zlib stream with a 32 KiB window.
    pub fn new(inner: R) -> Self {
        InflateReader::with_inflater(inner, Inflater::new())
    }

    /// Reader for a raw DEFLATE stream.
    pub fn new_raw(inner: R, window_bits: u8) -> Result<Self, InflateError> {
        Ok(InflateReader::with_inflater(inner, Inflater::with_options(window_bits, true)?))
    }
}

impl<R: BufRead, F: DecoderFactory> InflateReader<R, F> {
    pub fn with_inflater(inner: R, inflater: Inflater<F>) -> Self {
        InflateReader { inner, inflater, done: false }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn inflater(&self) -> &Inflater<F> {
        &self.inflater
    }

    /// Compressed bytes consumed so far.
    pub fn total_in(&self) -> u64 {
        self.inflater.total_in()
    }

    /// Decompressed bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.inflater.total_out()
    }

    /// `true` once the end of the stream (and its trailer) was reached.
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<R: BufRead, F: DecoderFactory> Read for InflateReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.done || buf.is_empty() {
            return Ok(0);
        }
        loop {
            let input = self.inner.fill_buf()?;
            let eof = input.is_empty();
            let res = self.inflater.step(input, buf);
            self.inner.consume(res.bytes_consumed);

            match res.status.map_err(inflate_err_to_io)? {
                Status::StreamEnd => {
                    self.done = true;
                    return Ok(res.bytes_written);
                }
                Status::Ok | Status::NeedMoreInput => {
                    if res.bytes_written > 0 {
                        return Ok(res.bytes_written);
                    }
                    if eof {
                        return Err(inflate_err_to_io(InflateError::Data(DataError::Truncated)));
                    }
                    if res.bytes_consumed == 0 {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "inflate made no progress",
                        ));
                    }
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress a complete zlib stream. Bytes after the trailer are ignored.
///
/// # Errors
///
/// Any data error from the stream, or [`DataError::Truncated`] when `input`
/// ends before the stream does.
pub fn decompress_to_vec(input: &[u8]) -> Result<Vec<u8>, InflateError> {
    decompress_with(Inflater::new(), input)
}

/// Decompress a complete raw DEFLATE stream.
pub fn decompress_raw_to_vec(input: &[u8], window_bits: u8) -> Result<Vec<u8>, InflateError> {
    decompress_with(Inflater::with_options(window_bits, true)?, input)
}

/// Drive `inflater` over all of `input`, growing the output as needed.
pub fn decompress_with<F: DecoderFactory>(
    mut inflater: Inflater<F>,
    input: &[u8],
) -> Result<Vec<u8>, InflateError> {
    let mut out: Vec<u8> = Vec::with_capacity(input.len().saturating_mul(2).max(64));
    let mut pos = 0usize;
    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(DECOMP_CHUNK_SIZE));
        }
        let start = out.len();
        out.resize(out.capacity(), 0);
        let res = inflater.step(&input[pos..], &mut out[start..]);
        pos += res.bytes_consumed;
        out.truncate(start + res.bytes_written);

        match res.status? {
            Status::StreamEnd => return Ok(out),
            Status::Ok => {}
            Status::NeedMoreInput => return Err(InflateError::Data(DataError::Truncated)),
        }
    }
}
