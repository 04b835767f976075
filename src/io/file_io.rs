//! File I/O primitives for the decompression pipeline.
//!
//! - [`open_src_file`] resolves a path string to a buffered reader, handling
//!   the `"stdin"` sentinel and rejecting directories.
//! - [`open_dst_file`] resolves a path string to a [`DstFile`], handling the
//!   `"stdout"` and null-device sentinels and enforcing the overwrite policy
//!   from [`Prefs`].
//! - [`output_name_for`] derives an output path from a compressed input name.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::{DECOMP_BUF_SIZE, ZLIB_EXTENSION};
use crate::io::prefs::Prefs;
use crate::util::is_directory;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source for reading.
///
/// - `"stdin"` yields locked standard input.
/// - A directory yields an [`io::ErrorKind::InvalidInput`] error.
/// - Anything else is opened as a file behind a [`DECOMP_BUF_SIZE`] buffer.
pub fn open_src_file(path: &str) -> io::Result<Box<dyn BufRead>> {
    if path == STDIN_MARK {
        crate::displaylevel!(4, "Using stdin for input\n");
        return Ok(Box::new(io::stdin().lock()));
    }

    if is_directory(Path::new(path)) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory -- ignored", path),
        ));
    }

    let f = File::open(path).map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path, e)))?;
    Ok(Box::new(BufReader::with_capacity(DECOMP_BUF_SIZE, f)))
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// Where a [`DstFile`] sends its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DstKind {
    Stdout,
    Discard,
    File,
}

/// A write-capable destination produced by [`open_dst_file`].
pub struct DstFile {
    inner: Box<dyn Write>,
    kind: DstKind,
}

impl DstFile {
    /// Destination that drops everything; used by test mode.
    pub fn discard() -> Self {
        DstFile { inner: Box::new(io::sink()), kind: DstKind::Discard }
    }

    pub fn kind(&self) -> DstKind {
        self.kind
    }

    /// `true` when the destination is a regular file this process created.
    pub fn is_file(&self) -> bool {
        self.kind == DstKind::File
    }
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing.
///
/// `"stdout"` and [`NUL_MARK`] are resolved before touching the filesystem.
/// A regular path that already exists is refused with
/// [`io::ErrorKind::AlreadyExists`] unless `prefs.overwrite` is set; several
/// files may be decoded concurrently, so there is no interactive prompt.
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if path == STDOUT_MARK {
        crate::displaylevel!(4, "Using stdout for output\n");
        return Ok(DstFile {
            inner: Box::new(BufWriter::with_capacity(DECOMP_BUF_SIZE, io::stdout())),
            kind: DstKind::Stdout,
        });
    }

    if path == NUL_MARK {
        return Ok(DstFile::discard());
    }

    if !prefs.overwrite && Path::new(path).exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{}: already exists; not overwritten", path),
        ));
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path, e)))?;

    Ok(DstFile {
        inner: Box::new(BufWriter::with_capacity(DECOMP_BUF_SIZE, f)),
        kind: DstKind::File,
    })
}

// ---------------------------------------------------------------------------
// Output naming
// ---------------------------------------------------------------------------

/// Output name for `path`: the input name with `.zz` removed.
pub fn output_name_for(path: &str) -> io::Result<String> {
    output_name_with(path, ZLIB_EXTENSION)
}

/// Output name for `path` with `suffix` removed.
///
/// Fails when `path` does not end with `suffix` or consists of nothing else.
pub fn output_name_with(path: &str, suffix: &str) -> io::Result<String> {
    match path.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() && !stem.ends_with(['/', '\\']) => Ok(stem.to_owned()),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: unknown suffix (expected {}) -- ignored", path, suffix),
        )),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
