//! Stream and file decompression.
//!
//! - [`decompress_stream`] inflates one stream from any buffered reader into
//!   any writer and warns about bytes left after it.
//! - [`decompress_filename`] resolves a source/destination pair, cleans up a
//!   partial output on failure, and applies the keep-times / remove-source
//!   policy on success.
//! - [`decompress_multiple_filenames`] runs many independent files, on a
//!   `rayon` pool when more than one worker is configured, and reports the
//!   results in input order.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use rayon::prelude::*;

use crate::config::MULTITHREAD;
use crate::inflate::{inflate_err_to_io, InflateReader};
use crate::io::file_io::{
    open_dst_file, open_src_file, output_name_with, DstFile, NUL_MARK, STDIN_MARK, STDOUT_MARK,
};
use crate::io::prefs::Prefs;
use crate::util::copy_file_times;

// ---------------------------------------------------------------------------
// Public stats
// ---------------------------------------------------------------------------

/// Statistics returned by [`decompress_filename`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecompressStats {
    /// Total number of decompressed bytes written to the output.
    pub decompressed_bytes: u64,
}

// ---------------------------------------------------------------------------
// decompress_stream
// ---------------------------------------------------------------------------

/// Inflates one stream from `src` into `dst` and flushes `dst`.
///
/// Returns the number of decompressed bytes. Bytes remaining in `src` after
/// the stream are left unread and reported at display level 2.
///
/// # Errors
///
/// `InvalidData` for corrupt streams, `UnexpectedEof` for truncated ones,
/// plus whatever `src` or `dst` report.
pub fn decompress_stream<R: BufRead, W: Write>(
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> io::Result<u64> {
    let inflater = prefs.new_inflater().map_err(inflate_err_to_io)?;
    let written = {
        let mut reader = InflateReader::with_inflater(&mut *src, inflater);
        io::copy(&mut reader, dst)?
    };
    dst.flush()?;

    if !src.fill_buf()?.is_empty() {
        crate::displaylevel!(2, "Warning : trailing data after end of stream ignored\n");
    }
    Ok(written)
}

// ---------------------------------------------------------------------------
// Single file
// ---------------------------------------------------------------------------

/// Decodes `src_path` into `dst_path` without reporting.
fn decompress_dst_file(src_path: &str, dst_path: &str, prefs: &Prefs) -> io::Result<u64> {
    let mut src = open_src_file(src_path)?;
    let mut dst = if prefs.test_mode {
        DstFile::discard()
    } else {
        open_dst_file(dst_path, prefs)?
    };

    let result = decompress_stream(&mut src, &mut dst, prefs)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", src_path, e)));
    let created_file = dst.is_file();
    drop(dst);

    let size = match result {
        Ok(size) => size,
        Err(e) => {
            if created_file {
                let _ = fs::remove_file(dst_path);
            }
            return Err(e);
        }
    };

    let src_is_file = src_path != STDIN_MARK;
    if created_file && src_is_file && prefs.keep_times {
        if let Err(e) = copy_file_times(Path::new(src_path), Path::new(dst_path)) {
            crate::displaylevel!(3, "{}: cannot copy timestamps: {}\n", dst_path, e);
        }
    }

    if prefs.remove_src_file && src_is_file && !prefs.test_mode {
        fs::remove_file(src_path)
            .map_err(|e| io::Error::new(e.kind(), format!("Remove error : {}: {}", src_path, e)))?;
    }

    Ok(size)
}

fn report_success(src_path: &str, size: u64, prefs: &Prefs) {
    let verb = if prefs.test_mode { "tested" } else { "decoded" };
    crate::displaylevel!(2, "{:<30.30} : {} {} bytes \n", src_path, verb, size);
}

/// Decompresses `src` into `dst`.
///
/// Either side may be a sentinel ([`STDIN_MARK`], [`STDOUT_MARK`],
/// [`NUL_MARK`]). In test mode nothing is written and `dst` is ignored.
/// A partially written destination file is removed on failure.
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let size = decompress_dst_file(src, dst, prefs)?;
    report_success(src, size, prefs);
    Ok(DecompressStats { decompressed_bytes: size })
}

// ---------------------------------------------------------------------------
// Multiple files
// ---------------------------------------------------------------------------

/// Decompresses every file in `srcs`.
///
/// `suffix` is either an extension stripped from each source name to form
/// its output name, or one of the [`STDOUT_MARK`] / [`NUL_MARK`] sentinels
/// sending every output there. Standard output is written one file at a time
/// in input order; otherwise up to `prefs.nb_workers` files are decoded
/// concurrently. Each result is reported in input order.
///
/// Returns the number of files that failed.
pub fn decompress_multiple_filenames(srcs: &[&str], suffix: &str, prefs: &Prefs) -> usize {
    let to_stdout = suffix == STDOUT_MARK && !prefs.test_mode;
    let special_dst = suffix == STDOUT_MARK || suffix == NUL_MARK;

    let run_one = |src: &&str| -> io::Result<u64> {
        if special_dst {
            decompress_dst_file(src, suffix, prefs)
        } else {
            let dst = output_name_with(src, suffix)?;
            decompress_dst_file(src, &dst, prefs)
        }
    };

    let parallel = MULTITHREAD && prefs.nb_workers > 1 && srcs.len() > 1 && !to_stdout;
    let results: Vec<io::Result<u64>> = if parallel {
        match rayon::ThreadPoolBuilder::new().num_threads(prefs.nb_workers).build() {
            Ok(pool) => pool.install(|| srcs.par_iter().map(run_one).collect()),
            Err(e) => {
                crate::displaylevel!(3, "cannot start worker pool ({}); decoding serially\n", e);
                srcs.iter().map(run_one).collect()
            }
        }
    } else {
        srcs.iter().map(run_one).collect()
    };

    let mut failures = 0usize;
    let mut total: u64 = 0;
    for (src, result) in srcs.iter().zip(results) {
        match result {
            Ok(size) => {
                total += size;
                report_success(src, size, prefs);
            }
            Err(e) => {
                failures += 1;
                crate::displaylevel!(1, "{}: {}\n", crate::cli::constants::PROGRAM_NAME, e);
            }
        }
    }
    crate::displaylevel!(
        3,
        "{} of {} files decoded, {} bytes total\n",
        srcs.len() - failures,
        srcs.len(),
        total
    );
    failures
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
