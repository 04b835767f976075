//! File-level decompression: sources, destinations and batch runs.
//!
//! This module assembles the I/O sub-modules and re-exports the symbols
//! consumed by the CLI and library users.

pub mod decompress;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use decompress::DecompressStats;
pub use prefs::Prefs;

// ── Special I/O sentinels ────────────────────────────────────────────────────
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Worker count ──────────────────────────────────────────────────────────────
pub use prefs::default_nb_workers;

// ── Decompression public API ─────────────────────────────────────────────────
/// Inflate one stream between arbitrary reader and writer.
pub use decompress::decompress_stream;

/// Decompress a single file.
pub use decompress::decompress_filename;

/// Decompress multiple files, stripping a suffix to name the outputs.
pub use decompress::decompress_multiple_filenames;

/// Output naming.
pub use file_io::{output_name_for, output_name_with};
