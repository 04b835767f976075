//! Input list construction with optional recursive directory expansion.
//!
//! With `recursive` set, [`create_file_list`] replaces every directory
//! argument by the regular files found beneath it, walked with [`walkdir`]
//! in sorted order. Symlinks inside a walked directory are never followed and
//! never listed, so cyclic links cannot loop. Without `recursive`, arguments
//! are forwarded untouched and the I/O layer reports directories when it
//! tries to open them.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expands `inputs` into a flat list of paths to decompress.
///
/// A walk error (unreadable directory, vanished entry) aborts the expansion.
pub fn create_file_list(inputs: &[&Path], recursive: bool) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        if recursive && input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    e.io_error()
                        .map(|io| io::Error::new(io.kind(), io.to_string()))
                        .unwrap_or_else(|| io::Error::other(e.to_string()))
                })?;
                if entry.file_type().is_file() {
                    result.push(entry.into_path());
                }
            }
        } else {
            result.push(input.to_path_buf());
        }
    }
    Ok(result)
}
