//! File status helpers.
//!
//! Timestamps are copied with the `filetime` crate so that the access and
//! modification times of a decompressed file match its source.

use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;

/// Copies the access and modification times of `src` onto `dst`.
///
/// Returns `Err` if either path cannot be stat'ed or `dst` is not a regular
/// file.
pub fn copy_file_times(src: &Path, dst: &Path) -> io::Result<()> {
    if !is_reg_file(dst) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: not a regular file", dst.display()),
        ));
    }
    let meta = fs::metadata(src)?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dst, atime, mtime)?;

    // Read-only sources produce writable outputs; only the time stamps travel.
    Ok(())
}

/// Returns `true` if `path` refers to a regular file.
///
/// Returns `false` for directories, special files, and paths that do not
/// exist.
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if `path` refers to a directory.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
