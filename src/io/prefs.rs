// prefs.rs: File-level decompression preferences.
//
// `Prefs` carries everything the I/O layer needs beyond the paths themselves:
// how to configure each `Inflater`, what to do with the output and source
// files, and how many files may be decoded concurrently.

use crate::config::{MULTITHREAD, NB_WORKERS_MAX, WBITS_DEFAULT};
use crate::inflate::{InflateError, Inflater, MAX_WBITS, MIN_WBITS};

// ---------------------------------------------------------------------------
// Worker count
// ---------------------------------------------------------------------------

/// Default number of concurrent file workers: one per logical core when the
/// `multithread` feature is enabled, otherwise 1.
pub fn default_nb_workers() -> usize {
    if MULTITHREAD {
        crate::util::count_cores().max(1)
    } else {
        1
    }
}

// ---------------------------------------------------------------------------
// Prefs
// ---------------------------------------------------------------------------

/// Preferences for [`decompress_filename`](crate::io::decompress_filename)
/// and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefs {
    /// Log2 window size accepted from stream headers (8..=15).
    pub window_bits: u8,
    /// Streams are raw DEFLATE: no zlib header, no trailer.
    pub raw: bool,
    /// Decode and verify, but write nothing.
    pub test_mode: bool,
    /// Replace existing destination files.
    pub overwrite: bool,
    /// Copy the source's access/modification times onto the output.
    pub keep_times: bool,
    /// Delete the source once it was decoded successfully.
    pub remove_src_file: bool,
    /// Files decoded concurrently by [`decompress_multiple_filenames`](crate::io::decompress_multiple_filenames).
    pub nb_workers: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            window_bits: WBITS_DEFAULT,
            raw: false,
            test_mode: false,
            overwrite: false,
            keep_times: true,
            remove_src_file: false,
            nb_workers: default_nb_workers(),
        }
    }
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window size, clamped to `[MIN_WBITS, MAX_WBITS]`.
    /// Returns the value stored.
    pub fn set_window_bits(&mut self, bits: u8) -> u8 {
        self.window_bits = bits.clamp(MIN_WBITS, MAX_WBITS);
        self.window_bits
    }

    pub fn set_raw(&mut self, yes: bool) -> bool {
        self.raw = yes;
        self.raw
    }

    pub fn set_test_mode(&mut self, yes: bool) -> bool {
        self.test_mode = yes;
        self.test_mode
    }

    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        self.overwrite
    }

    pub fn set_keep_times(&mut self, yes: bool) -> bool {
        self.keep_times = yes;
        self.keep_times
    }

    pub fn set_remove_src_file(&mut self, flag: bool) {
        self.remove_src_file = flag;
    }

    /// Sets the worker count, clamped to `[1, NB_WORKERS_MAX]`; 0 selects
    /// [`default_nb_workers`]. Returns the value stored.
    pub fn set_nb_workers(&mut self, nb_workers: usize) -> usize {
        let n = if nb_workers == 0 { default_nb_workers() } else { nb_workers };
        self.nb_workers = n.clamp(1, NB_WORKERS_MAX);
        self.nb_workers
    }

    /// Fresh session configured from these preferences.
    pub fn new_inflater(&self) -> Result<Inflater, InflateError> {
        Inflater::with_options(self.window_bits, self.raw)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
