// zinflate: resumable zlib stream inflater and command-line decompressor

pub mod config;
pub mod util;
pub mod inflate;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 72;
pub const VERSION_RELEASE: u32 = 0;
pub const VERSION_NUMBER: u32 = VERSION_MAJOR * 100 * 100 + VERSION_MINOR * 100 + VERSION_RELEASE;
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use inflate::{
    decompress_raw_to_vec, decompress_to_vec, DataError, InflateError, InflateMode, InflateReader,
    Inflater, Status, StepResult,
};
