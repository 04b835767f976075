// config.rs: Compile-time configuration constants and environment defaults.
//
// Runtime overrides come from the ZINFLATE_WBITS and ZINFLATE_NBWORKERS
// environment variables (read once at CLI startup, see cli::op_mode) or from
// command-line flags.

// Default log2 window size for zlib streams.
// Can be overridden by the ZINFLATE_WBITS environment variable or -w#.
pub const WBITS_DEFAULT: u8 = crate::inflate::DEF_WBITS;

// Whether decompression of several files may run on a worker pool.
// Enabled by the `multithread` Cargo feature; without it -T# is accepted but
// files are processed one at a time.
pub const MULTITHREAD: bool = cfg!(feature = "multithread");

// Default number of worker threads (0 = one per logical core).
// Can be overridden by the ZINFLATE_NBWORKERS environment variable or -T#.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Maximum number of worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

// Size of the read and write buffers used by the file I/O layer.
pub const DECOMP_BUF_SIZE: usize = 64 * 1024;

// Growth step of the one-shot helpers' output vector.
pub const DECOMP_CHUNK_SIZE: usize = 32 * 1024;

// Extension stripped from input names to form output names.
pub const ZLIB_EXTENSION: &str = ".zz";
