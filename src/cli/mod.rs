//! Command-line interface for the `zinflate` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity, the shared `DISPLAY_LEVEL` atomic and the display macros. |
//! | [`op_mode`]   | `OpMode` enum and environment-based defaults (`ZINFLATE_WBITS`, `ZINFLATE_NBWORKERS`). |
//! | [`args`]      | `clap` surface and its resolution into `ParsedArgs`. |
//!
//! Typical call sequence: `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod op_mode;
pub mod args;
