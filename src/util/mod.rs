//! Filesystem and host helpers used by the CLI and the file I/O layer.
//!
//! - [`file_status`]: regular-file / directory checks, timestamp propagation
//! - [`file_list`]  : expansion of directory arguments into file lists

pub mod file_list;
pub mod file_status;

pub use file_list::create_file_list;
pub use file_status::{copy_file_times, is_directory, is_reg_file};

/// Number of logical CPU cores, never less than 1.
pub fn count_cores() -> usize {
    num_cpus::get().max(1)
}
