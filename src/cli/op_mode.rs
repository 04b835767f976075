//! Operation mode selection and startup defaults for the CLI.
//!
//! This module provides:
//! - [`OpMode`]: what the CLI should do with its inputs.
//! - [`init_wbits`] / [`init_nb_workers`]: per-process defaults read from
//!   the `ZINFLATE_WBITS` and `ZINFLATE_NBWORKERS` environment variables.

use crate::cli::constants::display_level;
use crate::config::{NB_WORKERS_DEFAULT, WBITS_DEFAULT};
use crate::inflate::{MAX_WBITS, MIN_WBITS};

pub const ENV_WBITS: &str = "ZINFLATE_WBITS";
pub const ENV_NBWORKERS: &str = "ZINFLATE_NBWORKERS";

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Decode inputs and write the results.
    Decompress,
    /// Decode and verify inputs without writing anything.
    Test,
}

fn warn_ignored(name: &str, value: &str, why: &str) {
    if display_level() >= 2 {
        eprintln!("Ignore environment variable setting {}={}: {} ", name, value, why);
    }
}

/// Default window bits from `ZINFLATE_WBITS`, or [`WBITS_DEFAULT`].
pub fn init_wbits() -> u8 {
    init_wbits_from(std::env::var(ENV_WBITS).ok().as_deref())
}

/// Testable core of [`init_wbits`]: parse an optional `ZINFLATE_WBITS` value.
///
/// Values outside `8..=15` are ignored with a warning.
pub fn init_wbits_from(env_val: Option<&str>) -> u8 {
    let Some(env) = env_val else { return WBITS_DEFAULT };
    match env.trim().parse::<u8>() {
        Ok(bits) if (MIN_WBITS..=MAX_WBITS).contains(&bits) => bits,
        Ok(_) => {
            warn_ignored(ENV_WBITS, env, "window bits must be within 8..15");
            WBITS_DEFAULT
        }
        Err(_) => {
            warn_ignored(ENV_WBITS, env, "not a valid unsigned value");
            WBITS_DEFAULT
        }
    }
}

/// Number of worker threads from `ZINFLATE_NBWORKERS`, or
/// [`NB_WORKERS_DEFAULT`] (`0`: one per core).
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_nb_workers`]: parse an optional
/// `ZINFLATE_NBWORKERS` value.
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    let Some(env) = env_val else { return NB_WORKERS_DEFAULT };
    match env.trim().parse::<u32>() {
        Ok(n) => n as usize,
        Err(_) => {
            warn_ignored(ENV_NBWORKERS, env, "not a valid unsigned value");
            NB_WORKERS_DEFAULT
        }
    }
}
