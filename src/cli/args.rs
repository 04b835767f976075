//! Command-line argument parsing for the `zinflate` binary.
//!
//! [`Cli`] is the raw `clap` surface. [`parse_args`] (reads `std::env`) and
//! [`parse_args_from`] (explicit argv and environment values, suitable for
//! unit tests) resolve it against the environment defaults into a
//! [`ParsedArgs`] value the dispatcher consumes.
//!
//! Inconsistent combinations return an `Err` whose message begins with
//! `"bad usage: "`.

use anyhow::{anyhow, bail};
use clap::{ArgAction, Parser};

use crate::cli::op_mode::{init_nb_workers_from, init_wbits_from, OpMode, ENV_NBWORKERS, ENV_WBITS};
use crate::inflate::{MAX_WBITS, MIN_WBITS};
use crate::io::{Prefs, STDIN_MARK, STDOUT_MARK};

// ── Raw clap surface ──────────────────────────────────────────────────────────

/// Decompress zlib (`.zz`) streams.
#[derive(Parser, Debug)]
#[command(name = "zinflate", version, about, long_about = None)]
pub struct Cli {
    /// Write to standard output
    #[arg(short = 'c', long = "stdout")]
    pub stdout: bool,

    /// Test integrity of inputs; write nothing
    #[arg(short = 't', long = "test")]
    pub test: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Keep source files (default)
    #[arg(short = 'k', long = "keep", overrides_with = "rm")]
    pub keep: bool,

    /// Remove source files after successful decompression
    #[arg(long = "rm", overrides_with = "keep")]
    pub rm: bool,

    /// Output file name (single input only; `-` for stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,

    /// Descend into directories
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Largest accepted window, as log2 of its size
    #[arg(
        short = 'w',
        long = "window-bits",
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(i64::from(MIN_WBITS)..=i64::from(MAX_WBITS))
    )]
    pub window_bits: Option<u8>,

    /// Inputs are raw DEFLATE streams (no zlib header or trailer)
    #[arg(long = "raw")]
    pub raw: bool,

    /// Number of files decoded concurrently (0: one per core)
    #[arg(short = 'T', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Increase verbosity
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Input files (`-` for stdin); none reads stdin
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,
}

// ── Resolved arguments ────────────────────────────────────────────────────────

/// Where decoded data goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Each input `name.zz` is written to `name`.
    Derived,
    /// Everything is written to standard output, in input order.
    Stdout,
    /// The single input is written to this file.
    File(String),
}

/// Complete set of options and filenames after resolution.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Decompression/IO preferences.
    pub prefs: Prefs,
    /// Resolved operation mode.
    pub op_mode: OpMode,
    /// Destination policy.
    pub output: OutputTarget,
    /// Input names, with `-` already mapped to the stdin sentinel.
    pub inputs: Vec<String>,
    /// Expand directory inputs.
    pub recursive: bool,
    /// Write to stdout even when it is a terminal (`-c` or `-f`).
    pub force_stdout: bool,
    /// Display level selected by `-v` / `-q`.
    pub display_level: u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` with defaults from the process environment.
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    let env_wbits = std::env::var(ENV_WBITS).ok();
    let env_workers = std::env::var(ENV_NBWORKERS).ok();
    parse_args_from(std::env::args(), env_wbits.as_deref(), env_workers.as_deref())
}

/// Parse an explicit argument list (including argv[0]).
///
/// `env_wbits` and `env_workers` stand in for the `ZINFLATE_WBITS` and
/// `ZINFLATE_NBWORKERS` variables. Command-line flags take precedence.
///
/// A `clap` error (including `--help` and `--version`) is returned as the
/// `anyhow` error's source so the caller can let `clap` render it.
pub fn parse_args_from<I, T>(
    argv: I,
    env_wbits: Option<&str>,
    env_workers: Option<&str>,
) -> anyhow::Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(argv)?;
    resolve(cli, env_wbits, env_workers)
}

fn resolve(cli: Cli, env_wbits: Option<&str>, env_workers: Option<&str>) -> anyhow::Result<ParsedArgs> {
    let display_level = (2 + u32::from(cli.verbose)).saturating_sub(u32::from(cli.quiet)).min(4);

    let mut prefs = Prefs::default();
    prefs.set_window_bits(cli.window_bits.unwrap_or_else(|| init_wbits_from(env_wbits)));
    prefs.set_raw(cli.raw);
    prefs.set_test_mode(cli.test);
    prefs.set_overwrite(cli.force);
    prefs.set_remove_src_file(cli.rm);
    prefs.set_nb_workers(cli.threads.unwrap_or_else(|| init_nb_workers_from(env_workers)));

    let op_mode = if cli.test { OpMode::Test } else { OpMode::Decompress };

    let mut inputs: Vec<String> = cli
        .files
        .into_iter()
        .map(|f| if f == "-" { STDIN_MARK.to_owned() } else { f })
        .collect();
    if inputs.is_empty() {
        inputs.push(STDIN_MARK.to_owned());
    }

    let output = match (cli.stdout, cli.output) {
        (true, Some(_)) => bail!("bad usage: --stdout and --output are mutually exclusive"),
        (true, None) => OutputTarget::Stdout,
        (false, Some(o)) => {
            if inputs.len() > 1 || cli.recursive {
                return Err(anyhow!("bad usage: --output requires a single input file"));
            }
            if o == "-" || o == STDOUT_MARK {
                OutputTarget::Stdout
            } else {
                OutputTarget::File(o)
            }
        }
        (false, None) if inputs.iter().all(|i| i == STDIN_MARK) => OutputTarget::Stdout,
        (false, None) => OutputTarget::Derived,
    };

    if inputs.iter().filter(|i| *i == STDIN_MARK).count() > 1 {
        bail!("bad usage: stdin can be read only once");
    }

    Ok(ParsedArgs {
        prefs,
        op_mode,
        output,
        inputs,
        recursive: cli.recursive,
        force_stdout: cli.force || cli.stdout,
        display_level,
    })
}

// ── Unit tests ────────────────────────────────────────────────────────────────
