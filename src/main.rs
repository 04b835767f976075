//! Binary entry point for the `zinflate` command-line tool.
//!
//! # Control flow
//!
//! 1. [`parse_args`] resolves flags and environment defaults into a
//!    [`ParsedArgs`] value.
//! 2. [`run`] expands directories, applies the console guards, dispatches to
//!    the I/O layer and returns an exit code.

use std::io::IsTerminal;
use std::path::Path;

use zinflate::cli::args::{parse_args, OutputTarget, ParsedArgs};
use zinflate::cli::constants::{display_level, set_display_level, welcome_message, PROGRAM_NAME};
use zinflate::cli::op_mode::OpMode;
use zinflate::config::{MULTITHREAD, ZLIB_EXTENSION};
use zinflate::io::{
    decompress_filename, decompress_multiple_filenames, NUL_MARK, STDIN_MARK, STDOUT_MARK,
};

/// Execute the operation selected by argument parsing.
///
/// Returns the process exit code (0 = success, 1 = at least one failure).
fn run(args: ParsedArgs) -> i32 {
    let ParsedArgs { prefs, op_mode, output, mut inputs, recursive, force_stdout, display_level: level } =
        args;
    set_display_level(level);

    zinflate::displaylevel!(3, "{}", welcome_message());

    if !MULTITHREAD && prefs.nb_workers > 1 {
        zinflate::displaylevel!(2, "warning: this executable doesn't support multithreading \n");
    }

    // ── Recursive directory expansion ───────────────────────────────────────
    if recursive {
        let paths: Vec<&Path> = inputs.iter().map(|s| Path::new(s.as_str())).collect();
        match zinflate::util::create_file_list(&paths, true) {
            Ok(list) => {
                for (u, p) in list.iter().enumerate() {
                    zinflate::displaylevel!(4, "{} {}\n", u, p.display());
                }
                inputs = list.into_iter().map(|p| p.to_string_lossy().into_owned()).collect();
            }
            Err(e) => {
                zinflate::displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
                return 1;
            }
        }
        if inputs.is_empty() {
            zinflate::displaylevel!(1, "{}: no input files\n", PROGRAM_NAME);
            return 1;
        }
    }

    // ── Console guards ──────────────────────────────────────────────────────
    if inputs.iter().any(|i| i == STDIN_MARK) && std::io::stdin().is_terminal() {
        zinflate::displaylevel!(1, "refusing to read from a console\n");
        return 1;
    }

    let writes_stdout = op_mode == OpMode::Decompress && output == OutputTarget::Stdout;
    if writes_stdout && std::io::stdout().is_terminal() && !force_stdout {
        zinflate::displaylevel!(1, "refusing to write to console without -c \n");
        return 1;
    }

    // Keep stderr quiet while decoded data goes to stdout.
    if writes_stdout && display_level() == 2 {
        set_display_level(1);
    }

    // ── Dispatch ────────────────────────────────────────────────────────────
    let srcs: Vec<&str> = inputs.iter().map(String::as_str).collect();
    let failures = match (op_mode, &output) {
        (OpMode::Test, _) => decompress_multiple_filenames(&srcs, NUL_MARK, &prefs),
        (OpMode::Decompress, OutputTarget::File(dst)) => {
            let src = srcs.first().copied().unwrap_or(STDIN_MARK);
            match decompress_filename(src, dst, &prefs) {
                Ok(_) => 0,
                Err(e) => {
                    zinflate::displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
                    1
                }
            }
        }
        (OpMode::Decompress, OutputTarget::Stdout) => {
            decompress_multiple_filenames(&srcs, STDOUT_MARK, &prefs)
        }
        (OpMode::Decompress, OutputTarget::Derived) => {
            decompress_multiple_filenames(&srcs, ZLIB_EXTENSION, &prefs)
        }
    };

    if failures > 0 {
        1
    } else {
        0
    }
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => match e.downcast::<clap::Error>() {
            Ok(clap_err) => clap_err.exit(),
            Err(e) => {
                zinflate::display!("{}: {}\n", PROGRAM_NAME, e);
                std::process::exit(1);
            }
        },
    };
    std::process::exit(run(args));
}
