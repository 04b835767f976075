// End-to-end tests of the `zinflate` binary: exit codes, outputs, and the
// file-handling policies selected by flags.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use flate2::write::{DeflateEncoder, ZlibEncoder};
use flate2::Compression;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_zinflate");

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::best());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = DeflateEncoder::new(Vec::new(), Compression::fast());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn text(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog; "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

fn run_with_stdin(dir: &Path, args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    let owned = input.to_vec();
    let feeder = std::thread::spawn(move || {
        let _ = stdin.write_all(&owned);
    });
    let out = child.wait_with_output().unwrap();
    feeder.join().unwrap();
    out
}

#[test]
fn decodes_file_next_to_source() {
    let dir = TempDir::new().unwrap();
    let data = text(40_000);
    fs::write(dir.path().join("doc.txt.zz"), zlib(&data)).unwrap();

    let out = run(dir.path(), &["doc.txt.zz"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("doc.txt")).unwrap(), data);
    assert!(dir.path().join("doc.txt.zz").exists());
}

#[test]
fn stdout_flag_writes_decoded_bytes() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.zz"), zlib(b"first ")).unwrap();
    fs::write(dir.path().join("b.zz"), zlib(b"second")).unwrap();

    let out = run(dir.path(), &["-c", "a.zz", "b.zz"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"first second");
}

#[test]
fn test_mode_reports_failures_only() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ok.zz"), zlib(b"fine")).unwrap();
    assert!(run(dir.path(), &["-t", "ok.zz"]).status.success());
    assert!(!dir.path().join("ok").exists());

    let mut bad = zlib(&text(5_000));
    let last = bad.len() - 1;
    bad[last] ^= 0x01;
    fs::write(dir.path().join("bad.zz"), bad).unwrap();
    let out = run(dir.path(), &["-t", "ok.zz", "bad.zz"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad.zz"));
}

#[test]
fn unknown_suffix_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plain.gz"), zlib(b"x")).unwrap();
    let out = run(dir.path(), &["plain.gz"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn existing_output_needs_force() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("f.zz"), zlib(b"fresh")).unwrap();
    fs::write(dir.path().join("f"), b"stale").unwrap();

    assert_eq!(run(dir.path(), &["f.zz"]).status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("f")).unwrap(), b"stale");

    assert!(run(dir.path(), &["-f", "f.zz"]).status.success());
    assert_eq!(fs::read(dir.path().join("f")).unwrap(), b"fresh");
}

#[test]
fn rm_removes_source() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("g.zz"), zlib(b"gone")).unwrap();
    assert!(run(dir.path(), &["--rm", "g.zz"]).status.success());
    assert!(!dir.path().join("g.zz").exists());
    assert_eq!(fs::read(dir.path().join("g")).unwrap(), b"gone");
}

#[test]
fn pipe_stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    let data = text(200_000);
    let out = run_with_stdin(dir.path(), &[], &zlib(&data));
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, data);
}

#[test]
fn explicit_output_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.zz"), zlib(b"named")).unwrap();
    assert!(run(dir.path(), &["-o", "elsewhere.bin", "in.zz"]).status.success());
    assert_eq!(fs::read(dir.path().join("elsewhere.bin")).unwrap(), b"named");
}

#[test]
fn recursive_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("tree/sub")).unwrap();
    fs::write(dir.path().join("tree/x.zz"), zlib(b"x")).unwrap();
    fs::write(dir.path().join("tree/sub/y.zz"), zlib(b"y")).unwrap();

    let out = run(dir.path(), &["-r", "tree"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("tree/x")).unwrap(), b"x");
    assert_eq!(fs::read(dir.path().join("tree/sub/y")).unwrap(), b"y");
}

#[test]
fn raw_streams() {
    let dir = TempDir::new().unwrap();
    let data = text(9_000);
    let out = run_with_stdin(dir.path(), &["--raw", "-c"], &deflate(&data));
    assert!(out.status.success());
    assert_eq!(out.stdout, data);
}

#[test]
fn corrupt_file_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let mut stream = zlib(&text(60_000));
    stream.truncate(stream.len() / 2);
    fs::write(dir.path().join("cut.zz"), stream).unwrap();

    let out = run(dir.path(), &["cut.zz"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("cut").exists());
}

#[test]
fn window_limit_applies_to_header_nibble() {
    let dir = TempDir::new().unwrap();
    // CMF 0xF8: deflate with the largest window nibble.
    fs::write(dir.path().join("w.zz"), [0xF8u8, 0x01, 0x00]).unwrap();
    let out = run(dir.path(), &["-w", "8", "-t", "w.zz"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid window size"));

    // Ordinary streams still decode with the smallest limit.
    fs::write(dir.path().join("ok.zz"), zlib(&text(1_000))).unwrap();
    assert!(run(dir.path(), &["-w", "8", "-t", "ok.zz"]).status.success());
}

#[test]
fn version_flag() {
    let out = run(Path::new("."), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn bad_usage_exits_one() {
    let out = run(Path::new("."), &["-c", "-o", "x", "a.zz"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad usage"));
}
