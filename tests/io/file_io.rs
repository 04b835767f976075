// Integration tests for src/io/file_io.rs: sources, destinations, naming.

use std::io::{Read, Write};

use zinflate::io::file_io::{
    open_dst_file, open_src_file, output_name_for, output_name_with, DstFile, DstKind, NUL_MARK,
    STDOUT_MARK,
};
use zinflate::io::Prefs;

#[test]
fn src_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.zz");
    std::fs::write(&path, vec![7u8; 200_000]).unwrap();
    let mut src = open_src_file(path.to_str().unwrap()).unwrap();
    let mut buf = Vec::new();
    src.read_to_end(&mut buf).unwrap();
    assert_eq!(buf.len(), 200_000);
}

#[test]
fn dst_file_creates_and_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh");
    let mut dst = open_dst_file(path.to_str().unwrap(), &Prefs::default()).unwrap();
    assert_eq!(dst.kind(), DstKind::File);
    dst.write_all(b"hello").unwrap();
    dst.flush().unwrap();
    drop(dst);
    assert_eq!(std::fs::read(&path).unwrap(), b"hello");
}

#[test]
fn dst_file_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out");
    assert!(open_dst_file(path.to_str().unwrap(), &Prefs::default()).is_err());
}

#[test]
fn discard_and_sentinels() {
    let mut d = DstFile::discard();
    d.write_all(b"dropped").unwrap();
    assert!(!d.is_file());
    assert_eq!(open_dst_file(NUL_MARK, &Prefs::default()).unwrap().kind(), DstKind::Discard);
    assert_eq!(open_dst_file(STDOUT_MARK, &Prefs::default()).unwrap().kind(), DstKind::Stdout);
}

#[test]
fn output_names() {
    assert_eq!(output_name_for("/tmp/a/b.tar.zz").unwrap(), "/tmp/a/b.tar");
    assert!(output_name_for("b.tar.gz").is_err());
    assert_eq!(output_name_with("b.deflate", ".deflate").unwrap(), "b");
    let err = output_name_for("README").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}
