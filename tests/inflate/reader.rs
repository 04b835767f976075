// `InflateReader` and the one-shot helpers over `std::io`.

use std::io::{self, BufReader, Read};

use crate::fixtures::{sample_text, zlib, ZLIB_ABC};
use zinflate::inflate::{
    decompress_to_vec, DataError, InflateError, InflateReader, Inflater,
};

#[test]
fn reader_small_buffers() {
    let data = sample_text(30_000);
    let stream = zlib(&data, 6);
    let mut r = InflateReader::new(BufReader::with_capacity(5, &stream[..]));
    let mut out = Vec::new();
    let mut buf = [0u8; 7];
    loop {
        let n = r.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, data);
    assert!(r.is_done());
    assert_eq!(r.total_in(), stream.len() as u64);
    assert_eq!(r.total_out(), data.len() as u64);
    assert_eq!(r.read(&mut buf).unwrap(), 0);
}

#[test]
fn concatenated_streams_read_back_to_back() {
    let a = sample_text(5_000);
    let b = b"second member".to_vec();
    let mut joined = zlib(&a, 6);
    joined.extend_from_slice(&zlib(&b, 1));

    let mut first = InflateReader::new(BufReader::with_capacity(64, &joined[..]));
    let mut out_a = Vec::new();
    first.read_to_end(&mut out_a).unwrap();
    assert_eq!(out_a, a);

    let mut second = InflateReader::new(first.into_inner());
    let mut out_b = Vec::new();
    second.read_to_end(&mut out_b).unwrap();
    assert_eq!(out_b, b);
}

#[test]
fn reader_with_custom_inflater() {
    let data = sample_text(2_000);
    let stream = crate::fixtures::deflate(&data, 6);
    let inf = Inflater::with_window(-15).unwrap();
    let mut r = InflateReader::with_inflater(&stream[..], inf);
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
    assert!(r.inflater().is_raw());
}

#[test]
fn reader_error_kinds() {
    let mut corrupt = ZLIB_ABC;
    corrupt[10] ^= 0x01;
    let err = InflateReader::new(&corrupt[..]).read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    let inner = err.into_inner().unwrap();
    assert_eq!(
        inner.downcast_ref::<InflateError>(),
        Some(&InflateError::Data(DataError::DataIntegrityMismatch))
    );

    let err = InflateReader::new(&ZLIB_ABC[..5]).read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

    let err = InflateReader::new(&[0u8; 0][..]).read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn one_shot_ignores_trailing_garbage() {
    let mut input = ZLIB_ABC.to_vec();
    input.extend_from_slice(&[0xFF; 16]);
    assert_eq!(decompress_to_vec(&input).unwrap(), b"abc");
}

#[test]
fn one_shot_large_output_grows() {
    let data = vec![b'z'; 1 << 20];
    let stream = zlib(&data, 9);
    assert!(stream.len() < 8 * 1024);
    assert_eq!(decompress_to_vec(&stream).unwrap(), data);
}

#[test]
fn one_shot_every_truncation_fails() {
    let stream = zlib(&sample_text(500), 6);
    for cut in 0..stream.len() {
        let err = decompress_to_vec(&stream[..cut]).unwrap_err();
        assert_eq!(err, InflateError::Data(DataError::Truncated), "cut at {cut}");
    }
}
