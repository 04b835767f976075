#![no_main]
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use libfuzzer_sys::fuzz_target;
use zinflate::{Inflater, Status};

fuzz_target!(|data: &[u8]| {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    let compressed = enc.finish().unwrap();

    // One-shot decode.
    let recovered = zinflate::decompress_to_vec(&compressed).unwrap_or_else(|e| {
        panic!("round-trip failed on {} input bytes: {}", data.len(), e)
    });
    assert_eq!(recovered, data);

    // Byte-at-a-time decode must agree.
    let mut inf = Inflater::new();
    let mut out = Vec::with_capacity(data.len());
    let mut byte = [0u8; 1];
    let mut pos = 0usize;
    loop {
        let end = (pos + 1).min(compressed.len());
        let r = inf.step(&compressed[pos..end], &mut byte);
        pos += r.bytes_consumed;
        out.extend_from_slice(&byte[..r.bytes_written]);
        match r.status.unwrap() {
            Status::StreamEnd => break,
            Status::NeedMoreInput if pos == compressed.len() => panic!("stalled at end of input"),
            _ => {}
        }
    }
    assert_eq!(out, data);
});
