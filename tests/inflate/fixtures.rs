// Shared stream fixtures for the inflate integration tests.
//
// Reference streams come from flate2, a conformant zlib encoder, so every
// test decodes bytes produced by an independent implementation.
#![allow(dead_code)]

use std::io::Write;

use flate2::write::{DeflateEncoder, ZlibEncoder};
use flate2::Compression;

use zinflate::inflate::{Inflater, Status, StepResult};

/// zlib("abc") at the default level.
pub const ZLIB_ABC: [u8; 11] = [0x78, 0x9C, 0x4B, 0x4C, 0x4A, 0x06, 0x00, 0x02, 0x4D, 0x01, 0x27];

/// Raw DEFLATE payload of [`ZLIB_ABC`].
pub const RAW_ABC: [u8; 5] = [0x4B, 0x4C, 0x4A, 0x06, 0x00];

/// Deterministic, moderately compressible text.
pub fn sample_text(len: usize) -> Vec<u8> {
    const WORDS: [&str; 12] = [
        "inflate ", "window ", "adler ", "block ", "stream ", "header ", "trailer ", "huffman ",
        "literal ", "distance ", "length ", "session ",
    ];
    let mut out = Vec::with_capacity(len + 16);
    let mut x: u32 = 0x9E37_79B9;
    while out.len() < len {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        out.extend_from_slice(WORDS[(x % WORDS.len() as u32) as usize].as_bytes());
        if x % 7 == 0 {
            out.push(b'\n');
        }
    }
    out.truncate(len);
    out
}

/// Deterministic pseudo-random bytes (incompressible).
pub fn noise(len: usize) -> Vec<u8> {
    let mut x: u64 = 0x2545_F491_4F6C_DD1D;
    (0..len)
        .map(|_| {
            x ^= x << 7;
            x ^= x >> 9;
            (x >> 24) as u8
        })
        .collect()
}

pub fn zlib(data: &[u8], level: u32) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::new(level));
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn deflate(data: &[u8], level: u32) -> Vec<u8> {
    let mut enc = DeflateEncoder::new(Vec::new(), Compression::new(level));
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

/// Wraps a raw payload in a zlib container with the given CMF byte. FLG is
/// chosen so the header check holds.
pub fn wrap_zlib(cmf: u8, raw: &[u8], data: &[u8]) -> Vec<u8> {
    let rem = (u32::from(cmf) << 8) % 31;
    let flg = if rem == 0 { 0 } else { (31 - rem) as u8 };
    let mut out = vec![cmf, flg];
    out.extend_from_slice(raw);
    out.extend_from_slice(&zinflate::inflate::adler32_oneshot(data).to_be_bytes());
    out
}

/// Outcome of driving a session over a whole input.
#[derive(Debug)]
pub struct Drive {
    pub output: Vec<u8>,
    pub consumed: usize,
    pub last: StepResult,
}

/// Feeds `input` in `in_chunk`-sized pieces with `out_chunk`-sized output
/// windows until the session ends, errors, or stalls.
pub fn drive(inf: &mut Inflater, input: &[u8], in_chunk: usize, out_chunk: usize) -> Drive {
    let mut output = Vec::new();
    let mut pos = 0usize;
    let mut buf = vec![0u8; out_chunk];
    loop {
        let end = (pos + in_chunk).min(input.len());
        let res = inf.step(&input[pos..end], &mut buf);
        pos += res.bytes_consumed;
        output.extend_from_slice(&buf[..res.bytes_written]);
        match res.status {
            Ok(Status::StreamEnd) | Err(_) => {
                return Drive { output, consumed: pos, last: res };
            }
            Ok(Status::NeedMoreInput) if end == input.len() => {
                return Drive { output, consumed: pos, last: res };
            }
            _ => {}
        }
    }
}
