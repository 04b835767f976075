// Adler-32 agreement with the trailers an independent encoder writes.

use crate::fixtures::{noise, sample_text, zlib};
use zinflate::inflate::{adler32_oneshot, Adler32State, TrailerCheck};

fn trailer_of(stream: &[u8]) -> u32 {
    let n = stream.len();
    u32::from_be_bytes([stream[n - 4], stream[n - 3], stream[n - 2], stream[n - 1]])
}

#[test]
fn oneshot_matches_encoder_trailer() {
    for data in [Vec::new(), b"abc".to_vec(), sample_text(9_999), noise(70_000)] {
        let stream = zlib(&data, 6);
        assert_eq!(adler32_oneshot(&data), trailer_of(&stream), "len {}", data.len());
    }
}

#[test]
fn streaming_state_over_uneven_chunks() {
    let data = noise(6_000);
    let mut st = Adler32State::new();
    let mut pos = 0;
    for size in [1usize, 2, 3, 5, 8, 13, 21, 34, 55, 89].iter().cycle() {
        if pos >= data.len() {
            break;
        }
        let end = (pos + size).min(data.len());
        st.write(&data[pos..end]);
        pos = end;
    }
    assert_eq!(st.finish(), adler32_oneshot(&data));
}

#[test]
fn trailer_check_against_real_stream() {
    let data = sample_text(1_234);
    let stream = zlib(&data, 6);
    let mut check = TrailerCheck::new(adler32_oneshot(&data));
    for &b in &stream[stream.len() - 4..] {
        check.push(b);
    }
    assert!(check.is_complete());
    assert_eq!(check.expected(), check.computed());
    assert!(check.matches());
}
