#![no_main]
use libfuzzer_sys::fuzz_target;
use zinflate::{InflateMode, Inflater};

fuzz_target!(|data: &[u8]| {
    // Arbitrary input may fail but must never panic or overrun.
    let _ = zinflate::decompress_to_vec(data);
    let _ = zinflate::decompress_raw_to_vec(data, 15);

    // Split the input at a data-derived point; the session must stay
    // consistent across calls and keep errors sticky.
    let split = data.first().map_or(0, |&b| usize::from(b)).min(data.len());
    let mut inf = Inflater::new();
    let mut out = [0u8; 4096];
    let first = inf.step(&data[..split], &mut out);
    let second = inf.step(&data[split..], &mut out);
    assert!(first.bytes_consumed <= split);
    assert!(second.bytes_consumed <= data.len() - split);
    if first.status.is_err() {
        assert_eq!(first.status, second.status);
        assert_eq!(second.bytes_consumed, 0);
        assert_ne!(inf.mode(), Some(InflateMode::Done));
    }
});
