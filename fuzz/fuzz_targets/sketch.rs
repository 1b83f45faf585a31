#![no_main]

use hll_estimator::sketch::Sketch;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut lhs = Sketch::new(64).unwrap();
    for chunk in first_half.chunks(4) {
        let mut bytes = [0u8; 4];
        bytes[..chunk.len()].copy_from_slice(chunk);
        lhs.insert_value(u32::from_le_bytes(bytes));
    }

    let mut rhs = Sketch::new(64).unwrap();
    for chunk in second_half.chunks(4) {
        let mut bytes = [0u8; 4];
        bytes[..chunk.len()].copy_from_slice(chunk);
        rhs.insert_value(u32::from_le_bytes(bytes));
    }

    let before = lhs.registers().to_vec();
    lhs.merge(&rhs).unwrap();
    for ((merged, old), other) in lhs.registers().iter().zip(&before).zip(rhs.registers()) {
        assert!(merged >= old);
        assert!(merged >= other);
        assert_eq!(*merged, (*old).max(*other));
    }
});
