#![no_main]

use std::io::Cursor;

use hll_estimator::distribution::RhoDistribution;
use hll_estimator::protocol::read_batch;
use hll_estimator::sketch::Sketch;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(values) = read_batch(&mut Cursor::new(data)) else {
        return;
    };

    let mut sketch = Sketch::new(16).unwrap();
    let mut dist = RhoDistribution::new(4);
    for &value in &values {
        sketch.insert_value(value);
        dist.observe_value(value);
    }

    assert_eq!(dist.total(), values.len() as u64);
    if let Ok(estimate) = sketch.estimate() {
        assert!(estimate >= 0.0);
        assert!(estimate.is_finite());
    }
});
