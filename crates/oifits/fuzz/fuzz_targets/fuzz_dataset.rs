//! Fuzz target for dataset deserialization and processing.
//!
//! This fuzzer tests that any dataset that deserializes:
//! 1. Can be checked without panicking, whatever its references
//! 2. Passes through the default filter unchanged in shape
//! 3. Can be merged with itself and upgraded

#![no_main]

use libfuzzer_sys::fuzz_target;
use oifits::{ConformanceChecker, Dataset, FilterSpec, filter, merge, upgrade};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(dataset) = serde_json::from_slice::<Dataset>(data) else {
        return;
    };

    let report = ConformanceChecker::new().run(&dataset);
    let _ = report.worst_level();

    let _ = dataset.missing_references();
    let _ = filter(&dataset, &FilterSpec::default());

    let mut merged = merge([&dataset, &dataset]);
    upgrade(&mut merged);
    let _ = ConformanceChecker::new().run(&merged);
});
