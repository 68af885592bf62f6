//! Fuzz target for GlobPattern.
//!
//! This fuzzer tests that name patterns:
//! 1. Never panic when compiled from any string
//! 2. Treat regex metacharacters literally
//! 3. Always match themselves when free of wildcards

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use oifits::GlobPattern;

#[derive(Debug, Arbitrary)]
struct Input {
    pattern: String,
    name: String,
}

fuzz_target!(|input: Input| {
    let Ok(pattern) = GlobPattern::new(&input.pattern) else {
        return;
    };

    let _ = pattern.matches(&input.name);

    if !input.pattern.contains(['*', '?']) {
        assert!(pattern.matches(&input.pattern));
    }
    if pattern.is_any() {
        assert!(pattern.matches(&input.name));
    }
});
