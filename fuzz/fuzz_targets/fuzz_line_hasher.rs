//! Fuzz target for the rolling line hasher.
//!
//! Goal: hashing **never panics**, emits exactly one fingerprint per line with contiguous
//! line numbers, and never emits ordinal 0.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_line_hasher
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let mut count = 0u32;
    for (line, fingerprint) in linehash_domain::hash_lines(&text) {
        count += 1;
        assert_eq!(line, count);
        assert!(fingerprint.ordinal >= 1);
    }

    let expected = text
        .split("\r\n")
        .flat_map(|s| s.split(['\r', '\n']))
        .count();
    assert_eq!(count as usize, expected);
});
