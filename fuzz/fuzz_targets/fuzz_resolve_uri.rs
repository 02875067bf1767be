//! Fuzz target for location URI resolution.
//!
//! Goal: percent-decoding, scheme handling and lexical normalization **never panic**, and
//! nothing resolves under a root that does not exist.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_resolve_uri
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    uri: String,
    path: String,
}

fuzz_target!(|input: Input| {
    assert!(linehash_repo::fuzz::resolve_uri(&input.uri).is_none());

    let normalized = linehash_repo::fuzz::normalize(&input.path);
    // Normalizing twice changes nothing.
    assert_eq!(linehash_repo::fuzz::normalize(&normalized), normalized);
});
