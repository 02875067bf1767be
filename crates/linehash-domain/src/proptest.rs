//! Property-based tests for the line hasher.
//!
//! These tests use proptest to verify invariants around:
//! - one fingerprint per line, with contiguous line numbers
//! - insensitivity to the line terminator style and to spaces/tabs
//! - ordinals being running per-hash counts

use crate::hasher::hash_lines;
use proptest::prelude::*;
use std::collections::HashMap;

/// Lines made of printable ASCII plus some non-ASCII, without terminators.
fn arb_line() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 \t;(){}=.é€]{0,40}").unwrap()
}

fn arb_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_line(), 0..30)
}

/// Non-empty lines, so a `\r` terminator is never directly followed by a `\n` one.
fn arb_nonempty_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex("[a-zA-Z0-9 \t;(){}=.é€]{1,40}").unwrap(),
        0..30,
    )
}

fn arb_terminator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r"), Just("\r\n")]
}

fn join_with(lines: &[String], terminators: &[&str]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push_str(terminators[(i - 1) % terminators.len()]);
        }
        out.push_str(line);
    }
    out
}

proptest! {
    #[test]
    fn one_fingerprint_per_line(input in "(?s).{0,400}") {
        let expected = input.split("\r\n").flat_map(|s| s.split(['\r', '\n'])).count();
        let lines: Vec<u32> = hash_lines(&input).map(|(l, _)| l).collect();
        prop_assert_eq!(lines.len(), expected);
        for (i, l) in lines.iter().enumerate() {
            prop_assert_eq!(*l as usize, i + 1);
        }
    }

    #[test]
    fn terminator_style_does_not_change_hashes(
        lines in arb_nonempty_lines(),
        terminators in prop::collection::vec(arb_terminator(), 1..5),
    ) {
        let unix = join_with(&lines, &["\n"]);
        let mixed = join_with(&lines, &terminators);

        let a: Vec<String> = hash_lines(&unix).map(|(_, fp)| fp.to_string()).collect();
        let b: Vec<String> = hash_lines(&mixed).map(|(_, fp)| fp.to_string()).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn spaces_and_tabs_do_not_change_hashes(lines in arb_lines()) {
        let original = lines.join("\n");
        let stripped: String = original.chars().filter(|c| *c != ' ' && *c != '\t').collect();

        let a: Vec<_> = hash_lines(&original).collect();
        let b: Vec<_> = hash_lines(&stripped).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn ordinals_count_previous_occurrences(input in "(?s).{0,300}") {
        let mut seen: HashMap<u64, u32> = HashMap::new();
        for (_, fp) in hash_lines(&input) {
            let count = seen.entry(fp.hash).or_insert(0);
            *count += 1;
            prop_assert_eq!(fp.ordinal, *count);
        }
    }
}
