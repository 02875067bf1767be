//! Rolling per-line hash over normalized file content.
//!
//! Each line's hash covers the first [`BLOCK_SIZE`] normalized characters starting at that
//! line. Normalization drops spaces and tabs and folds `\r`, `\n` and `\r\n` into a single
//! `\n`. Characters are UTF-16 code units, and the arithmetic is wrapping `u64`; both are
//! load-bearing for compatibility with fingerprints produced by other implementations.

use linehash_types::LineFingerprint;
use std::collections::HashMap;
use std::str::EncodeUtf16;

/// Number of normalized characters that contribute to each line's hash.
pub const BLOCK_SIZE: usize = 100;

const BASE: u64 = 37;

/// Fed once after the last input character, so trailing lines hash differently from zero fill.
const END_OF_INPUT: u16 = 65535;

const TAB: u16 = b'\t' as u16;
const SPACE: u16 = b' ' as u16;
const LF: u16 = b'\n' as u16;
const CR: u16 = b'\r' as u16;

/// `BASE^BLOCK_SIZE mod 2^64`: the weight of the character leaving the window.
const EVICT_WEIGHT: u64 = evict_weight();

const fn evict_weight() -> u64 {
    let mut w = 1u64;
    let mut i = 0;
    while i < BLOCK_SIZE {
        w = w.wrapping_mul(BASE);
        i += 1;
    }
    w
}

/// Hash every line of `content`.
///
/// Yields `(line_number, fingerprint)` once per line in ascending order, starting at 1.
/// Lines are the segments produced by splitting on `\r\n`, `\r` or `\n`, so empty content
/// still yields line 1 and a trailing terminator yields a final empty line.
pub fn hash_lines(content: &str) -> LineHasher<'_> {
    LineHasher::new(content)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Input,
    /// Zero characters still to feed after the end-of-input marker.
    Flush(usize),
    Done,
}

/// Iterator state for [`hash_lines`].
///
/// `line_numbers[i]` records the line that started at window slot `i` and has not been
/// emitted yet. A line is emitted right before its slot is overwritten, i.e. once
/// [`BLOCK_SIZE`] characters starting at that line have been folded into the hash.
#[derive(Clone, Debug)]
pub struct LineHasher<'a> {
    units: EncodeUtf16<'a>,
    phase: Phase,
    window: [u16; BLOCK_SIZE],
    line_numbers: [Option<u32>; BLOCK_SIZE],
    index: usize,
    hash: u64,
    line_number: u32,
    line_start: bool,
    prev_cr: bool,
    /// Occurrences of each hash seen so far in this file.
    hash_counts: HashMap<u64, u32>,
}

impl<'a> LineHasher<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            units: content.encode_utf16(),
            phase: Phase::Input,
            window: [0; BLOCK_SIZE],
            line_numbers: [None; BLOCK_SIZE],
            index: 0,
            hash: 0,
            line_number: 0,
            line_start: true,
            prev_cr: false,
            hash_counts: HashMap::new(),
        }
    }

    /// Consume one input character. Returns the line whose window completed, if any.
    fn consume(&mut self, unit: u16) -> Option<(u32, LineFingerprint)> {
        if unit == SPACE || unit == TAB || (self.prev_cr && unit == LF) {
            self.prev_cr = false;
            return None;
        }

        let current = if unit == CR {
            self.prev_cr = true;
            LF
        } else {
            self.prev_cr = false;
            unit
        };

        let emitted = self.take_pending();

        if self.line_start {
            self.line_start = false;
            self.line_number += 1;
            self.line_numbers[self.index] = Some(self.line_number);
        }
        if current == LF {
            self.line_start = true;
        }

        self.roll(current);
        emitted
    }

    /// Emit the line recorded at the current slot, using the hash as it stands now.
    fn take_pending(&mut self) -> Option<(u32, LineFingerprint)> {
        let line = self.line_numbers[self.index].take()?;
        let count = self.hash_counts.entry(self.hash).or_insert(0);
        *count += 1;
        Some((line, LineFingerprint::new(self.hash, *count)))
    }

    fn roll(&mut self, current: u16) {
        let evicted = self.window[self.index];
        self.window[self.index] = current;
        self.hash = self
            .hash
            .wrapping_mul(BASE)
            .wrapping_add(u64::from(current))
            .wrapping_sub(EVICT_WEIGHT.wrapping_mul(u64::from(evicted)));
        self.index = (self.index + 1) % BLOCK_SIZE;
    }
}

impl Iterator for LineHasher<'_> {
    type Item = (u32, LineFingerprint);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::Input => {
                    let unit = match self.units.next() {
                        Some(u) => u,
                        None => {
                            self.phase = Phase::Flush(BLOCK_SIZE);
                            END_OF_INPUT
                        }
                    };
                    if let Some(out) = self.consume(unit) {
                        return Some(out);
                    }
                }
                Phase::Flush(0) => {
                    self.phase = Phase::Done;
                    return None;
                }
                Phase::Flush(remaining) => {
                    self.phase = Phase::Flush(remaining - 1);
                    let emitted = self.take_pending();
                    self.roll(0);
                    if emitted.is_some() {
                        return emitted;
                    }
                }
                Phase::Done => return None,
            }
        }
    }
}

impl std::iter::FusedIterator for LineHasher<'_> {}
