/*
 * strmatch - STR Profile Matching Tool
 *
 * Copyright (c) 2025 Yumi Sims, Wellcome Sanger Institute
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use rayon::prelude::*;

/// Leftmost longest run of a repeat unit within a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpan {
    pub start: usize,   // byte offset of the first copy
    pub repeats: usize, // number of back-to-back copies
}

impl RunSpan {
    /// Byte offset one past the last copy of a unit of length `unit_len`.
    pub fn end(&self, unit_len: usize) -> usize {
        self.start + self.repeats * unit_len
    }
}

/// Count consecutive, non-overlapping copies of `unit` beginning exactly at `start`.
fn run_at(seq: &[u8], unit: &[u8], start: usize) -> usize {
    let k = unit.len();
    let mut current_run = 0;
    let mut i = start;
    while i + k <= seq.len() && &seq[i..i + k] == unit {
        current_run += 1;
        i += k;
    }
    current_run
}

/// Find the longest stretch of back-to-back copies of `unit` in `sequence`.
///
/// Every start offset is tried left to right and the run is walked forward in
/// strides of `unit.len()`, so overlapping occurrences never extend a run.
/// On ties the leftmost run is kept. Returns `None` when `unit` never occurs.
///
/// `unit` must not be empty.
pub fn longest_run_span(sequence: &str, unit: &str) -> Option<RunSpan> {
    let seq_bytes = sequence.as_bytes();
    let unit_bytes = unit.as_bytes();
    let k = unit_bytes.len();
    debug_assert!(k > 0, "repeat unit must not be empty");
    if k == 0 || k > seq_bytes.len() {
        return None;
    }

    let mut best: Option<RunSpan> = None;
    for i in 0..=seq_bytes.len() - k {
        if &seq_bytes[i..i + k] != unit_bytes {
            continue;
        }
        let current_run = run_at(seq_bytes, unit_bytes, i);
        if best.is_none_or(|b| current_run > b.repeats) {
            best = Some(RunSpan {
                start: i,
                repeats: current_run,
            });
        }
    }
    best
}

/// Longest number of consecutive, non-overlapping repeats of `unit` in `sequence`, or 0.
pub fn longest_run(sequence: &str, unit: &str) -> usize {
    longest_run_span(sequence, unit).map_or(0, |span| span.repeats)
}

/// Leftmost longest run of each marker in `sequence`, in marker order.
///
/// Markers are scanned in parallel; the output keeps marker order.
pub fn span_vector<S>(sequence: &str, markers: &[S]) -> Vec<Option<RunSpan>>
where
    S: AsRef<str> + Sync,
{
    markers
        .par_iter()
        .map(|marker| longest_run_span(sequence, marker.as_ref()))
        .collect()
}

/// Build the count vector for `markers`: position `j` holds
/// `longest_run(sequence, markers[j])`.
pub fn count_vector<S>(sequence: &str, markers: &[S]) -> Vec<usize>
where
    S: AsRef<str> + Sync,
{
    span_vector(sequence, markers)
        .into_iter()
        .map(|span| span.map_or(0, |s| s.repeats))
        .collect()
}
