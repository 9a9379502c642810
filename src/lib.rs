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

//! Identify which individual in an STR profile table a DNA sample came from.
//!
//! For every marker in the table header the longest run of consecutive,
//! non-overlapping repeats is counted in the sample; the first table row whose
//! counts match exactly is the answer.

pub mod error;
pub mod profiles;
pub mod sample;
pub mod strs;

use std::path::Path;

pub use crate::error::{Result, StrError};
pub use crate::profiles::{find_match, MatchResult, Profile, ProfileTable};
pub use crate::sample::{parse_sample, read_sample};
pub use crate::strs::{count_vector, longest_run, longest_run_span, span_vector, RunSpan};

/// Load the table and the sample, then identify the sample's owner.
pub fn identify_files<P, Q>(table_path: P, sample_path: Q) -> Result<MatchResult>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let table = ProfileTable::from_path(table_path)?;
    let sample = read_sample(sample_path)?;
    table.identify(&sample)
}
