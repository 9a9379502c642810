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

use thiserror::Error;

/// Errors raised while loading a profile table, reading a sample or matching.
#[derive(Error, Debug)]
pub enum StrError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// FASTA/FASTQ record could not be parsed
    #[error("sequence parse error: {0}")]
    Sequence(#[from] needletail::errors::ParseError),

    #[error("profile table has no marker columns")]
    MissingHeader,

    #[error("empty marker name in header column {column}")]
    EmptyMarker { column: usize },

    #[error("line {line}: empty profile name")]
    EmptyName { line: u64 },

    #[error("duplicate marker {marker} in header")]
    DuplicateMarker { marker: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    RowLength {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid repeat count {value:?} for marker {marker}")]
    InvalidCount {
        line: u64,
        marker: String,
        value: String,
    },

    /// A count vector disagrees in length with the marker list.
    #[error("profile {name} has {found} counts but there are {expected} markers")]
    ProfileLength {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("sample has {found} counts but there are {expected} markers")]
    SampleLength { expected: usize, found: usize },

    #[error("sample contains no sequence")]
    EmptySample,

    #[error("sample is not valid UTF-8 text")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, StrError>;
