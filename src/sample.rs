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

use std::io::Cursor;
use std::path::Path;

use log::warn;
use needletail::parse_fastx_reader;

use crate::error::{Result, StrError};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read the sample sequence from `path`.
///
/// FASTA/FASTQ files (plain or gzipped) yield the first record's sequence.
/// Anything else is taken as raw sequence text with trailing whitespace removed.
pub fn read_sample<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = std::fs::read(path)?;
    parse_sample(bytes)
}

pub fn parse_sample(bytes: Vec<u8>) -> Result<String> {
    let seq = if is_fastx(&bytes) {
        first_record(bytes)?
    } else {
        String::from_utf8(bytes)?.trim_end().to_string()
    };
    if seq.is_empty() {
        return Err(StrError::EmptySample);
    }
    Ok(seq)
}

fn is_fastx(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC) || matches!(bytes.first(), Some(b'>' | b'@'))
}

fn first_record(bytes: Vec<u8>) -> Result<String> {
    let mut reader = parse_fastx_reader(Cursor::new(bytes))?;
    let (id, seq) = match reader.next() {
        Some(record) => {
            let record = record?;
            (
                String::from_utf8_lossy(record.id()).into_owned(),
                record.seq().to_vec(),
            )
        }
        None => return Err(StrError::EmptySample),
    };
    if reader.next().is_some() {
        warn!("sample has more than one record, only {} is analysed", id);
    }
    Ok(String::from_utf8(seq)?)
}
