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

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ahash::AHashSet;
use csv::{ReaderBuilder, Trim};
use log::{debug, info};

use crate::error::{Result, StrError};
use crate::strs::span_vector;

/// One individual in the reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub counts: Vec<usize>, // one entry per marker, in header order
}

/// Outcome of comparing a sample against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Identified(String),
    NoMatch,
}

impl MatchResult {
    pub fn name(&self) -> Option<&str> {
        match self {
            MatchResult::Identified(name) => Some(name),
            MatchResult::NoMatch => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Identified(name) => write!(f, "{}", name),
            MatchResult::NoMatch => write!(f, "No match"),
        }
    }
}

/// Reference table of STR profiles: the ordered marker list and the
/// profiles in file order.
#[derive(Debug, Clone)]
pub struct ProfileTable {
    markers: Vec<String>,
    profiles: Vec<Profile>,
}

impl ProfileTable {
    /// Build a table, checking that markers are non-empty and distinct and
    /// that every profile carries one count per marker.
    pub fn new(markers: Vec<String>, profiles: Vec<Profile>) -> Result<Self> {
        if markers.is_empty() {
            return Err(StrError::MissingHeader);
        }
        let mut seen = AHashSet::with_capacity(markers.len());
        for (i, marker) in markers.iter().enumerate() {
            if marker.is_empty() {
                return Err(StrError::EmptyMarker { column: i + 2 });
            }
            if !seen.insert(marker.as_str()) {
                return Err(StrError::DuplicateMarker {
                    marker: marker.clone(),
                });
            }
        }
        check_profile_lengths(&profiles, markers.len())?;
        Ok(Self { markers, profiles })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a CSV table. The first header field labels the name column and
    /// is dropped; the remaining header fields are the markers.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let markers: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
        let expected = headers.len();

        let mut profiles = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            if record.len() != expected {
                return Err(StrError::RowLength {
                    line,
                    expected,
                    found: record.len(),
                });
            }
            let name = record.get(0).unwrap_or_default().to_string();
            if name.is_empty() {
                return Err(StrError::EmptyName { line });
            }
            let counts = record
                .iter()
                .skip(1)
                .zip(&markers)
                .map(|(value, marker)| {
                    parse_count(value).ok_or_else(|| StrError::InvalidCount {
                        line,
                        marker: marker.clone(),
                        value: value.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            profiles.push(Profile { name, counts });
        }

        let table = Self::new(markers, profiles)?;
        info!(
            "loaded {} profiles over {} markers",
            table.profiles.len(),
            table.markers.len()
        );
        Ok(table)
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Compare a precomputed count vector against every profile in table order.
    pub fn match_counts(&self, counts: &[usize]) -> Result<MatchResult> {
        if counts.len() != self.markers.len() {
            return Err(StrError::SampleLength {
                expected: self.markers.len(),
                found: counts.len(),
            });
        }
        Ok(first_exact_match(&self.profiles, counts))
    }

    /// Count every marker in `sample` and return the first profile with the
    /// same count vector.
    pub fn identify(&self, sample: &str) -> Result<MatchResult> {
        find_match(&self.profiles, self.markers.as_slice(), sample)
    }
}

/// Repeat counts are plain decimal digits; signs and blanks are rejected.
fn parse_count(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn check_profile_lengths(profiles: &[Profile], expected: usize) -> Result<()> {
    match profiles.iter().find(|p| p.counts.len() != expected) {
        Some(p) => Err(StrError::ProfileLength {
            name: p.name.clone(),
            expected,
            found: p.counts.len(),
        }),
        None => Ok(()),
    }
}

fn first_exact_match(profiles: &[Profile], counts: &[usize]) -> MatchResult {
    profiles
        .iter()
        .find(|p| p.counts.as_slice() == counts)
        .map_or(MatchResult::NoMatch, |p| MatchResult::Identified(p.name.clone()))
}

/// Identify which profile produced `sample`.
///
/// The sample's count vector is built from `markers` in order, then compared
/// by value against each profile in the order given; the first exact match
/// wins. Any profile whose vector length differs from `markers.len()` is
/// rejected with [`StrError::ProfileLength`] before comparison.
pub fn find_match<S>(profiles: &[Profile], markers: &[S], sample: &str) -> Result<MatchResult>
where
    S: AsRef<str> + Sync,
{
    check_profile_lengths(profiles, markers.len())?;

    let spans = span_vector(sample, markers);
    if log::log_enabled!(log::Level::Debug) {
        for (marker, span) in markers.iter().zip(&spans) {
            let marker = marker.as_ref();
            match span {
                Some(span) => debug!(
                    "{}: {} repeats at {}..{}",
                    marker,
                    span.repeats,
                    span.start,
                    span.end(marker.len())
                ),
                None => debug!("{}: not found", marker),
            }
        }
    }
    let counts: Vec<usize> = spans.iter().map(|s| s.map_or(0, |s| s.repeats)).collect();

    Ok(first_exact_match(profiles, &counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, counts: &[usize]) -> Profile {
        Profile {
            name: name.to_string(),
            counts: counts.to_vec(),
        }
    }

    fn alice_sample() -> String {
        format!("GCTA{}CCG{}TTAGATAGAT", "AGAT".repeat(3), "AATG".repeat(5))
    }

    #[test]
    fn test_find_match_identifies_alice() {
        let profiles = vec![profile("Alice", &[3, 5]), profile("Bob", &[2, 8])];
        let result = find_match(&profiles, &["AGAT", "AATG"], &alice_sample()).unwrap();
        assert_eq!(result, MatchResult::Identified("Alice".to_string()));
        assert_eq!(result.to_string(), "Alice");
    }

    #[test]
    fn test_find_match_no_match() {
        let profiles = vec![profile("Alice", &[3, 4]), profile("Bob", &[2, 8])];
        let result = find_match(&profiles, &["AGAT", "AATG"], &alice_sample()).unwrap();
        assert_eq!(result, MatchResult::NoMatch);
        assert_eq!(result.name(), None);
        assert_eq!(result.to_string(), "No match");
    }

    #[test]
    fn test_find_match_empty_table() {
        let profiles: Vec<Profile> = Vec::new();
        let result = find_match(&profiles, &["AGAT"], "AGATAGAT").unwrap();
        assert_eq!(result, MatchResult::NoMatch);
    }

    #[test]
    fn test_first_profile_wins_on_identical_vectors() {
        let profiles = vec![
            profile("Bob", &[2, 8]),
            profile("Alice", &[3, 5]),
            profile("Carol", &[3, 5]),
        ];
        let result = find_match(&profiles, &["AGAT", "AATG"], &alice_sample()).unwrap();
        assert_eq!(result.name(), Some("Alice"));
    }

    #[test]
    fn test_profile_length_mismatch_is_an_error() {
        let profiles = vec![profile("Alice", &[3, 5]), profile("Bob", &[2])];
        let err = find_match(&profiles, &["AGAT", "AATG"], &alice_sample()).unwrap_err();
        match err {
            StrError::ProfileLength {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "Bob");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_find_match_is_deterministic() {
        let profiles = vec![profile("Alice", &[3, 5]), profile("Bob", &[2, 8])];
        let sample = alice_sample();
        let first = find_match(&profiles, &["AGAT", "AATG"], &sample).unwrap();
        for _ in 0..5 {
            assert_eq!(find_match(&profiles, &["AGAT", "AATG"], &sample).unwrap(), first);
        }
    }

    #[test]
    fn test_table_from_reader() {
        let csv = "name,AGATC,AATG,TATC\nAlice,2,8,3\nBob,4,1,5\nCharlie,3,2,5\n";
        let table = ProfileTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.markers(), &["AGATC", "AATG", "TATC"]);
        assert_eq!(table.profiles().len(), 3);
        assert_eq!(table.profiles()[1], profile("Bob", &[4, 1, 5]));

        let sample = format!(
            "{}G{}C{}",
            "AGATC".repeat(4),
            "AATG".repeat(1),
            "TATC".repeat(5)
        );
        assert_eq!(table.identify(&sample).unwrap().name(), Some("Bob"));
        assert_eq!(table.identify("ACGT").unwrap(), MatchResult::NoMatch);
    }

    #[test]
    fn test_table_accepts_crlf_and_padding() {
        let csv = "name, AGAT ,AATG\r\nAlice, 3,5\r\n\r\nBob,2 ,8\r\n";
        let table = ProfileTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.markers(), &["AGAT", "AATG"]);
        assert_eq!(table.profiles()[0], profile("Alice", &[3, 5]));
        assert_eq!(table.profiles()[1], profile("Bob", &[2, 8]));
        assert_eq!(table.match_counts(&[2, 8]).unwrap().name(), Some("Bob"));
    }

    #[test]
    fn test_table_rejects_bad_count() {
        let csv = "name,AGAT,AATG\nAlice,3,five\n";
        match ProfileTable::from_reader(csv.as_bytes()).unwrap_err() {
            StrError::InvalidCount { line, marker, value } => {
                assert_eq!(line, 2);
                assert_eq!(marker, "AATG");
                assert_eq!(value, "five");
            }
            other => panic!("unexpected error: {other}"),
        }

        for bad in ["-1", "+3", "3.0", "0x3", ""] {
            let csv = format!("name,AGAT\nAlice,{}\n", bad);
            assert!(
                matches!(
                    ProfileTable::from_reader(csv.as_bytes()),
                    Err(StrError::InvalidCount { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_table_rejects_empty_name() {
        let csv = "name,AGAT,AATG\nAlice,3,5\n ,2,8\n";
        assert!(matches!(
            ProfileTable::from_reader(csv.as_bytes()),
            Err(StrError::EmptyName { line: 3 })
        ));
    }

    #[test]
    fn test_table_rejects_ragged_row() {
        let csv = "name,AGAT,AATG\nAlice,3,5\nBob,2\n";
        match ProfileTable::from_reader(csv.as_bytes()).unwrap_err() {
            StrError::RowLength {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_table_rejects_bad_header() {
        assert!(matches!(
            ProfileTable::from_reader("".as_bytes()),
            Err(StrError::MissingHeader)
        ));
        assert!(matches!(
            ProfileTable::from_reader("name\nAlice\n".as_bytes()),
            Err(StrError::MissingHeader)
        ));
        assert!(matches!(
            ProfileTable::from_reader("name,AGAT,AGAT\nAlice,1,2\n".as_bytes()),
            Err(StrError::DuplicateMarker { .. })
        ));
        assert!(matches!(
            ProfileTable::from_reader("name,AGAT,,AATG\nAlice,1,2,3\n".as_bytes()),
            Err(StrError::EmptyMarker { column: 3 })
        ));
    }

    #[test]
    fn test_match_counts_rejects_wrong_sample_length() {
        let table = ProfileTable::new(
            vec!["AGAT".to_string(), "AATG".to_string()],
            vec![profile("Alice", &[3, 5])],
        )
        .unwrap();
        let err = table.match_counts(&[3]).unwrap_err();
        assert!(matches!(
            err,
            StrError::SampleLength {
                expected: 2,
                found: 1
            }
        ));
        assert_eq!(err.to_string(), "sample has 1 counts but there are 2 markers");
    }
}
