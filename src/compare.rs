use crate::error::{Result, StallsError};
use regex::bytes::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Comparison {
    Identical,
    Mismatch(Mismatch),
}

/// First difference between a produced file and its expected fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Mismatch {
    pub(crate) offset: usize,
    /// Byte at `offset` in the produced output, `None` past its end.
    pub(crate) produced: Option<u8>,
    pub(crate) expected: Option<u8>,
    /// Case number of the expected line holding `offset`.
    pub(crate) case: Option<u64>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "first difference at byte {}: produced {}, expected {}",
            self.offset,
            describe(self.produced),
            describe(self.expected)
        )?;
        if let Some(case) = self.case {
            write!(f, " (case #{})", case)?;
        }
        Ok(())
    }
}

fn describe(byte: Option<u8>) -> String {
    match byte {
        Some(b) => format!("{:?}", b as char),
        None => "end of file".to_string(),
    }
}

pub(crate) fn compare(produced: &[u8], expected: &[u8]) -> Comparison {
    let offset = produced
        .iter()
        .zip(expected)
        .position(|(a, b)| a != b)
        .unwrap_or(produced.len().min(expected.len()));

    if offset == produced.len() && offset == expected.len() {
        return Comparison::Identical;
    }

    Comparison::Mismatch(Mismatch {
        offset,
        produced: produced.get(offset).copied(),
        expected: expected.get(offset).copied(),
        case: case_at(expected, offset),
    })
}

pub(crate) fn compare_files(produced: &Path, expected: &Path) -> Result<Comparison> {
    let read = |path: &Path| std::fs::read(path).map_err(|e| StallsError::io(path, e));
    Ok(compare(&read(produced)?, &read(expected)?))
}

fn case_line() -> &'static Regex {
    static CASE_LINE: OnceLock<Regex> = OnceLock::new();
    CASE_LINE.get_or_init(|| Regex::new(r"^Case #([0-9]+):").expect("valid case line pattern"))
}

fn case_at(text: &[u8], offset: usize) -> Option<u64> {
    let start = text[..offset.min(text.len())]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let captures = case_line().captures(&text[start..])?;
    std::str::from_utf8(&captures[1]).ok()?.parse().ok()
}
