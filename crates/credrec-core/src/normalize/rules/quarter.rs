//! Quarter key extraction and decoding.

use super::super::patterns::{QUARTER_KEY, QUARTER_YEAR};
use super::FieldExtractor;

/// Extracts the leading `q` + 3 digit token of an identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuarterExtractor;

impl QuarterExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for QuarterExtractor {
    type Output = String;

    fn extract(&self, identifier: &str) -> Option<String> {
        QUARTER_KEY
            .captures(identifier)
            .map(|caps| caps[1].to_string())
    }
}

/// Extract the quarter key from a canonical identifier.
pub fn extract_quarter_key(identifier: &str) -> Option<String> {
    QuarterExtractor::new().extract(identifier)
}

/// Numeric rank of a quarter key: the digits after the leading letter.
///
/// Absent or unparseable keys rank as zero.
pub fn quarter_rank(quarter_key: Option<&str>) -> u32 {
    quarter_key
        .and_then(|key| {
            let mut chars = key.chars();
            chars.next()?;
            chars.as_str().parse().ok()
        })
        .unwrap_or(0)
}

/// Fiscal quarter and year decoded from a `Q<quarter><yy>` prefix.
///
/// Field order gives chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuarterYear {
    pub year: i32,
    pub quarter: u8,
}

/// Decode quarter and year from text starting with e.g. `Q124` (Q1 2024).
pub fn quarter_year(text: &str) -> Option<QuarterYear> {
    let caps = QUARTER_YEAR.captures(text.trim())?;
    let quarter: u8 = caps[1].parse().ok()?;
    let year: i32 = caps[2].parse().ok()?;
    Some(QuarterYear {
        year: 2000 + year,
        quarter,
    })
}
