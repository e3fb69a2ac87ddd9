//! Canonical identifier construction from raw PO text.

use super::super::patterns::{MARKER_BEFORE_WORD, QUARTER_BEFORE_MARKER, WORD_BEFORE_PERCENT};

/// Strip all whitespace and lower-case.
pub fn collapse(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Reinsert single spaces at the three known junctions of a collapsed PO.
///
/// Order matters: the quarter/marker split runs first so the marker is
/// already isolated on its left when the marker/word split runs.
pub fn respace(collapsed: &str) -> String {
    let text = QUARTER_BEFORE_MARKER.replace_all(collapsed, "$1 $2");
    let text = MARKER_BEFORE_WORD.replace_all(&text, "$1 $2");
    let text = WORD_BEFORE_PERCENT.replace_all(&text, "$1 $2");
    text.into_owned()
}

/// Full pipeline: collapse, respace, trim.
pub fn canonicalize(raw: &str) -> String {
    respace(&collapse(raw)).trim().to_string()
}
