//! Named regex patterns for purchase-order normalization.
//!
//! Respacing patterns operate on a collapsed (whitespace-free, lower-cased)
//! PO string; extraction patterns operate on the final identifier.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Respacing: quarter token glued to the category marker ("q101onmk")
    pub static ref QUARTER_BEFORE_MARKER: Regex = Regex::new(
        r"(q\d{3})(onmk)"
    ).unwrap();

    // Respacing: category marker glued to the following word ("onmkdruga")
    pub static ref MARKER_BEFORE_WORD: Regex = Regex::new(
        r"(onmark|onmk)([a-z]+)"
    ).unwrap();

    // Respacing: letter glued to a percentage ("druga5%")
    pub static ref WORD_BEFORE_PERCENT: Regex = Regex::new(
        r"([a-z])(\d+(?:\.\d+)?%)"
    ).unwrap();

    // Extraction: leading quarter token
    pub static ref QUARTER_KEY: Regex = Regex::new(
        r"^(q\d{3})"
    ).unwrap();

    // Extraction: category between the marker and a trailing "rbt"
    pub static ref CATEGORY_SPAN: Regex = Regex::new(
        r"(?:onmark|onmk)\s*(.+?)\s*rbt"
    ).unwrap();

    // Quarter/year decoding on a raw PO: quarter digit then two-digit year ("Q124")
    pub static ref QUARTER_YEAR: Regex = Regex::new(
        r"^Q(\d)(\d{2})"
    ).unwrap();

    // Drug name fallback: "Credit memo: <name> - ..."
    pub static ref CREDIT_MEMO_DRUG: Regex = Regex::new(
        r"Credit memo\s*:\s*([^\-]+)"
    ).unwrap();

    // Drug name fallback: text after a leading "Q" + 3 or 4 digits in a raw PO
    pub static ref PO_DRUG_SUFFIX: Regex = Regex::new(
        r"^Q\d{3,4}\s*(.*)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quarter_before_marker() {
        assert_eq!(QUARTER_BEFORE_MARKER.replace_all("q101onmkdruga", "$1 $2"), "q101 onmkdruga");
        // Only three digits form a quarter token.
        assert!(!QUARTER_BEFORE_MARKER.is_match("q10onmk"));
    }

    #[test]
    fn test_marker_before_word() {
        assert_eq!(MARKER_BEFORE_WORD.replace_all("onmkdruga", "$1 $2"), "onmk druga");
        assert_eq!(MARKER_BEFORE_WORD.replace_all("onmarkdruga", "$1 $2"), "onmark druga");
        assert!(!MARKER_BEFORE_WORD.is_match("onmk5%"));
    }

    #[test]
    fn test_word_before_percent() {
        assert_eq!(WORD_BEFORE_PERCENT.replace_all("druga5%", "$1 $2"), "druga 5%");
        assert_eq!(WORD_BEFORE_PERCENT.replace_all("druga12.5%", "$1 $2"), "druga 12.5%");
        assert!(!WORD_BEFORE_PERCENT.is_match("druga 5%"));
    }

    #[test]
    fn test_quarter_key_is_anchored() {
        assert_eq!(&QUARTER_KEY.captures("q101 onmk a").unwrap()[1], "q101");
        assert!(QUARTER_KEY.captures("x q101").is_none());
    }

    #[test]
    fn test_category_span_is_non_greedy() {
        let caps = CATEGORY_SPAN.captures("q101 onmk a rbt b rbt").unwrap();
        assert_eq!(&caps[1], "a");
    }

    #[test]
    fn test_quarter_year() {
        let caps = QUARTER_YEAR.captures("Q324 ONMK").unwrap();
        assert_eq!((&caps[1], &caps[2]), ("3", "24"));
        // Raw POs only; the lower-cased identifier form does not decode.
        assert!(!QUARTER_YEAR.is_match("q324 onmk"));
    }

    #[test]
    fn test_credit_memo_drug() {
        let caps = CREDIT_MEMO_DRUG.captures("Credit memo : Humira - Q1 2024").unwrap();
        assert_eq!(caps[1].trim(), "Humira");
    }

    #[test]
    fn test_po_drug_suffix() {
        let caps = PO_DRUG_SUFFIX.captures("Q1024 Enbrel").unwrap();
        assert_eq!(&caps[1], "Enbrel");
    }
}
