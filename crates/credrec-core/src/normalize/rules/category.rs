//! Drug category extraction.

use super::super::patterns::CATEGORY_SPAN;
use super::FieldExtractor;

/// Extracts the text between the category marker and a trailing `rbt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryExtractor;

impl CategoryExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for CategoryExtractor {
    type Output = String;

    fn extract(&self, identifier: &str) -> Option<String> {
        let caps = CATEGORY_SPAN.captures(identifier)?;
        let category = caps[1].trim();
        if category.is_empty() {
            return None;
        }
        Some(category.to_string())
    }
}

/// Extract the category from a canonical identifier.
pub fn extract_category(identifier: &str) -> Option<String> {
    CategoryExtractor::new().extract(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_category() {
        assert_eq!(extract_category("q101 onmk arbt"), Some("a".to_string()));
        assert_eq!(extract_category("q203onmark insulin 12.5%rbt"), Some("insulin 12.5%".to_string()));
    }

    #[test]
    fn test_missing_rbt_marker() {
        assert_eq!(extract_category("q101 onmk druga 5%"), None);
    }

    #[test]
    fn test_missing_category_marker() {
        assert_eq!(extract_category("q101 druga rbt"), None);
    }
}
