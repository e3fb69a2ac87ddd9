//! Rule-based transforms for purchase-order text.

pub mod category;
pub mod drug_name;
pub mod identifier;
pub mod quarter;

pub use category::{extract_category, CategoryExtractor};
pub use drug_name::{derive_drug_name, with_drug_names};
pub use identifier::{canonicalize, collapse, respace};
pub use quarter::{extract_quarter_key, quarter_rank, quarter_year, QuarterExtractor, QuarterYear};

/// Trait for fields derived from a canonical identifier.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field, `None` when the identifier does not carry it.
    fn extract(&self, identifier: &str) -> Option<Self::Output>;
}
