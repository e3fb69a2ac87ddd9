//! Purchase-order normalization.
//!
//! Turns each row's raw `PO #` text into a canonical identifier plus the
//! quarter key and drug category carried inside it.

mod normalizer;
pub mod patterns;
pub mod rules;

pub use normalizer::{normalize, NormalizedRow, NormalizedTable, IDENTIFIER_COLUMN};
pub use rules::FieldExtractor;
