//! Table-level PO normalization.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::rules::{canonicalize, CategoryExtractor, FieldExtractor, QuarterExtractor};
use crate::error::{InputError, Result};
use crate::models::report::{DRUG_CATEGORY_COLUMN, REPORT_QUARTER_KEY_COLUMN};
use crate::models::table::{PO_COLUMN, Row, RowView, Table, Value};

/// Column holding the canonical identifier when a normalized table is exported.
pub const IDENTIFIER_COLUMN: &str = "Identifier";

/// A raw row plus the fields derived from its PO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRow {
    /// Original cells, aligned with the table's columns.
    pub row: Row,
    /// Canonical PO identifier, never empty.
    pub identifier: String,
    pub quarter_key: Option<String>,
    pub category: Option<String>,
}

/// Normalized copy of an input table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    pub fn new(columns: Vec<String>, rows: Vec<NormalizedRow>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name-addressable view of a row's original cells.
    pub fn view<'a>(&'a self, row: &'a NormalizedRow) -> RowView<'a> {
        RowView::new(&self.columns, &row.row)
    }

    /// Set of all identifiers present.
    pub fn identifiers(&self) -> HashSet<&str> {
        self.rows.iter().map(|r| r.identifier.as_str()).collect()
    }

    /// Replace the row order, keeping the header.
    pub(crate) fn with_rows(&self, rows: Vec<NormalizedRow>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Flatten to a plain table with the derived fields appended as columns.
    pub fn to_table(&self) -> Table {
        let mut columns = self.columns.clone();
        columns.extend(
            [IDENTIFIER_COLUMN, REPORT_QUARTER_KEY_COLUMN, DRUG_CATEGORY_COLUMN]
                .iter()
                .map(|c| c.to_string()),
        );

        let mut table = Table::new(columns);
        for row in &self.rows {
            let mut values = row.row.values().to_vec();
            values.resize(self.columns.len(), Value::Empty);
            values.push(Value::text(row.identifier.clone()));
            values.push(row.quarter_key.clone().map(Value::Text).unwrap_or_default());
            values.push(row.category.clone().map(Value::Text).unwrap_or_default());
            table.push_row(values);
        }
        table
    }
}

/// Normalize every PO in `table`.
///
/// Rows whose identifier comes out empty are dropped. The input is left
/// untouched. Fails only when the table has no `PO #` column.
pub fn normalize(table: &Table) -> Result<NormalizedTable> {
    let po_index = table
        .column_index(PO_COLUMN)
        .ok_or_else(|| InputError::MissingColumn {
            column: PO_COLUMN.to_string(),
        })?;

    let quarters = QuarterExtractor::new();
    let categories = CategoryExtractor::new();

    let mut rows = Vec::with_capacity(table.len());
    let mut dropped = 0usize;

    for row in table.rows() {
        let identifier = canonicalize(&row.get(po_index).to_string());
        if identifier.is_empty() {
            dropped += 1;
            continue;
        }

        rows.push(NormalizedRow {
            row: row.clone(),
            quarter_key: quarters.extract(&identifier),
            category: categories.extract(&identifier),
            identifier,
        });
    }

    if dropped > 0 {
        debug!("Dropped {} rows with an empty PO", dropped);
    }
    debug!("Normalized {} of {} rows", rows.len(), table.len());

    Ok(NormalizedTable::new(table.columns().to_vec(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CredrecError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_derives_fields() {
        let table = Table::from_records(&["PO #", "CREDIT AMT"], [["Q101 ONMK A RBT", "10.00"]]);
        let normalized = normalize(&table).unwrap();

        let row = &normalized.rows()[0];
        assert_eq!(row.identifier, "q101 onmk arbt");
        assert_eq!(row.quarter_key.as_deref(), Some("q101"));
        assert_eq!(row.category.as_deref(), Some("a"));
        assert_eq!(normalized.view(row).text("CREDIT AMT"), "10.00");
    }

    #[test]
    fn test_empty_po_rows_are_dropped() {
        let table = Table::from_records(
            &["PO #", "DESCRIPTION"],
            [["", "null po"], ["   ", "blank po"], ["Q102 ONMK B RBT", "kept"]],
        );
        let normalized = normalize(&table).unwrap();
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.view(&normalized.rows()[0]).text("DESCRIPTION"), "kept");
    }

    #[test]
    fn test_missing_po_column_is_an_error() {
        let table = Table::from_records(&["DESCRIPTION"], [["no po here"]]);
        let err = normalize(&table).unwrap_err();
        assert!(matches!(
            err,
            CredrecError::Input(InputError::MissingColumn { ref column }) if column == "PO #"
        ));
    }

    #[test]
    fn test_numeric_po_is_normalized_as_text() {
        let table = Table::from_records(&["PO #"], [["778"]]);
        let normalized = normalize(&table).unwrap();
        assert_eq!(normalized.rows()[0].identifier, "778");
        assert_eq!(normalized.rows()[0].quarter_key, None);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let table = Table::from_records(&["PO #"], [["Q101 ONMK A RBT"], [""]]);
        let before = table.clone();
        let _ = normalize(&table).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_to_table_appends_derived_columns() {
        let table = Table::from_records(&["PO #"], [["Q101 ONMK drugA 5%"]]);
        let flat = normalize(&table).unwrap().to_table();
        assert_eq!(
            flat.columns(),
            &["PO #", "Identifier", "Quarter Key", "Drug Category"].map(String::from)
        );
        let view = flat.view(0).unwrap();
        assert_eq!(view.text("Identifier"), "q101 onmk druga 5%");
        assert_eq!(view.text("Quarter Key"), "q101");
        assert_eq!(view.text("Drug Category"), "");
    }
}
