//! Single-direction diff over the columns two tables have in common.
//!
//! This mode de-duplicates each side on the compared columns before taking
//! the set difference, unlike [`super::reconcile`] which keeps every row.

use std::collections::HashSet;

use tracing::{debug, info};

use super::sort::sort_by_drug_and_quarter;
use crate::error::{ReconcileError, Result};
use crate::models::table::{
    ACCOUNT_COLUMN, CREDIT_AMOUNT_COLUMN, DESCRIPTION_COLUMN, DRUG_LETTER_COLUMN,
    DRUG_NAME_COLUMN, PO_COLUMN, QUARTER_KEY_COLUMN, Row, Table,
};
use crate::normalize::rules::with_drug_names;

/// Output columns of the diff report.
pub const DIFF_COLUMNS: [&str; 7] = [
    ACCOUNT_COLUMN,
    PO_COLUMN,
    DESCRIPTION_COLUMN,
    CREDIT_AMOUNT_COLUMN,
    DRUG_LETTER_COLUMN,
    DRUG_NAME_COLUMN,
    QUARTER_KEY_COLUMN,
];

/// Column names present in both tables, in `base` order.
pub fn common_columns(base: &Table, comparer: &Table) -> Vec<String> {
    base.columns()
        .iter()
        .filter(|c| comparer.has_column(c))
        .cloned()
        .collect()
}

/// Rows of `comparer` with no equal row in `base`, compared over the common
/// columns plus a derived `DRUG NAME`.
///
/// Both sides get a `DRUG NAME` column and are ordered by drug then quarter
/// before comparing. The set of missing keys is distinct, but every comparer
/// row carrying a missing key is reported, in sorted order, including rows
/// that differ only in columns the base lacks.
///
/// Fails with [`ReconcileError::NoCommonColumns`] when the headers are
/// disjoint, which is distinct from an empty result.
pub fn diff(base: &Table, comparer: &Table) -> Result<Table> {
    let mut key_columns = common_columns(base, comparer);
    if key_columns.is_empty() {
        return Err(ReconcileError::NoCommonColumns.into());
    }
    if !key_columns.iter().any(|c| c == DRUG_NAME_COLUMN) {
        key_columns.push(DRUG_NAME_COLUMN.to_string());
    }

    let use_quarter_key = base.has_column(QUARTER_KEY_COLUMN) && comparer.has_column(QUARTER_KEY_COLUMN);
    let base = sort_by_drug_and_quarter(&with_drug_names(base), use_quarter_key);
    let comparer = sort_by_drug_and_quarter(&with_drug_names(comparer), use_quarter_key);

    let key_refs: Vec<&str> = key_columns.iter().map(String::as_str).collect();
    debug!("Comparing on columns: {:?}", key_refs);

    let base_keys: HashSet<Row> = base.project(&key_refs).rows().iter().cloned().collect();

    let comparer_keys = comparer.project(&key_refs);
    let missing_keys: HashSet<&Row> = comparer_keys
        .rows()
        .iter()
        .filter(|key| !base_keys.contains(*key))
        .collect();

    let missing: Vec<Row> = comparer_keys
        .rows()
        .iter()
        .zip(comparer.rows())
        .filter(|(key, _)| missing_keys.contains(key))
        .map(|(_, row)| row.clone())
        .collect();

    info!(
        "{} distinct keys missing from base, {} of {} comparer rows",
        missing_keys.len(),
        missing.len(),
        comparer.len()
    );

    let missing = Table::from_rows(comparer.columns().to_vec(), missing);
    Ok(missing.project(&DIFF_COLUMNS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CredrecError;
    use pretty_assertions::assert_eq;

    fn pos(table: &Table) -> Vec<String> {
        table.iter().map(|r| r.text("PO #")).collect()
    }

    #[test]
    fn test_disjoint_headers_are_an_error() {
        let base = Table::from_records(&["A"], [["1"]]);
        let comparer = Table::from_records(&["B"], [["1"]]);

        let err = diff(&base, &comparer).unwrap_err();
        assert!(matches!(err, CredrecError::Reconcile(ReconcileError::NoCommonColumns)));
    }

    #[test]
    fn test_no_differences_is_empty_table() {
        let base = Table::from_records(&["PO #", "CREDIT AMT"], [["Q124 Humira", "10.00"]]);
        let result = diff(&base, &base.clone()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.columns().len(), DIFF_COLUMNS.len());
    }

    #[test]
    fn test_finds_comparer_only_rows() {
        let base = Table::from_records(
            &["PO #", "CREDIT AMT"],
            [["Q124 Humira", "10.00"], ["Q224 Humira", "12.00"]],
        );
        let comparer = Table::from_records(
            &["PO #", "CREDIT AMT", "ACCOUNT"],
            [["Q124 Humira", "10.00", "1001"], ["Q324 Humira", "11.00", "1001"]],
        );

        let result = diff(&base, &comparer).unwrap();
        assert_eq!(pos(&result), vec!["Q324 Humira"]);

        let row = result.view(0).unwrap();
        assert_eq!(row.text("ACCOUNT"), "1001");
        assert_eq!(row.text("DRUG NAME"), "Humira");
        assert_eq!(row.text("DRUG LETTER"), "");
    }

    #[test]
    fn test_amount_change_counts_as_missing() {
        let base = Table::from_records(&["PO #", "CREDIT AMT"], [["Q124 Humira", "10.00"]]);
        let comparer = Table::from_records(&["PO #", "CREDIT AMT"], [["Q124 Humira", "10.50"]]);
        assert_eq!(diff(&base, &comparer).unwrap().len(), 1);
    }

    #[test]
    fn test_every_row_with_a_missing_key_is_reported() {
        let base = Table::from_records(&["PO #"], [["Q124 Humira"]]);
        let comparer = Table::from_records(
            &["PO #", "DESCRIPTION"],
            [["Q224 Enbrel", "first"], ["Q224 Enbrel", "second"], ["Q224 Enbrel", "first"]],
        );

        let result = diff(&base, &comparer).unwrap();
        let descriptions: Vec<String> = result.iter().map(|r| r.text("DESCRIPTION")).collect();
        assert_eq!(descriptions, vec!["first", "second", "first"]);
    }

    #[test]
    fn test_rows_differing_only_in_comparer_columns_are_all_reported() {
        let base = Table::from_records(&["PO #", "CREDIT AMT"], [["Q124 Humira", "10.00"]]);
        let comparer = Table::from_records(
            &["PO #", "CREDIT AMT", "ACCOUNT"],
            [["Q224 Enbrel", "5.00", "1001"], ["Q224 Enbrel", "5.00", "2002"]],
        );

        let result = diff(&base, &comparer).unwrap();
        let accounts: Vec<String> = result.iter().map(|r| r.text("ACCOUNT")).collect();
        assert_eq!(accounts, vec!["1001", "2002"]);
    }

    #[test]
    fn test_quarter_key_orders_when_both_sides_have_it() {
        let base = Table::from_records(&["PO #", "QUARTER KEY"], [["Q999 none", "q999"]]);
        // PO prefixes would order these the other way round.
        let comparer = Table::from_records(
            &["PO #", "QUARTER KEY"],
            [["Q124 Humira", "q224"], ["Q224 Humira", "q124"]],
        );

        let result = diff(&base, &comparer).unwrap();
        assert_eq!(pos(&result), vec!["Q224 Humira", "Q124 Humira"]);
    }

    #[test]
    fn test_quarter_key_on_one_side_falls_back_to_po() {
        let base = Table::from_records(&["PO #"], [["Q999 none"]]);
        let comparer = Table::from_records(
            &["PO #", "QUARTER KEY"],
            [["Q124 Humira", "q224"], ["Q224 Humira", "q124"]],
        );

        let result = diff(&base, &comparer).unwrap();
        assert_eq!(pos(&result), vec!["Q124 Humira", "Q224 Humira"]);
    }

    #[test]
    fn test_output_follows_drug_then_quarter() {
        let base = Table::from_records(&["PO #"], [["Q999 none"]]);
        let comparer = Table::from_records(
            &["PO #"],
            [["Q224 Humira"], ["Q124 Humira"], ["Q423 Enbrel"]],
        );

        let result = diff(&base, &comparer).unwrap();
        assert_eq!(pos(&result), vec!["Q423 Enbrel", "Q124 Humira", "Q224 Humira"]);
    }
}
