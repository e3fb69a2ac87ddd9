//! Drug name derivation for tables exported without a `DRUG NAME` column.

use super::super::patterns::{CREDIT_MEMO_DRUG, PO_DRUG_SUFFIX};
use crate::models::table::{DESCRIPTION_COLUMN, DRUG_NAME_COLUMN, PO_COLUMN, RowView, Table, Value};

/// Best-effort drug name for one row.
///
/// Tries, in order: the `DRUG NAME` cell, the name in a
/// `Credit memo: <name> - ...` description, and the PO text following a
/// leading quarter code. Falls back to `""`.
pub fn derive_drug_name(row: &RowView<'_>) -> String {
    let name = row.get(DRUG_NAME_COLUMN);
    if !name.is_empty() {
        return name.to_string().trim().to_string();
    }

    let description = row.get(DESCRIPTION_COLUMN);
    if !description.is_empty() {
        if let Some(caps) = CREDIT_MEMO_DRUG.captures(&description.to_string()) {
            return caps[1].trim().to_string();
        }
    }

    let po = row.get(PO_COLUMN);
    if !po.is_empty() {
        if let Some(caps) = PO_DRUG_SUFFIX.captures(&po.to_string()) {
            return caps[1].trim().to_string();
        }
    }

    String::new()
}

/// Copy of `table` whose `DRUG NAME` column is present on every row.
///
/// An existing column is trimmed; a missing one is derived per row.
pub fn with_drug_names(table: &Table) -> Table {
    let has_column = table.has_column(DRUG_NAME_COLUMN);
    let names = table
        .iter()
        .map(|row| {
            let name = if has_column {
                row.text(DRUG_NAME_COLUMN).trim().to_string()
            } else {
                derive_drug_name(&row)
            };
            Value::Text(name)
        })
        .collect();

    table.with_column(DRUG_NAME_COLUMN, names)
}
