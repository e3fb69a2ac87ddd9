//! Identifier-keyed bidirectional reconciliation.

use std::collections::HashSet;

use tracing::{debug, info};

use super::sort::sort;
use crate::error::Result;
use crate::models::report::{MissingIn, Report, ReportRow};
use crate::models::table::{CREDIT_AMOUNT_COLUMN, DESCRIPTION_COLUMN, PO_COLUMN, Table};
use crate::normalize::{normalize, NormalizedRow, NormalizedTable};

/// Rows present on one side and absent from the other, keyed on identifier.
///
/// Base rows missing from the comparer come first, tagged
/// [`MissingIn::Comparer`], followed by comparer rows missing from the base,
/// tagged [`MissingIn::Base`]. Input order is kept within each group.
/// Duplicate identifiers are not collapsed: each raw row is reported once.
pub fn reconcile(base: &NormalizedTable, comparer: &NormalizedTable) -> Report {
    let base_ids = base.identifiers();
    let comparer_ids = comparer.identifiers();

    let missing_in_comparer = missing_rows(base, &comparer_ids, MissingIn::Comparer);
    let missing_in_base = missing_rows(comparer, &base_ids, MissingIn::Base);

    debug!(
        "{} rows missing in comparer, {} rows missing in base",
        missing_in_comparer.len(),
        missing_in_base.len()
    );

    missing_in_comparer
        .into_iter()
        .chain(missing_in_base)
        .collect()
}

fn missing_rows(source: &NormalizedTable, other: &HashSet<&str>, side: MissingIn) -> Vec<ReportRow> {
    source
        .rows()
        .iter()
        .filter(|row| !other.contains(row.identifier.as_str()))
        .map(|row| project(source, row, side))
        .collect()
}

/// Project a normalized row onto the fixed report columns.
fn project(table: &NormalizedTable, row: &NormalizedRow, side: MissingIn) -> ReportRow {
    let view = table.view(row);
    ReportRow {
        po_number: view.text(PO_COLUMN),
        description: view.text(DESCRIPTION_COLUMN),
        credit_amount: view.text(CREDIT_AMOUNT_COLUMN),
        missing_in: side,
        drug_category: row.category.clone().unwrap_or_default(),
        quarter_key: row.quarter_key.clone().unwrap_or_default(),
    }
}

/// Full comparison pipeline: normalize, sort, and reconcile both tables.
pub fn compare(base: &Table, comparer: &Table) -> Result<Report> {
    let base = sort(&normalize(base)?);
    let comparer = sort(&normalize(comparer)?);

    let report = reconcile(&base, &comparer);
    info!(
        "Compared {} base rows against {} comparer rows: {} missing",
        base.len(),
        comparer.len(),
        report.len()
    );
    Ok(report)
}
