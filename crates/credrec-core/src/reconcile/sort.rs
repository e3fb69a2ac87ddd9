//! Deterministic preview ordering.

use std::cmp::Ordering;

use crate::models::table::{DRUG_NAME_COLUMN, PO_COLUMN, QUARTER_KEY_COLUMN, Row, Table};
use crate::normalize::rules::{quarter_rank, quarter_year};
use crate::normalize::NormalizedTable;

/// Order normalized rows by category, then by quarter rank.
///
/// Absent categories sort first. The sort is stable, so rows with equal keys
/// keep their input order.
pub fn sort(table: &NormalizedTable) -> NormalizedTable {
    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| {
        a.category
            .as_deref()
            .cmp(&b.category.as_deref())
            .then_with(|| {
                quarter_rank(a.quarter_key.as_deref()).cmp(&quarter_rank(b.quarter_key.as_deref()))
            })
    });
    table.with_rows(rows)
}

/// Order raw rows by `DRUG NAME`, then by quarter.
///
/// The quarter comes from `QUARTER KEY` when `use_quarter_key` is set,
/// otherwise it is decoded from the `PO #` prefix, with undecodable POs last.
pub fn sort_by_drug_and_quarter(table: &Table, use_quarter_key: bool) -> Table {
    let drug = table.column_index(DRUG_NAME_COLUMN);
    let quarter = table.column_index(QUARTER_KEY_COLUMN);
    let po = table.column_index(PO_COLUMN);

    let cell = |row: &Row, index: Option<usize>| index.map(|i| row.get(i).clone()).unwrap_or_default();

    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| {
        let by_drug = cell(a, drug).sort_cmp(&cell(b, drug));
        by_drug.then_with(|| {
            if use_quarter_key {
                cell(a, quarter).sort_cmp(&cell(b, quarter))
            } else {
                let qa = quarter_year(&cell(a, po).to_string());
                let qb = quarter_year(&cell(b, po).to_string());
                match (qa, qb) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        })
    });

    Table::from_rows(table.columns().to_vec(), rows)
}
