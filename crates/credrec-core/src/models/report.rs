//! Missing-credit report produced by the reconciler.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::table::{
    CREDIT_AMOUNT_COLUMN, DESCRIPTION_COLUMN, PO_COLUMN, Table, Value,
};
use crate::error::{CredrecError, InputError, Result};

pub const MISSING_IN_COLUMN: &str = "Missing In";
pub const DRUG_CATEGORY_COLUMN: &str = "Drug Category";
pub const REPORT_QUARTER_KEY_COLUMN: &str = "Quarter Key";

/// Fixed output column set, in output order.
pub const REPORT_COLUMNS: [&str; 6] = [
    PO_COLUMN,
    DESCRIPTION_COLUMN,
    CREDIT_AMOUNT_COLUMN,
    MISSING_IN_COLUMN,
    DRUG_CATEGORY_COLUMN,
    REPORT_QUARTER_KEY_COLUMN,
];

/// Which input table lacked a given identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissingIn {
    Base,
    Comparer,
}

impl fmt::Display for MissingIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "Base"),
            Self::Comparer => write!(f, "Comparer"),
        }
    }
}

/// One row of the missing-credit report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "PO #")]
    pub po_number: String,

    #[serde(rename = "DESCRIPTION")]
    pub description: String,

    #[serde(rename = "CREDIT AMT")]
    pub credit_amount: String,

    #[serde(rename = "Missing In")]
    pub missing_in: MissingIn,

    #[serde(rename = "Drug Category")]
    pub drug_category: String,

    #[serde(rename = "Quarter Key")]
    pub quarter_key: String,
}

impl ReportRow {
    fn cells(&self) -> [String; 6] {
        [
            self.po_number.clone(),
            self.description.clone(),
            self.credit_amount.clone(),
            self.missing_in.to_string(),
            self.drug_category.clone(),
            self.quarter_key.clone(),
        ]
    }
}

/// Row counts per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub missing_in_comparer: usize,
    pub missing_in_base: usize,
    pub total: usize,
}

/// Ordered list of report rows: comparer-missing rows first, then base-missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows carrying the given tag.
    pub fn missing_in(&self, side: MissingIn) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(move |r| r.missing_in == side)
    }

    pub fn summary(&self) -> ReportSummary {
        let missing_in_comparer = self.missing_in(MissingIn::Comparer).count();
        ReportSummary {
            missing_in_comparer,
            missing_in_base: self.rows.len() - missing_in_comparer,
            total: self.rows.len(),
        }
    }

    /// Report as a generic table, for previews.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(REPORT_COLUMNS);
        for row in &self.rows {
            table.push_row(row.cells().iter().map(|cell| Value::parse(cell)).collect());
        }
        table
    }

    /// Serialize as CSV with the fixed header, even when empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(REPORT_COLUMNS)?;
        for row in &self.rows {
            wtr.write_record(row.cells())?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| CredrecError::Input(InputError::Malformed(e.to_string())))
    }

    /// Read a report previously written by [`Report::write_csv`].
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();
        for column in REPORT_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(InputError::MissingColumn {
                    column: column.to_string(),
                }
                .into());
            }
        }

        let rows = rdr
            .deserialize::<ReportRow>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| InputError::Malformed(e.to_string()))?;
        Ok(Self { rows })
    }
}

impl FromIterator<ReportRow> for Report {
    fn from_iter<I: IntoIterator<Item = ReportRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
