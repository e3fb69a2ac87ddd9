//! In-memory tabular data: cells, rows, and tables with named columns.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Purchase-order column, the only column the normalizer requires.
pub const PO_COLUMN: &str = "PO #";
pub const DESCRIPTION_COLUMN: &str = "DESCRIPTION";
pub const CREDIT_AMOUNT_COLUMN: &str = "CREDIT AMT";
pub const DRUG_NAME_COLUMN: &str = "DRUG NAME";
pub const DRUG_LETTER_COLUMN: &str = "DRUG LETTER";
pub const QUARTER_KEY_COLUMN: &str = "QUARTER KEY";
pub const ACCOUNT_COLUMN: &str = "ACCOUNT";

static EMPTY: Value = Value::Empty;

/// A single cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Value {
    /// Missing or blank cell.
    #[default]
    Empty,
    /// Plain decimal literal.
    Number(Decimal),
    /// Anything else.
    Text(String),
}

impl Value {
    /// Parse a raw field as read from delimited text.
    ///
    /// Blank fields become [`Value::Empty`], plain decimal literals become
    /// [`Value::Number`], everything else is kept verbatim as text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Empty;
        }
        match Decimal::from_str(trimmed) {
            Ok(number) if trimmed == raw && number.to_string() == raw => Value::Number(number),
            _ => Value::Text(raw.to_string()),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.is_empty(),
            Value::Number(_) => false,
        }
    }

    /// Ordering used for preview sorts: numbers numerically, text
    /// lexicographically, numbers before text, empties last.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Empty, Value::Empty) => Ordering::Equal,
            (Value::Empty, _) => Ordering::Greater,
            (_, Value::Empty) => Ordering::Less,
            (Value::Number(a), Value::Number(b)) => a.cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::parse(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::parse(&s)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A row of values aligned with its table's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Value at a column position; out-of-range positions read as empty.
    pub fn get(&self, index: usize) -> &Value {
        self.0.get(index).unwrap_or(&EMPTY)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

/// Borrowed view of one row together with the column names.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl<'a> RowView<'a> {
    pub fn new(columns: &'a [String], row: &'a Row) -> Self {
        Self { columns, row }
    }

    /// Look up a value by column name. Absent columns read as empty.
    pub fn get(&self, column: &str) -> &'a Value {
        match self.columns.iter().position(|c| c == column) {
            Some(index) => self.row.get(index),
            None => &EMPTY,
        }
    }

    /// Value by name as a string, `""` for empty or absent.
    pub fn text(&self, column: &str) -> String {
        self.get(column).to_string()
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }
}

/// Table with ordered, named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from string cells, parsing each with [`Value::parse`].
    pub fn from_records<I, R, S>(columns: &[&str], records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Table::new(columns.iter().copied());
        for record in records {
            table.push_row(record.into_iter().map(|s| Value::parse(s.as_ref())).collect());
        }
        table
    }

    /// Append a row, padding short rows with empties and dropping overflow.
    pub fn push_row(&mut self, mut values: Vec<Value>) {
        values.resize(self.columns.len(), Value::Empty);
        self.rows.push(Row(values));
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Iterate rows as name-addressable views.
    pub fn iter(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(|row| RowView::new(&self.columns, row))
    }

    pub fn view(&self, index: usize) -> Option<RowView<'_>> {
        self.rows.get(index).map(|row| RowView::new(&self.columns, row))
    }

    /// First `n` rows as a new table.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Select columns by name in the given order. Columns the table lacks are
    /// filled with empty values.
    pub fn project(&self, columns: &[&str]) -> Table {
        let indices: Vec<Option<usize>> = columns.iter().map(|c| self.column_index(c)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                Row(indices
                    .iter()
                    .map(|idx| idx.map(|i| row.get(i).clone()).unwrap_or_default())
                    .collect())
            })
            .collect();

        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Return a copy with `column` set to `values`, replacing an existing
    /// column of that name or appending a new one.
    pub fn with_column(&self, column: &str, values: Vec<Value>) -> Table {
        let mut table = self.clone();
        let index = match table.column_index(column) {
            Some(index) => index,
            None => {
                table.columns.push(column.to_string());
                for row in &mut table.rows {
                    row.0.push(Value::Empty);
                }
                table.columns.len() - 1
            }
        };

        for (row, value) in table.rows.iter_mut().zip(values) {
            row.0[index] = value;
        }
        table
    }

    /// Rebuild a table from a header and already-aligned rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Table {
        let mut table = Table {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push_row(row.into_values());
        }
        table
    }

    /// SHA-256 over the header and every cell's text.
    pub fn content_hash(&self) -> ContentHash {
        const UNIT: &[u8] = &[0x1f];
        const RECORD: &[u8] = &[0x1e];

        let mut hasher = Sha256::new();
        for column in &self.columns {
            hasher.update(column.as_bytes());
            hasher.update(UNIT);
        }
        hasher.update(RECORD);
        for row in &self.rows {
            for value in &row.0 {
                // Tag the variant so "" and an empty cell hash differently.
                let tag: &[u8] = match value {
                    Value::Empty => b"e",
                    Value::Number(_) => b"n",
                    Value::Text(_) => b"t",
                };
                hasher.update(tag);
                hasher.update(value.to_string().as_bytes());
                hasher.update(UNIT);
            }
            hasher.update(RECORD);
        }
        ContentHash(hasher.finalize().into())
    }
}

/// Digest of a table's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
