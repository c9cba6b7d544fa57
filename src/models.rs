use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A raw spreadsheet cell, as produced by one of the sheet readers.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<CellValue>),
}

impl CellValue {
    /// `true` for cells that were never filled in: empty cells, the empty
    /// string, NaN floats and the textual `nan` marker spreadsheets export for
    /// them. Whitespace-only text is still a value.
    pub fn is_unset(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty() || s.trim().eq_ignore_ascii_case("nan"),
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Like [`is_unset`](Self::is_unset), but whitespace-only text counts as missing too.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty() || self.is_unset(),
            _ => self.is_unset(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            // Integral floats print without the fractional part ("101", not "101.0")
            CellValue::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => {
                write!(f, "{}", *x as i64)
            }
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::List(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter(|c| !c.is_missing())
                    .map(|c| c.to_string().trim().to_string())
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

/// One spreadsheet row: ordered `(column, value)` pairs.
///
/// Column names are expected to be cleaned already
/// (see [`clean_column_name`](crate::normalize::column::clean_column_name)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` when every cell is missing (see [`CellValue::is_missing`]).
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_missing())
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.push(k, v);
        }
        row
    }
}

/// How a catalog field's raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Numeric,
    Boolean,
    Text,
    List,
}

impl std::fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldCategory::Numeric => write!(f, "numeric"),
            FieldCategory::Boolean => write!(f, "boolean"),
            FieldCategory::Text => write!(f, "text"),
            FieldCategory::List => write!(f, "list"),
        }
    }
}

/// A normalized field value. Booleans are the canonical `Text("Yes")` / `Text("No")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Values the record never keeps: empty text, the `nan` marker, empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty() || s == "nan",
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Float(x) => !x.is_finite(),
            FieldValue::Int(_) => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// The normalized form of one row, keyed by canonical field name.
///
/// Serializes as a flat JSON object; omitted fields are absent keys, never `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl NormalizedRecord {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub(crate) fn retain_non_empty(&mut self) {
        self.fields.retain(|_, value| !value.is_empty());
    }
}
