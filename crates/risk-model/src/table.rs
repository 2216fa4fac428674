#![deny(unsafe_code)]

use std::borrow::Cow;
use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::ReportKey;

/// A single scalar cell as delivered by the prediction service.
///
/// `Null` is an explicit JSON null. A column missing from a row is not a
/// `CellValue` at all; lookups return `None` for it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// String form used for filtering, sorting and the value picker.
    ///
    /// Integral numbers print without a fraction (`3`, not `3.0`), and
    /// negative zero prints as `0`.
    pub fn as_display(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Bool(value) => Cow::Borrowed(if *value { "true" } else { "false" }),
            Self::Number(value) if *value == 0.0 => Cow::Borrowed("0"),
            Self::Number(value) => Cow::Owned(value.to_string()),
            Self::Text(value) => Cow::Borrowed(value.as_str()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One result row, keyed by column name in payload order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for fixtures.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Display string of `column`; missing and null cells are blank.
    pub fn display(&self, column: &str) -> Cow<'_, str> {
        self.get(column)
            .map_or(Cow::Borrowed(""), CellValue::as_display)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Immutable snapshot of one report's result rows.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Dataset {
    report_key: ReportKey,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(report_key: impl Into<ReportKey>, rows: Vec<Row>) -> Self {
        Self {
            report_key: report_key.into(),
            rows,
        }
    }

    pub fn empty(report_key: impl Into<ReportKey>) -> Self {
        Self::new(report_key, Vec::new())
    }

    pub fn report_key(&self) -> &ReportKey {
        &self.report_key
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns offered to the column picker: the first row's keys.
    pub fn column_universe(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.columns().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.rows.first().is_some_and(|row| row.contains(column))
    }

    /// Sorted unique display values of `column` across every row.
    ///
    /// Always computed from the full dataset so that a value hidden by a
    /// filter can still be offered for re-showing.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.display(column).into_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
