//! Per-report visible column selection.
//!
//! # Report scoping
//!
//! The selection is stored together with the [`ReportKey`] it was made for.
//! Reading it for any other report yields the default column list instead,
//! so a newly loaded report never inherits the previous report's choice.

use risk_model::{DEFAULT_VISIBLE_COLUMNS, ReportKey};

/// A column selection made for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnVisibility {
    pub report_key: ReportKey,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ColumnVisibilityStore {
    selection: Option<ColumnVisibility>,
}

impl ColumnVisibilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible columns for `report_key`, in display order.
    pub fn visible_columns(&self, report_key: &ReportKey, universe: &[String]) -> Vec<String> {
        match &self.selection {
            Some(selection) if &selection.report_key == report_key => selection.columns.clone(),
            _ => default_visible_columns(universe),
        }
    }

    /// Replace the stored selection. Duplicate names keep their first position.
    pub fn set_visible_columns(&mut self, report_key: &ReportKey, columns: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(columns.len());
        for column in columns {
            if !deduped.contains(&column) {
                deduped.push(column);
            }
        }
        self.selection = Some(ColumnVisibility {
            report_key: report_key.clone(),
            columns: deduped,
        });
    }

    /// Drop `column` from the current selection.
    pub fn hide_column(&mut self, report_key: &ReportKey, universe: &[String], column: &str) {
        let mut columns = self.visible_columns(report_key, universe);
        columns.retain(|visible| visible != column);
        self.set_visible_columns(report_key, columns);
    }

    /// Column picker checkbox: remove when visible, otherwise append at the end.
    pub fn toggle_column(&mut self, report_key: &ReportKey, universe: &[String], column: &str) {
        let mut columns = self.visible_columns(report_key, universe);
        if columns.iter().any(|visible| visible == column) {
            columns.retain(|visible| visible != column);
        } else {
            columns.push(column.to_string());
        }
        self.set_visible_columns(report_key, columns);
    }
}

/// Priority columns present in `universe`, in priority order.
pub fn default_visible_columns(universe: &[String]) -> Vec<String> {
    DEFAULT_VISIBLE_COLUMNS
        .iter()
        .filter(|column| universe.iter().any(|present| present.as_str() == **column))
        .map(|column| (*column).to_string())
        .collect()
}
