//! View session - one dataset plus the state the user builds on top of it.
//!
//! # Architecture
//!
//! The session owns the loaded [`Dataset`] and the three stores that shape
//! its display, plus the transient "active column" whose value picker is
//! open. User actions arrive as [`ViewIntent`]s; each one is a discrete
//! transition, and [`ViewSession::view`] recomposes the table from scratch.
//!
//! Column selections and hidden values are scoped to a report key and are
//! simply ignored after a different report is loaded. The sort and the active
//! column are not tied to a report and are reset on load.

use tracing::{debug, trace};

use risk_model::{Dataset, ReportKey, value_label};

use crate::{
    ColumnVisibilityStore, ComposedView, SortDirection, SortState, ValueFilterStore, compose,
};

/// A discrete user action on the table.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewIntent {
    /// A new prediction result arrived.
    LoadReport(Dataset),
    /// Replace the visible column list.
    SetVisibleColumns(Vec<String>),
    /// Column picker checkbox.
    ToggleColumn(String),
    /// Remove a column from the table via its header menu.
    HideColumn(String),
    /// Hide or re-show one value of a column.
    ToggleHiddenValue { column: String, value: String },
    SetSort {
        column: String,
        direction: SortDirection,
    },
    ClearSort,
    /// Open the value picker of a column header.
    OpenColumn(String),
    CloseColumn,
}

impl ViewIntent {
    /// Intent name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LoadReport(_) => "load_report",
            Self::SetVisibleColumns(_) => "set_visible_columns",
            Self::ToggleColumn(_) => "toggle_column",
            Self::HideColumn(_) => "hide_column",
            Self::ToggleHiddenValue { .. } => "toggle_hidden_value",
            Self::SetSort { .. } => "set_sort",
            Self::ClearSort => "clear_sort",
            Self::OpenColumn(_) => "open_column",
            Self::CloseColumn => "close_column",
        }
    }

    /// Column the intent targets. Never carries a cell value.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::ToggleColumn(column)
            | Self::HideColumn(column)
            | Self::OpenColumn(column)
            | Self::ToggleHiddenValue { column, .. }
            | Self::SetSort { column, .. } => Some(column.as_str()),
            Self::LoadReport(_)
            | Self::SetVisibleColumns(_)
            | Self::ClearSort
            | Self::CloseColumn => None,
        }
    }
}

/// One entry of a column's value picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueOption {
    pub value: String,
    pub label: String,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub struct ViewSession {
    dataset: Dataset,
    visibility: ColumnVisibilityStore,
    filters: ValueFilterStore,
    sort: SortState,
    active_column: Option<String>,
}

impl ViewSession {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            visibility: ColumnVisibilityStore::new(),
            filters: ValueFilterStore::new(),
            sort: SortState::new(),
            active_column: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn report_key(&self) -> &ReportKey {
        self.dataset.report_key()
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn filters(&self) -> &ValueFilterStore {
        &self.filters
    }

    pub fn active_column(&self) -> Option<&str> {
        self.active_column.as_deref()
    }

    /// All columns the picker can offer.
    pub fn column_universe(&self) -> Vec<String> {
        self.dataset.column_universe()
    }

    pub fn visible_columns(&self) -> Vec<String> {
        self.view().columns
    }

    /// The table as it should be rendered now.
    pub fn view(&self) -> ComposedView<'_> {
        compose(&self.dataset, &self.visibility, &self.filters, &self.sort)
    }

    /// Value picker entries for the active column, if one is open.
    pub fn value_options(&self) -> Vec<ValueOption> {
        self.active_column
            .as_deref()
            .map(|column| self.value_options_for(column))
            .unwrap_or_default()
    }

    /// Every value `column` takes in the unfiltered dataset, so hidden
    /// values stay listed and can be shown again.
    pub fn value_options_for(&self, column: &str) -> Vec<ValueOption> {
        let report_key = self.dataset.report_key();
        self.dataset
            .distinct_values(column)
            .into_iter()
            .map(|value| ValueOption {
                hidden: self.filters.is_value_hidden(report_key, column, &value),
                label: value_label(&value).to_string(),
                value,
            })
            .collect()
    }

    pub fn apply(&mut self, intent: ViewIntent) {
        trace!(
            intent = intent.kind(),
            column = intent.column(),
            "applying view intent"
        );
        match intent {
            ViewIntent::LoadReport(dataset) => self.load_report(dataset),
            ViewIntent::SetVisibleColumns(columns) => self.set_visible_columns(columns),
            ViewIntent::ToggleColumn(column) => self.toggle_column(&column),
            ViewIntent::HideColumn(column) => self.hide_column(&column),
            ViewIntent::ToggleHiddenValue { column, value } => {
                self.toggle_hidden_value(&column, &value);
            }
            ViewIntent::SetSort { column, direction } => self.set_sort(column, direction),
            ViewIntent::ClearSort => self.clear_sort(),
            ViewIntent::OpenColumn(column) => self.open_column(column),
            ViewIntent::CloseColumn => self.close_column(),
        }
    }

    pub fn load_report(&mut self, dataset: Dataset) {
        debug!(
            previous = %self.dataset.report_key(),
            report = %dataset.report_key(),
            rows = dataset.row_count(),
            "report loaded"
        );
        self.dataset = dataset;
        self.sort.clear_sort();
        self.active_column = None;
    }

    pub fn set_visible_columns(&mut self, columns: Vec<String>) {
        debug!(columns = columns.len(), "visible columns replaced");
        self.visibility
            .set_visible_columns(self.dataset.report_key(), columns);
    }

    pub fn toggle_column(&mut self, column: &str) {
        let universe = self.dataset.column_universe();
        self.visibility
            .toggle_column(self.dataset.report_key(), &universe, column);
        if !self.is_visible(column) {
            self.forget_column(column);
        }
        debug!(column, "column toggled");
    }

    /// Hide a column and drop the header state that points at it.
    ///
    /// The value picker closes if it belongs to `column`, and a sort on
    /// `column` is cleared so the row order never depends on a column the
    /// user cannot see.
    pub fn hide_column(&mut self, column: &str) {
        let universe = self.dataset.column_universe();
        self.visibility
            .hide_column(self.dataset.report_key(), &universe, column);
        self.forget_column(column);
        debug!(column, "column hidden");
    }

    /// Returns `true` when `value` is hidden afterwards.
    pub fn toggle_hidden_value(&mut self, column: &str, value: &str) -> bool {
        let hidden = self
            .filters
            .toggle_hidden_value(self.dataset.report_key(), column, value);
        debug!(column, hidden, "value filter toggled");
        hidden
    }

    pub fn set_sort(&mut self, column: impl Into<String>, direction: SortDirection) {
        let column = column.into();
        debug!(column = %column, %direction, "sort set");
        self.sort.set_sort(column, direction);
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear_sort();
    }

    pub fn open_column(&mut self, column: impl Into<String>) {
        let column = column.into();
        if !self.dataset.has_column(&column) {
            debug!(column = %column, "ignoring value picker for unknown column");
            return;
        }
        self.active_column = Some(column);
    }

    pub fn close_column(&mut self) {
        self.active_column = None;
    }

    fn is_visible(&self, column: &str) -> bool {
        self.visible_columns().iter().any(|visible| visible == column)
    }

    fn forget_column(&mut self, column: &str) {
        if self.active_column.as_deref() == Some(column) {
            self.active_column = None;
        }
        if self.sort.is_sorted_by(column) {
            self.sort.clear_sort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_model::Row;

    fn session() -> ViewSession {
        ViewSession::new(Dataset::new(
            "r1",
            vec![
                Row::new()
                    .with("student_id", "A")
                    .with("risk_level", "High")
                    .with("top_reasons", "absence"),
                Row::new()
                    .with("student_id", "B")
                    .with("risk_level", "Low")
                    .with("top_reasons", ""),
            ],
        ))
    }

    #[test]
    fn intent_log_fields_carry_no_cell_values() {
        let intent = ViewIntent::ToggleHiddenValue {
            column: "student_id".to_string(),
            value: "S-042".to_string(),
        };
        assert_eq!(intent.kind(), "toggle_hidden_value");
        assert_eq!(intent.column(), Some("student_id"));

        let load = ViewIntent::LoadReport(session().dataset().clone());
        assert_eq!(load.kind(), "load_report");
        assert_eq!(load.column(), None);
    }

    #[test]
    fn hiding_active_sort_column_clears_sort_and_picker() {
        let mut session = session();
        session.apply(ViewIntent::OpenColumn("risk_level".to_string()));
        session.apply(ViewIntent::SetSort {
            column: "risk_level".to_string(),
            direction: SortDirection::Descending,
        });
        session.apply(ViewIntent::HideColumn("risk_level".to_string()));

        assert_eq!(session.active_column(), None);
        assert!(session.sort().active().is_none());
        assert_eq!(session.visible_columns(), vec!["student_id", "top_reasons"]);
    }

    #[test]
    fn hiding_other_column_keeps_sort() {
        let mut session = session();
        session.set_sort("student_id", SortDirection::Descending);
        session.open_column("student_id");
        session.hide_column("top_reasons");
        assert!(session.sort().is_sorted_by("student_id"));
        assert_eq!(session.active_column(), Some("student_id"));
    }

    #[test]
    fn value_options_come_from_unfiltered_rows() {
        let mut session = session();
        session.open_column("top_reasons");
        session.toggle_hidden_value("top_reasons", "");

        assert_eq!(session.view().row_count(), 1);
        assert_eq!(
            session.value_options(),
            vec![
                ValueOption {
                    value: String::new(),
                    label: "(blank)".to_string(),
                    hidden: true,
                },
                ValueOption {
                    value: "absence".to_string(),
                    label: "absence".to_string(),
                    hidden: false,
                },
            ]
        );
    }

    #[test]
    fn unknown_column_does_not_open_picker() {
        let mut session = session();
        session.open_column("ghost");
        assert_eq!(session.active_column(), None);
        assert!(session.value_options().is_empty());
    }

    #[test]
    fn loading_new_report_resets_scoped_state() {
        let mut session = session();
        session.set_visible_columns(vec!["student_id".to_string()]);
        session.toggle_hidden_value("risk_level", "Low");
        session.set_sort("student_id", SortDirection::Descending);

        let next = Dataset::new(
            "r2",
            vec![
                Row::new().with("student_id", "Z").with("risk_level", "Low"),
                Row::new().with("student_id", "Y").with("risk_level", "High"),
            ],
        );
        session.apply(ViewIntent::LoadReport(next));

        let view = session.view();
        assert_eq!(view.columns, vec!["student_id", "risk_level"]);
        assert_eq!(view.row_count(), 2);
        assert_eq!(view.rows[0].display("student_id"), "Z");
    }
}
