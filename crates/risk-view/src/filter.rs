//! Hidden-value filters.
//!
//! Filters are a blocklist: each tracked column holds a set of display
//! values to hide, and a row is dropped as soon as any tracked column vetoes
//! it. Like the column selection, the whole filter set belongs to one report.

use std::collections::{BTreeMap, BTreeSet};

use risk_model::{ReportKey, Row};

#[derive(Debug, Clone, Default)]
pub struct ValueFilterStore {
    report_key: Option<ReportKey>,
    hidden: BTreeMap<String, BTreeSet<String>>,
}

impl ValueFilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `value` between hidden and shown for `column`.
    ///
    /// Returns `true` when the value is hidden afterwards. Filters recorded
    /// for another report are discarded first.
    pub fn toggle_hidden_value(
        &mut self,
        report_key: &ReportKey,
        column: &str,
        value: &str,
    ) -> bool {
        self.rescope(report_key);
        let hidden = self.hidden.entry(column.to_string()).or_default();
        let now_hidden = if hidden.remove(value) {
            false
        } else {
            hidden.insert(value.to_string());
            true
        };
        if hidden.is_empty() {
            self.hidden.remove(column);
        }
        now_hidden
    }

    pub fn is_value_hidden(&self, report_key: &ReportKey, column: &str, value: &str) -> bool {
        self.scoped(report_key)
            .and_then(|hidden| hidden.get(column))
            .is_some_and(|values| values.contains(value))
    }

    /// Hidden values of `column`, sorted.
    pub fn hidden_values(&self, report_key: &ReportKey, column: &str) -> Vec<String> {
        self.scoped(report_key)
            .and_then(|hidden| hidden.get(column))
            .map(|values| values.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Forget every hidden value of `column`.
    pub fn clear_column(&mut self, report_key: &ReportKey, column: &str) {
        if self.report_key.as_ref() == Some(report_key) {
            self.hidden.remove(column);
        }
    }

    pub fn clear(&mut self) {
        self.report_key = None;
        self.hidden.clear();
    }

    /// Veto predicate for rows of `report_key`.
    pub fn veto(&self, report_key: &ReportKey) -> Veto<'_> {
        Veto {
            hidden: self.scoped(report_key),
        }
    }

    pub fn is_row_visible(&self, report_key: &ReportKey, row: &Row) -> bool {
        !self.veto(report_key).vetoes(row)
    }

    /// Whether any value is hidden for `report_key`.
    pub fn is_active(&self, report_key: &ReportKey) -> bool {
        self.scoped(report_key).is_some_and(|hidden| !hidden.is_empty())
    }

    fn scoped(&self, report_key: &ReportKey) -> Option<&BTreeMap<String, BTreeSet<String>>> {
        (self.report_key.as_ref() == Some(report_key)).then_some(&self.hidden)
    }

    fn rescope(&mut self, report_key: &ReportKey) {
        if self.report_key.as_ref() != Some(report_key) {
            self.hidden.clear();
            self.report_key = Some(report_key.clone());
        }
    }
}

/// Row predicate built from the hidden-value sets of one report.
#[derive(Debug, Clone, Copy)]
pub struct Veto<'a> {
    hidden: Option<&'a BTreeMap<String, BTreeSet<String>>>,
}

impl Veto<'_> {
    /// True when some tracked column hides this row's value.
    pub fn vetoes(&self, row: &Row) -> bool {
        let Some(hidden) = self.hidden else {
            return false;
        };
        hidden
            .iter()
            .any(|(column, values)| values.contains(&*row.display(column)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(level: Option<&str>) -> Row {
        match level {
            Some(level) => Row::new().with("risk_level", level),
            None => Row::new(),
        }
    }

    #[test]
    fn toggle_is_symmetric() {
        let key = ReportKey::new("r1");
        let mut store = ValueFilterStore::new();
        assert!(store.toggle_hidden_value(&key, "risk_level", "Low"));
        assert!(store.is_value_hidden(&key, "risk_level", "Low"));
        assert!(!store.toggle_hidden_value(&key, "risk_level", "Low"));
        assert!(!store.is_active(&key));
    }

    #[test]
    fn blank_value_hides_missing_cells() {
        let key = ReportKey::new("r1");
        let mut store = ValueFilterStore::new();
        store.toggle_hidden_value(&key, "risk_level", "");
        assert!(!store.is_row_visible(&key, &row(None)));
        assert!(store.is_row_visible(&key, &row(Some("High"))));
    }

    #[test]
    fn any_column_can_veto() {
        let key = ReportKey::new("r1");
        let mut store = ValueFilterStore::new();
        store.toggle_hidden_value(&key, "risk_level", "Low");
        store.toggle_hidden_value(&key, "top_reasons", "none");

        let vetoed_by_reason = Row::new().with("risk_level", "High").with("top_reasons", "none");
        let vetoed_by_level = Row::new().with("risk_level", "Low").with("top_reasons", "absence");
        let kept = Row::new().with("risk_level", "High").with("top_reasons", "absence");

        let veto = store.veto(&key);
        assert!(veto.vetoes(&vetoed_by_reason));
        assert!(veto.vetoes(&vetoed_by_level));
        assert!(!veto.vetoes(&kept));
    }

    #[test]
    fn filters_of_other_report_do_not_apply() {
        let mut store = ValueFilterStore::new();
        store.toggle_hidden_value(&ReportKey::new("r1"), "risk_level", "Low");

        let other = ReportKey::new("r2");
        assert!(store.is_row_visible(&other, &row(Some("Low"))));
        assert!(store.hidden_values(&other, "risk_level").is_empty());

        store.toggle_hidden_value(&other, "risk_level", "High");
        assert!(store.hidden_values(&ReportKey::new("r1"), "risk_level").is_empty());
        assert_eq!(store.hidden_values(&other, "risk_level"), vec!["High"]);
    }

    #[test]
    fn clear_column_keeps_other_columns() {
        let key = ReportKey::new("r1");
        let mut store = ValueFilterStore::new();
        store.toggle_hidden_value(&key, "risk_level", "Low");
        store.toggle_hidden_value(&key, "action", "");
        store.clear_column(&key, "risk_level");
        assert!(store.hidden_values(&key, "risk_level").is_empty());
        assert_eq!(store.hidden_values(&key, "action"), vec![""]);

        store.clear();
        assert!(!store.is_active(&key));
    }
}
