//! View requests built from command-line flags.
//!
//! A request is an ordered list of [`ViewIntent`]s replayed against a fresh
//! session, in the same order a user would click through the dashboard:
//! column choice first, then hidden values, then the sort.

use std::fmt;
use std::str::FromStr;

use risk_view::{SortDirection, ViewIntent, ViewSession};
use tracing::debug;

use crate::logging::redact_value;

/// `column=value`; an empty value hides blank cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenValue {
    pub column: String,
    pub value: String,
}

impl FromStr for HiddenValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((column, value)) = s.split_once('=') else {
            return Err(format!("expected COLUMN=VALUE, got `{s}`"));
        };
        let column = column.trim();
        if column.is_empty() {
            return Err(format!("missing column name in `{s}`"));
        }
        Ok(Self {
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

/// `column` or `column:asc|desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.rsplit_once(':') {
            Some((column, direction)) => (column, direction.parse()?),
            None => (s, SortDirection::Ascending),
        };
        let column = column.trim();
        if column.is_empty() {
            return Err(format!("missing column name in `{s}`"));
        }
        Ok(Self {
            column: column.to_string(),
            direction,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.direction)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRequest {
    /// Replaces the default column list when set.
    pub columns: Option<Vec<String>>,
    pub toggle_columns: Vec<String>,
    pub hide_columns: Vec<String>,
    pub hidden_values: Vec<HiddenValue>,
    pub sort: Option<SortSpec>,
}

impl ViewRequest {
    pub fn intents(&self) -> Vec<ViewIntent> {
        let mut intents = Vec::new();
        if let Some(columns) = &self.columns {
            intents.push(ViewIntent::SetVisibleColumns(columns.clone()));
        }
        intents.extend(
            self.toggle_columns
                .iter()
                .cloned()
                .map(ViewIntent::ToggleColumn),
        );
        for hidden in &self.hidden_values {
            intents.push(ViewIntent::ToggleHiddenValue {
                column: hidden.column.clone(),
                value: hidden.value.clone(),
            });
        }
        if let Some(sort) = &self.sort {
            intents.push(ViewIntent::SetSort {
                column: sort.column.clone(),
                direction: sort.direction,
            });
        }
        // Hidden last so that hiding the sort column also drops the sort.
        intents.extend(self.hide_columns.iter().cloned().map(ViewIntent::HideColumn));
        intents
    }

    pub fn apply_to(&self, session: &mut ViewSession) {
        for hidden in &self.hidden_values {
            debug!(
                column = %hidden.column,
                value = redact_value(&hidden.value),
                "hiding value"
            );
        }
        for intent in self.intents() {
            session.apply(intent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_value_allows_blank() {
        let parsed: HiddenValue = "top_reasons=".parse().unwrap();
        assert_eq!(parsed.column, "top_reasons");
        assert_eq!(parsed.value, "");
        assert!("top_reasons".parse::<HiddenValue>().is_err());
        assert!("=High".parse::<HiddenValue>().is_err());
    }

    #[test]
    fn sort_defaults_to_ascending() {
        let parsed: SortSpec = "student_id".parse().unwrap();
        assert_eq!(parsed.direction, SortDirection::Ascending);
        let parsed: SortSpec = "risk_proba:desc".parse().unwrap();
        assert_eq!(parsed.to_string(), "risk_proba:desc");
        assert!("risk_proba:sideways".parse::<SortSpec>().is_err());
    }

    #[test]
    fn column_hides_come_after_sort() {
        let request = ViewRequest {
            hide_columns: vec!["risk_level".to_string()],
            sort: Some(SortSpec {
                column: "risk_level".to_string(),
                direction: SortDirection::Descending,
            }),
            ..ViewRequest::default()
        };
        let intents = request.intents();
        assert_eq!(intents.len(), 2);
        assert_eq!(intents[1], ViewIntent::HideColumn("risk_level".to_string()));
    }
}
