//! Single-column sort.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use risk_model::Row;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("Unknown sort direction: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

/// The one active sort, if any. No sort means source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<SortKey>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        let mut state = Self::new();
        state.set_sort(column, direction);
        state
    }

    /// Replace the active sort.
    pub fn set_sort(&mut self, column: impl Into<String>, direction: SortDirection) {
        self.active = Some(SortKey {
            column: column.into(),
            direction,
        });
    }

    pub fn clear_sort(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&SortKey> {
        self.active.as_ref()
    }

    pub fn is_sorted_by(&self, column: &str) -> bool {
        self.active.as_ref().is_some_and(|key| key.column == column)
    }

    /// Stable sort of `rows` by the display string of the sort column.
    ///
    /// Rows missing the column compare as blank; ties keep their order.
    pub fn apply(&self, rows: &mut [&Row]) {
        let Some(key) = &self.active else {
            return;
        };
        rows.sort_by(|a, b| {
            key.direction
                .apply(a.display(&key.column).cmp(&b.display(&key.column)))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter()
            .map(|row| row.display("student_id").into_owned())
            .collect()
    }

    #[test]
    fn descending_keeps_ties_in_source_order() {
        let source = [
            Row::new().with("student_id", "A").with("risk_level", "High"),
            Row::new().with("student_id", "B").with("risk_level", "Low"),
            Row::new().with("student_id", "C").with("risk_level", "High"),
        ];
        let mut rows: Vec<&Row> = source.iter().collect();
        SortState::by("risk_level", SortDirection::Descending).apply(&mut rows);
        assert_eq!(ids(&rows), vec!["B", "A", "C"]);
    }

    #[test]
    fn comparison_is_lexicographic_on_display_strings() {
        let source = [
            Row::new().with("student_id", "10"),
            Row::new().with("student_id", 9.0),
            Row::new(),
        ];
        let mut rows: Vec<&Row> = source.iter().collect();
        SortState::by("student_id", SortDirection::Ascending).apply(&mut rows);
        assert_eq!(ids(&rows), vec!["", "10", "9"]);
    }

    #[test]
    fn clear_restores_source_order() {
        let source = [
            Row::new().with("student_id", "B"),
            Row::new().with("student_id", "A"),
        ];
        let mut state = SortState::by("student_id", SortDirection::Ascending);
        state.clear_sort();
        let mut rows: Vec<&Row> = source.iter().collect();
        state.apply(&mut rows);
        assert_eq!(ids(&rows), vec!["B", "A"]);
        assert!(state.active().is_none());
    }

    #[test]
    fn direction_parses_short_and_long_names() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Descending));
        assert_eq!("ascending".parse::<SortDirection>(), Ok(SortDirection::Ascending));
        assert!("up".parse::<SortDirection>().is_err());
    }
}
