//! Terminal rendering of composed views.

use std::borrow::Cow;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use risk_model::columns::{ACTION, RISK_LEVEL, RISK_PROBA};
use risk_model::{RiskLevel, Row, Severity, column_label, format_probability};
use risk_view::{ComposedView, SortDirection, SortState, ValueOption};

/// Cell text as shown in the table.
///
/// A blank `risk_level` or `action` is filled in from the row's score.
pub fn format_cell<'a>(row: &'a Row, column: &str) -> Cow<'a, str> {
    let text = match column {
        RISK_PROBA => format_probability(row.get(column)),
        _ => row.display(column),
    };
    if !text.is_empty() {
        return text;
    }
    let derived = match column {
        RISK_LEVEL => RiskLevel::for_row(row).map(|level| level.as_str()),
        ACTION => RiskLevel::for_row(row).map(|level| level.recommended_action()),
        _ => None,
    };
    derived.map_or(text, Cow::Borrowed)
}

/// Header text, with an arrow on the sorted column.
pub fn header_text(column: &str, sort: &SortState) -> String {
    let label = column_label(column);
    match sort.active() {
        Some(key) if key.column == column => {
            let arrow = match key.direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{label} {arrow}")
        }
        _ => label.to_string(),
    }
}

/// Build the result table; `limit` caps the number of rows printed.
pub fn view_table(view: &ComposedView<'_>, sort: &SortState, limit: Option<usize>) -> Table {
    let mut table = Table::new();
    table.set_header(
        view.columns
            .iter()
            .map(|column| header_cell(&header_text(column, sort)))
            .collect::<Vec<_>>(),
    );
    apply_view_table_style(&mut table);
    for (index, column) in view.columns.iter().enumerate() {
        if column == RISK_PROBA {
            align_column(&mut table, index, CellAlignment::Right);
        } else if column == RISK_LEVEL {
            align_column(&mut table, index, CellAlignment::Center);
        }
    }
    let shown = limit.unwrap_or(view.rows.len());
    for row in view.rows.iter().take(shown) {
        table.add_row(
            view.columns
                .iter()
                .map(|column| body_cell(row, column))
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Column picker: every column in the dataset with its visibility.
pub fn columns_table(universe: &[String], visible: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Label"),
        header_cell("Visible"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for column in universe {
        let shown = visible.iter().any(|visible| visible == column);
        table.add_row(vec![
            Cell::new(column),
            Cell::new(column_label(column)),
            check_cell(shown),
        ]);
    }
    table
}

/// Value picker for one column.
pub fn values_table(column: &str, options: &[ValueOption]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(column_label(column)), header_cell("Shown")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for option in options {
        let label = if option.value.is_empty() {
            dim_cell(&option.label)
        } else {
            Cell::new(&option.label)
        };
        table.add_row(vec![label, check_cell(!option.hidden)]);
    }
    table
}

fn body_cell(row: &Row, column: &str) -> Cell {
    let text = format_cell(row, column);
    if column == RISK_LEVEL {
        return risk_badge_cell(&text);
    }
    if text.is_empty() {
        return dim_cell("-");
    }
    Cell::new(text)
}

fn risk_badge_cell(level: &str) -> Cell {
    let severity = Severity::for_label(level);
    let (r, g, b) = severity.rgb();
    let text = if level.is_empty() { "-" } else { level };
    let cell = Cell::new(text).fg(Color::Rgb { r, g, b });
    match severity {
        Severity::Critical => cell.add_attribute(Attribute::Bold),
        Severity::Unknown => cell.add_attribute(Attribute::Dim),
        _ => cell,
    }
}

fn check_cell(checked: bool) -> Cell {
    if checked {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_view_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_cells_are_percentages() {
        let row = Row::new().with(RISK_PROBA, 0.8134).with("student_id", 42.0);
        assert_eq!(format_cell(&row, RISK_PROBA), "81.3%");
        assert_eq!(format_cell(&row, "student_id"), "42");
        assert_eq!(format_cell(&row, "top_reasons"), "");
    }

    #[test]
    fn blank_level_and_action_come_from_score() {
        let row = Row::new().with(RISK_PROBA, 0.74).with(RISK_LEVEL, "");
        assert_eq!(format_cell(&row, RISK_LEVEL), "High");
        assert_eq!(
            format_cell(&row, ACTION),
            "Immediate counselling and remedial support"
        );

        let labelled = row.clone().with(ACTION, "Call guardian");
        assert_eq!(format_cell(&labelled, ACTION), "Call guardian");
        assert_eq!(format_cell(&Row::new(), ACTION), "");
    }

    #[test]
    fn sorted_header_gets_arrow() {
        let sort = SortState::by(RISK_PROBA, SortDirection::Descending);
        assert_eq!(header_text(RISK_PROBA, &sort), "Risk Score ▼");
        assert_eq!(header_text("student_id", &sort), "Student ID");
    }
}
