//! Well-known report columns.

use std::borrow::Cow;

use crate::CellValue;

pub const STUDENT_ID: &str = "student_id";
pub const RISK_PROBA: &str = "risk_proba";
pub const RISK_LEVEL: &str = "risk_level";
pub const TOP_REASONS: &str = "top_reasons";
pub const ACTION: &str = "action";
pub const SCORE_GUIDANCE: &str = "score_guidance";
pub const REMAINING_ABSENCE_ALLOWANCE: &str = "remaining_absence_allowance";

/// Columns shown when no selection was made for the current report,
/// in display order.
pub const DEFAULT_VISIBLE_COLUMNS: [&str; 5] = [
    STUDENT_ID,
    RISK_PROBA,
    RISK_LEVEL,
    TOP_REASONS,
    REMAINING_ABSENCE_ALLOWANCE,
];

/// Label shown in place of an empty value in value pickers.
pub const BLANK_LABEL: &str = "(blank)";

/// Header text for a column key. Unknown keys are shown as-is.
pub fn column_label(key: &str) -> &str {
    match key {
        STUDENT_ID => "Student ID",
        RISK_PROBA => "Risk Score",
        RISK_LEVEL => "Risk Level",
        TOP_REASONS => "Top Reasons",
        ACTION => "Action",
        SCORE_GUIDANCE => "Score Guidance",
        REMAINING_ABSENCE_ALLOWANCE => "Remaining Absence Allowance",
        other => other,
    }
}

pub fn value_label(value: &str) -> &str {
    if value.is_empty() { BLANK_LABEL } else { value }
}

/// `0.7234` -> `72.3%`. Non-numeric cells pass through unchanged.
pub fn format_probability(value: Option<&CellValue>) -> Cow<'_, str> {
    match value {
        None => Cow::Borrowed(""),
        Some(cell) => match cell.as_f64() {
            Some(probability) => Cow::Owned(format!("{:.1}%", probability * 100.0)),
            None => cell.as_display(),
        },
    }
}
