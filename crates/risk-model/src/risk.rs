//! Risk levels assigned by the prediction model.
//!
//! The service labels each student with `High`, `Medium` or `Low` from the
//! predicted dropout probability. The table view never re-derives the label
//! for filtering or sorting; a renderer uses these types to colour badges and
//! to fill in a level or action for rows that arrive without one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::columns::{RISK_LEVEL, RISK_PROBA};
use crate::{CellValue, Row};

/// Probability at or above which a student is `High` risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.70;
/// Probability at or above which a student is `Medium` risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a predicted probability.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if probability >= MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Level of a result row: its `risk_level` label, or the bucket of its
    /// `risk_proba` when the label is missing or not recognised.
    pub fn for_row(row: &Row) -> Option<Self> {
        row.display(RISK_LEVEL).parse().ok().or_else(|| {
            row.get(RISK_PROBA)
                .and_then(CellValue::as_f64)
                .map(Self::from_probability)
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::High => Severity::Critical,
            Self::Medium => Severity::Warning,
            Self::Low => Severity::Ok,
        }
    }

    /// Suggested follow-up shown in the `action` column of generated reports.
    pub fn recommended_action(&self) -> &'static str {
        match self {
            Self::High => "Immediate counselling and remedial support",
            Self::Medium => "Monitor assignment participation and check in early",
            Self::Low => "Routine observation",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(format!("Unknown risk level: {s}")),
        }
    }
}

/// Visual severity of a risk badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Warning,
    Ok,
    /// Label the model does not produce; rendered neutral.
    Unknown,
}

impl Severity {
    /// Severity for a raw `risk_level` cell.
    pub fn for_label(label: &str) -> Self {
        label
            .parse::<RiskLevel>()
            .map_or(Self::Unknown, |level| level.severity())
    }

    /// Badge colour as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Critical => (0xef, 0x44, 0x44),
            Self::Warning => (0xf5, 0x9e, 0x0b),
            Self::Ok => (0x22, 0xc5, 0x5e),
            Self::Unknown => (0xcc, 0xcc, 0xcc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_buckets_use_inclusive_lower_bounds() {
        assert_eq!(RiskLevel::from_probability(0.70), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.6999), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
    }

    #[test]
    fn row_level_prefers_label_over_probability() {
        let labelled = Row::new().with(RISK_LEVEL, "low").with(RISK_PROBA, 0.91);
        assert_eq!(RiskLevel::for_row(&labelled), Some(RiskLevel::Low));

        let unlabelled = Row::new().with(RISK_PROBA, 0.55);
        assert_eq!(RiskLevel::for_row(&unlabelled), Some(RiskLevel::Medium));
        assert_eq!(
            RiskLevel::for_row(&unlabelled).map(|level| level.recommended_action()),
            Some("Monitor assignment participation and check in early")
        );

        assert_eq!(RiskLevel::for_row(&Row::new().with("student_id", "S1")), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" high ".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn unknown_label_is_neutral() {
        assert_eq!(Severity::for_label("Medium"), Severity::Warning);
        assert_eq!(Severity::for_label(""), Severity::Unknown);
        assert_eq!(Severity::Unknown.rgb(), (0xcc, 0xcc, 0xcc));
    }
}
