pub mod columns;
pub mod error;
pub mod ids;
pub mod payload;
pub mod risk;
pub mod table;

pub use columns::{DEFAULT_VISIBLE_COLUMNS, column_label, format_probability, value_label};
pub use error::{ModelError, Result};
pub use ids::ReportKey;
pub use payload::PredictResponse;
pub use risk::{RiskLevel, Severity};
pub use table::{CellValue, Dataset, Row};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_serializes_rows_as_plain_objects() {
        let dataset = Dataset::new(
            "r1",
            vec![Row::new().with("student_id", "A").with("risk_proba", 0.5)],
        );
        let json = serde_json::to_value(&dataset).expect("serialize dataset");
        assert_eq!(json["report_key"], "r1");
        assert_eq!(json["rows"][0]["student_id"], "A");
        assert_eq!(json["rows"][0]["risk_proba"], 0.5);
    }
}
