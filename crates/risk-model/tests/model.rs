//! Tests for risk-model types.

use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use risk_model::{CellValue, Dataset, PredictResponse, RiskLevel, Row, Severity};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "risk-model-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

#[test]
fn payload_loads_from_file() {
    let dir = unique_temp_dir("payload");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("predict.json");
    fs::write(
        &path,
        br#"{"rows": 1, "report_filename": "r.csv", "report_url": "/reports/r.csv",
            "data": [{"student_id": 1001, "risk_level": "Medium"}]}"#,
    )
    .unwrap();

    let dataset = PredictResponse::load(&path).unwrap().into_dataset();
    assert_eq!(dataset.row_count(), 1);
    assert_eq!(dataset.rows()[0].display("student_id"), "1001");
    assert_eq!(
        Severity::for_label(&dataset.rows()[0].display("risk_level")),
        RiskLevel::Medium.severity()
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_payload_file_is_io_error() {
    let path = unique_temp_dir("missing").join("nope.json");
    let err = PredictResponse::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("io error"));
}

#[test]
fn payload_without_data_is_an_empty_dataset() {
    let dataset: Dataset = PredictResponse::from_json_str(
        r#"{"rows": 0, "report_filename": "empty.csv", "report_url": "/reports/empty.csv"}"#,
    )
    .unwrap()
    .into();
    assert!(dataset.is_empty());
    assert!(dataset.column_universe().is_empty());
}

fn arb_cell() -> impl Strategy<Value = Option<CellValue>> {
    prop_oneof![
        Just(None),
        Just(Some(CellValue::Null)),
        any::<bool>().prop_map(|value| Some(CellValue::Bool(value))),
        (0u32..5).prop_map(|value| Some(CellValue::Number(f64::from(value)))),
        "[a-c]{0,2}".prop_map(|value| Some(CellValue::Text(value))),
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(arb_cell(), 0..24).prop_map(|cells| {
        cells
            .into_iter()
            .map(|cell| match cell {
                Some(value) => Row::new().with("col", value),
                None => Row::new(),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn distinct_values_are_sorted_unique_and_complete(rows in arb_rows()) {
        let dataset = Dataset::new("r", rows);
        let values = dataset.distinct_values("col");

        prop_assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        for row in dataset.rows() {
            let display = row.display("col").into_owned();
            prop_assert!(values.contains(&display));
        }
    }
}
