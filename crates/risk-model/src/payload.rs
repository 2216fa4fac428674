use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Dataset, ReportKey, Result, Row};

/// Body returned by the prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Row count reported by the service.
    pub rows: usize,
    /// File name of the generated CSV report; doubles as the report identity.
    pub report_filename: String,
    /// Server-relative download path of the CSV report.
    pub report_url: String,
    #[serde(default)]
    pub data: Vec<Row>,
}

impl PredictResponse {
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let response = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            path = %path.display(),
            report = %response.report_filename,
            rows = response.data.len(),
            "loaded prediction payload"
        );
        Ok(response)
    }

    pub fn report_key(&self) -> ReportKey {
        ReportKey::new(self.report_filename.clone())
    }

    /// Full download URL of the CSV report.
    pub fn download_url(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.report_url)
    }

    /// Consume the payload into an immutable dataset.
    pub fn into_dataset(self) -> Dataset {
        if self.rows != self.data.len() {
            warn!(
                reported = self.rows,
                actual = self.data.len(),
                "row count in payload does not match data length"
            );
        }
        Dataset::new(ReportKey::new(self.report_filename), self.data)
    }
}

impl From<PredictResponse> for Dataset {
    fn from(response: PredictResponse) -> Self {
        response.into_dataset()
    }
}
