#![deny(unsafe_code)]

use std::fmt;

/// Identity of one uploaded report's results.
///
/// Per-report view state (column choice, hidden values) is stored together
/// with the key it was created for and is ignored once a dataset with a
/// different key is loaded.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ReportKey(String);

impl ReportKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReportKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ReportKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for ReportKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
