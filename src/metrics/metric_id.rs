use compact_str::CompactString;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Name of the sample standard deviation metric.
pub const COLUMN_STANDARD_DEVIATION: &str = "column.standard_deviation";

/// Identity of a logical metric, such as `column.standard_deviation`.
///
/// Identities are compared exactly, including case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricId(CompactString);

impl MetricId {
    #[must_use]
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetricId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for MetricId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
