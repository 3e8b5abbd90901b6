use super::MetricValue;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options handed to every strategy invocation.
///
/// `column` names the column the metric is computed over. `values` carries any
/// additional options a metric understands; unknown keys are ignored by
/// metrics that do not use them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricOptions {
    pub column: CompactString,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<CompactString, MetricValue>,
}

impl MetricOptions {
    #[must_use]
    pub fn for_column(column: impl Into<CompactString>) -> Self {
        Self {
            column: column.into(),
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<CompactString>, value: MetricValue) -> Self {
        let _ = self.values.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&MetricValue> {
        self.values.get(key)
    }
}
