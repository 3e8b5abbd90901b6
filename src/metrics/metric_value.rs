use core::fmt;
use serde::{Deserialize, Serialize};

/// A concrete value produced by a metric computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Float(f64),
    UInt(u64),
    Null,
}

impl MetricValue {
    /// Numeric view of the value, `None` for `Null`.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "Metric counts stay far below 2^53")]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::UInt(u) => Some(*u as f64),
            Self::Null => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Self::Float(f) if f.is_nan())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Null => f.write_str("null"),
        }
    }
}
