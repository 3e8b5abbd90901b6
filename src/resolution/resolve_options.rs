use serde::{Deserialize, Serialize};

/// Post-processing applied to raw engine results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Treat a null result as NaN so every metric resolves to a number.
    #[serde(default)]
    pub enforce_numeric_metric: bool,

    /// Replace NaN results with `0.0` instead of failing.
    #[serde(default)]
    pub replace_nan_with_zero: bool,
}

impl ResolveOptions {
    #[must_use]
    pub const fn new(enforce_numeric_metric: bool, replace_nan_with_zero: bool) -> Self {
        Self {
            enforce_numeric_metric,
            replace_nan_with_zero,
        }
    }
}
