use super::{MetricId, MetricOptions};
use core::fmt;

/// A request to compute one metric over one column.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRequest {
    pub metric: MetricId,
    pub options: MetricOptions,
}

impl MetricRequest {
    #[must_use]
    pub const fn new(metric: MetricId, options: MetricOptions) -> Self {
        Self { metric, options }
    }

    /// Request `metric` over `column` with no additional options.
    #[must_use]
    pub fn for_column(metric: impl Into<MetricId>, column: &str) -> Self {
        Self::new(metric.into(), MetricOptions::for_column(column))
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.options.column
    }
}

impl fmt::Display for MetricRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.metric, self.options.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::COLUMN_STANDARD_DEVIATION;

    #[test]
    fn test_display() {
        let request = MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "age");
        assert_eq!(request.to_string(), "column.standard_deviation(age)");
        assert_eq!(request.column(), "age");
    }
}
