use super::{BackendKind, COLUMN_STANDARD_DEVIATION, column_standard_deviation};
use crate::dispatch::Strategy;

/// Static declaration of a metric and the strategy it offers per backend.
#[derive(Debug)]
pub struct MetricDef {
    pub name: &'static str,
    pub description: &'static str,
    pub strategies: &'static [(BackendKind, Strategy)],
}

macro_rules! metric_def {
    ($name:expr, $description:expr, [$($backend:ident => $shape:ident($strategy:expr)),+ $(,)?]) => {
        MetricDef {
            name: $name,
            description: $description,
            strategies: &[$((BackendKind::$backend, Strategy::$shape($strategy))),+],
        }
    };
}

pub const METRIC_DEFINITIONS: &[MetricDef] = &[metric_def!(
    COLUMN_STANDARD_DEVIATION,
    "Sample standard deviation (n - 1 denominator) of the column's non-null values",
    [
        InMemory => Eager(column_standard_deviation::in_memory),
        Sql => Deferred(column_standard_deviation::sql),
        Distributed => Deferred(column_standard_deviation::distributed),
    ]
)];

/// Find the static declaration of a metric by exact name.
#[must_use]
pub fn find_definition(name: &str) -> Option<&'static MetricDef> {
    METRIC_DEFINITIONS.iter().find(|def| def.name == name)
}
