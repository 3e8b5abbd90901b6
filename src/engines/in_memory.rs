use super::{ColumnHandle, ExecutionEngine, InMemoryTable, LOG_TARGET};
use crate::Result;
use crate::dispatch::DispatchTable;
use crate::metrics::{BackendKind, ComputationResult, MetricRequest, MetricValue};
use ohno::app_err;

/// Eager engine computing metrics directly over an [`InMemoryTable`].
#[derive(Debug, Clone)]
pub struct InMemoryEngine {
    table: InMemoryTable,
}

impl InMemoryEngine {
    #[must_use]
    pub const fn new(table: InMemoryTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub const fn table(&self) -> &InMemoryTable {
        &self.table
    }

    /// Compute a single request.
    ///
    /// # Errors
    ///
    /// Fails if the column is unknown, the metric has no eager strategy, or the strategy fails.
    pub fn compute(&self, dispatch: &DispatchTable, request: &MetricRequest) -> Result<MetricValue> {
        let column = self.table.column(request.column())?;
        log::debug!(target: LOG_TARGET, "Computing {request} over {} rows in memory", column.len());

        match dispatch.invoke(&request.metric, BackendKind::InMemory, ColumnHandle::InMemory(column), &request.options)? {
            ComputationResult::Scalar(value) => Ok(value),
            ComputationResult::Deferred(expr) => Err(app_err!("in-memory strategy for '{request}' returned the expression '{expr}'")),
        }
    }
}

impl ExecutionEngine for InMemoryEngine {
    fn backend(&self) -> BackendKind {
        BackendKind::InMemory
    }

    fn resolve(&self, dispatch: &DispatchTable, requests: &[MetricRequest]) -> Result<Vec<MetricValue>> {
        requests.iter().map(|request| self.compute(dispatch, request)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Capabilities;
    use crate::metrics::COLUMN_STANDARD_DEVIATION;

    fn engine() -> InMemoryEngine {
        InMemoryEngine::new(InMemoryTable::from_csv_reader("x,y\n2,1\n4,\n4,\n4,\n5,\n5,\n7,\n9,\n".as_bytes()).unwrap())
    }

    #[test]
    fn test_compute_standard_deviation() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let value = engine()
            .compute(&dispatch, &MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "x"))
            .unwrap();
        let v = value.as_f64().unwrap();
        assert!((v - 2.138).abs() < 1e-3, "got {v}");
    }

    #[test]
    fn test_single_value_column_is_nan() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let value = engine()
            .compute(&dispatch, &MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "y"))
            .unwrap();
        assert!(value.is_nan());
    }

    #[test]
    fn test_resolve_preserves_order() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let values = engine()
            .resolve(
                &dispatch,
                &[
                    MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "y"),
                    MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "x"),
                ],
            )
            .unwrap();
        assert!(values[0].is_nan());
        assert!(values[1].as_f64().is_some_and(|v| v > 2.0));
    }

    #[test]
    fn test_unknown_column() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let err = engine()
            .compute(&dispatch, &MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "z"))
            .unwrap_err();
        assert!(err.to_string().contains("unknown column 'z'"));
    }

    #[test]
    fn test_unregistered_metric() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let err = engine()
            .compute(&dispatch, &MetricRequest::for_column("column.median", "x"))
            .unwrap_err();
        assert!(err.to_string().contains("not supported on the in-memory backend"), "{err}");
    }
}
