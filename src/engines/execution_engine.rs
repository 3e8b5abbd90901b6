use crate::Result;
use crate::dispatch::DispatchTable;
use crate::metrics::{BackendKind, MetricRequest, MetricValue};

/// A backend able to answer a batch of metric requests.
pub trait ExecutionEngine {
    fn backend(&self) -> BackendKind;

    /// Compute every request, returning values in request order.
    ///
    /// # Errors
    ///
    /// Fails on dispatch errors or errors raised by the backend itself.
    fn resolve(&self, dispatch: &DispatchTable, requests: &[MetricRequest]) -> Result<Vec<MetricValue>>;
}
