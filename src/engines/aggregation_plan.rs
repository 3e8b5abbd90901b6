use crate::Result;
use crate::dispatch::DispatchTable;
use crate::engines::ColumnHandle;
use crate::expr::{Dialect, Expr};
use crate::metrics::{BackendKind, ComputationResult, MetricRequest};
use ohno::app_err;

/// One deferred aggregate awaiting execution.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAggregate {
    pub request: MetricRequest,
    pub alias: String,
    pub expr: Expr,
}

/// The deferred aggregates of one batch of metric requests.
///
/// Building a plan only invokes deferred strategies; the owning engine runs
/// the whole plan later in a single backend round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationPlan {
    backend: BackendKind,
    dialect: Dialect,
    items: Vec<PlannedAggregate>,
}

impl AggregationPlan {
    /// Invoke the deferred strategy of every request for `backend`.
    ///
    /// # Errors
    ///
    /// Fails if a request has no deferred strategy for `backend` or a strategy reports an error.
    pub fn build(dispatch: &DispatchTable, backend: BackendKind, dialect: Dialect, requests: &[MetricRequest]) -> Result<Self> {
        let mut items = Vec::with_capacity(requests.len());

        for request in requests {
            let column = Expr::column(request.column());
            let handle = ColumnHandle::Expression {
                column: &column,
                dialect: &dialect,
            };

            let expr = match dispatch.invoke(&request.metric, backend, handle, &request.options)? {
                ComputationResult::Deferred(expr) => expr,
                ComputationResult::Scalar(_) => {
                    return Err(app_err!("strategy for '{request}' on the {backend} backend did not defer"));
                }
            };

            items.push(PlannedAggregate {
                request: request.clone(),
                alias: format!("m{}", items.len()),
                expr,
            });
        }

        Ok(Self { backend, dialect, items })
    }

    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    #[must_use]
    pub fn items(&self) -> &[PlannedAggregate] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Capabilities, DispatchError};
    use crate::metrics::COLUMN_STANDARD_DEVIATION;

    #[test]
    fn test_build_collects_expressions_in_order() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let requests = [
            MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "a"),
            MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "b"),
        ];

        let plan = AggregationPlan::build(&dispatch, BackendKind::Sql, Dialect::new("mssql"), &requests).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.items()[0].alias, "m0");
        assert_eq!(plan.items()[0].expr, Expr::call("stdev", vec![Expr::column("a")]));
        assert_eq!(plan.items()[1].alias, "m1");
        assert_eq!(plan.items()[1].expr.referenced_columns(), ["b"]);
    }

    #[test]
    fn test_build_fails_for_unsupported_combination() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all().with(BackendKind::Sql, false)).unwrap();
        let requests = [MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "a")];

        let err = AggregationPlan::build(&dispatch, BackendKind::Sql, Dialect::new("sqlite"), &requests).unwrap_err();
        let expected = DispatchError::UnsupportedCombination {
            metric: COLUMN_STANDARD_DEVIATION.into(),
            backend: BackendKind::Sql,
        };
        assert!(err.to_string().contains(&expected.to_string()), "{err}");
    }

    #[test]
    fn test_build_fails_for_eager_backend() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let requests = [MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "a")];
        let _ = AggregationPlan::build(&dispatch, BackendKind::InMemory, Dialect::new("sqlite"), &requests).unwrap_err();
    }
}
