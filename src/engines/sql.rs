use super::{AggregationPlan, ExecutionEngine, LOG_TARGET};
use crate::Result;
use crate::dispatch::DispatchTable;
use crate::expr::{Dialect, render_select};
use crate::metrics::{BackendKind, MetricRequest, MetricValue};
use compact_str::CompactString;
use ohno::bail;

/// Connection to a relational database able to run one aggregate query.
pub trait QueryExecutor {
    /// Run `query` and return the values of its single result row, in select-list order.
    ///
    /// # Errors
    ///
    /// Whatever the database reports.
    fn fetch_row(&self, query: &str) -> Result<Vec<MetricValue>>;
}

/// Render the aggregate query that evaluates `plan` against `table`.
///
/// # Errors
///
/// Fails for an empty plan or an invalid table name.
pub fn render_query(table: &str, plan: &AggregationPlan) -> Result<String> {
    render_select(
        table,
        plan.items().iter().map(|item| (item.alias.as_str(), &item.expr)),
        plan.dialect(),
    )
}

/// Deferred engine that evaluates metrics through generated SQL.
#[derive(Debug, Clone)]
pub struct SqlEngine<Q> {
    executor: Q,
    dialect: Dialect,
    table: CompactString,
}

impl<Q: QueryExecutor> SqlEngine<Q> {
    #[must_use]
    pub fn new(executor: Q, dialect: Dialect, table: impl Into<CompactString>) -> Self {
        Self {
            executor,
            dialect,
            table: table.into(),
        }
    }

    #[must_use]
    pub const fn executor(&self) -> &Q {
        &self.executor
    }

    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Build the plan for `requests` without contacting the database.
    ///
    /// # Errors
    ///
    /// Fails if a request has no SQL strategy.
    pub fn plan(&self, dispatch: &DispatchTable, requests: &[MetricRequest]) -> Result<AggregationPlan> {
        AggregationPlan::build(dispatch, BackendKind::Sql, self.dialect.clone(), requests)
    }

    /// # Errors
    ///
    /// Fails for an empty plan or an invalid table name.
    pub fn render(&self, plan: &AggregationPlan) -> Result<String> {
        render_query(&self.table, plan)
    }

    /// Send the whole plan to the database as one query.
    ///
    /// # Errors
    ///
    /// Database errors are returned unchanged. Also fails if the row does not
    /// have one value per planned aggregate.
    pub fn execute(&self, plan: &AggregationPlan) -> Result<Vec<MetricValue>> {
        if plan.is_empty() {
            return Ok(Vec::new());
        }

        let query = self.render(plan)?;
        log::debug!(target: LOG_TARGET, "Executing on {}: {query}", self.dialect);

        let row = self.executor.fetch_row(&query)?;
        if row.len() != plan.len() {
            bail!("query returned {} values for {} aggregates", row.len(), plan.len());
        }

        Ok(row)
    }
}

impl<Q: QueryExecutor> ExecutionEngine for SqlEngine<Q> {
    fn backend(&self) -> BackendKind {
        BackendKind::Sql
    }

    fn resolve(&self, dispatch: &DispatchTable, requests: &[MetricRequest]) -> Result<Vec<MetricValue>> {
        let plan = self.plan(dispatch, requests)?;
        self.execute(&plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Capabilities;
    use crate::metrics::COLUMN_STANDARD_DEVIATION;
    use core::cell::RefCell;
    use ohno::app_err;

    #[derive(Default)]
    struct RecordingExecutor {
        queries: RefCell<Vec<String>>,
        fail: bool,
    }

    impl QueryExecutor for RecordingExecutor {
        fn fetch_row(&self, query: &str) -> Result<Vec<MetricValue>> {
            self.queries.borrow_mut().push(query.to_string());
            if self.fail {
                return Err(app_err!("relation \"orders\" does not exist"));
            }
            Ok(query.matches(" AS ").map(|_| MetricValue::Float(1.5)).collect())
        }
    }

    fn requests() -> Vec<MetricRequest> {
        vec![
            MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "price"),
            MetricRequest::for_column(COLUMN_STANDARD_DEVIATION, "qty"),
        ]
    }

    #[test]
    fn test_plan_does_not_query() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let engine = SqlEngine::new(RecordingExecutor::default(), Dialect::new("postgresql"), "orders");

        let plan = engine.plan(&dispatch, &requests()).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(engine.executor().queries.borrow().is_empty());

        let values = engine.execute(&plan).unwrap();
        assert_eq!(values, [MetricValue::Float(1.5), MetricValue::Float(1.5)]);
        assert_eq!(engine.executor().queries.borrow().len(), 1);
    }

    #[test]
    fn test_single_query_per_batch() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let engine = SqlEngine::new(RecordingExecutor::default(), Dialect::new("mssql"), "dbo.orders");

        let _ = engine.resolve(&dispatch, &requests()).unwrap();
        let queries = engine.executor().queries.borrow();
        assert_eq!(queries.len(), 1);
        insta::assert_snapshot!(queries[0].as_str(), @"SELECT stdev([price]) AS [m0], stdev([qty]) AS [m1] FROM [dbo].[orders]");
    }

    #[test]
    fn test_executor_error_is_unchanged() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let executor = RecordingExecutor {
            fail: true,
            ..RecordingExecutor::default()
        };
        let engine = SqlEngine::new(executor, Dialect::new("postgresql"), "orders");

        let err = engine.resolve(&dispatch, &requests()).unwrap_err();
        assert!(err.to_string().contains("relation \"orders\" does not exist"), "{err}");
    }

    #[test]
    fn test_empty_batch_sends_nothing() {
        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let engine = SqlEngine::new(RecordingExecutor::default(), Dialect::new("postgresql"), "orders");

        assert!(engine.resolve(&dispatch, &[]).unwrap().is_empty());
        assert!(engine.executor().queries.borrow().is_empty());
    }

    #[test]
    fn test_short_row_is_rejected() {
        struct ShortExecutor;

        impl QueryExecutor for ShortExecutor {
            fn fetch_row(&self, _query: &str) -> Result<Vec<MetricValue>> {
                Ok(vec![MetricValue::Null])
            }
        }

        let dispatch = DispatchTable::from_definitions(Capabilities::all()).unwrap();
        let engine = SqlEngine::new(ShortExecutor, Dialect::new("sqlite"), "orders");
        let err = engine.resolve(&dispatch, &requests()).unwrap_err();
        assert!(err.to_string().contains("returned 1 values for 2 aggregates"));
    }
}
