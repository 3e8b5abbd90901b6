use super::moments::Moments;
use super::{AggregationPlan, ExecutionEngine, InMemoryTable, LOG_TARGET};
use crate::Result;
use crate::dispatch::DispatchTable;
use crate::expr::{Dialect, Expr};
use crate::metrics::{BackendKind, MetricRequest, MetricValue};
use ohno::{app_err, bail};
use rayon::prelude::*;

/// Dialect name the distributed engine hands to deferred strategies.
pub const DISTRIBUTED_DIALECT: &str = "dataframe";

/// Aggregates the distributed engine evaluates natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NativeAggregate {
    Count,
    Avg,
    VarSamp,
    VarPop,
    StddevSamp,
    StddevPop,
}

impl NativeAggregate {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "count" => Self::Count,
            "avg" | "mean" => Self::Avg,
            "var_samp" | "variance" => Self::VarSamp,
            "var_pop" => Self::VarPop,
            "stddev_samp" | "stddev" => Self::StddevSamp,
            "stddev_pop" => Self::StddevPop,
            _ => return None,
        })
    }

    fn finalize(self, moments: Moments) -> MetricValue {
        let value = match self {
            Self::Count => return MetricValue::UInt(moments.count),
            Self::Avg => moments.mean(),
            Self::VarSamp => moments.sample_variance(),
            Self::VarPop => moments.population_variance(),
            Self::StddevSamp => moments.sample_variance().map(f64::sqrt),
            Self::StddevPop => moments.population_variance().map(f64::sqrt),
        };

        value.map_or(MetricValue::Null, MetricValue::Float)
    }
}

/// Deferred engine that aggregates over row partitions in parallel.
///
/// Each aggregate is computed as partial moments per partition on the rayon
/// pool, then merged and finalized. Aggregates over fewer values than the
/// statistic needs evaluate to [`MetricValue::Null`].
#[derive(Debug, Clone)]
pub struct DistributedEngine {
    partitions: Vec<InMemoryTable>,
    dialect: Dialect,
}

impl DistributedEngine {
    /// Split `table` into `partitions` contiguous row ranges of near-equal size.
    ///
    /// # Errors
    ///
    /// Fails if `partitions` is zero.
    pub fn new(table: &InMemoryTable, partitions: usize) -> Result<Self> {
        if partitions == 0 {
            bail!("the distributed engine needs at least one partition");
        }

        let rows = table.row_count();
        let partitions = (0..partitions)
            .map(|i| table.slice(i * rows / partitions, (i + 1) * rows / partitions))
            .collect();

        Ok(Self {
            partitions,
            dialect: Dialect::new(DISTRIBUTED_DIALECT),
        })
    }

    #[must_use]
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Build the plan for `requests` without touching any partition.
    ///
    /// # Errors
    ///
    /// Fails if a request has no distributed strategy.
    pub fn plan(&self, dispatch: &DispatchTable, requests: &[MetricRequest]) -> Result<AggregationPlan> {
        AggregationPlan::build(dispatch, BackendKind::Distributed, self.dialect.clone(), requests)
    }

    /// Evaluate every planned aggregate over all partitions.
    ///
    /// # Errors
    ///
    /// Fails on aggregates the engine does not support or unknown columns.
    pub fn execute(&self, plan: &AggregationPlan) -> Result<Vec<MetricValue>> {
        plan.items().iter().map(|item| self.evaluate(&item.expr)).collect()
    }

    fn evaluate(&self, expr: &Expr) -> Result<MetricValue> {
        let (aggregate, column) = match expr {
            Expr::Function { name, args } => {
                let aggregate = NativeAggregate::from_name(name).ok_or_else(|| app_err!("unsupported aggregate function '{name}'"))?;
                match args.as_slice() {
                    [Expr::Column(column)] => (aggregate, column.as_str()),
                    _ => bail!("aggregate '{expr}' must take exactly one column argument"),
                }
            }
            Expr::Column(_) => bail!("'{expr}' is not an aggregate"),
        };

        let columns = self
            .partitions
            .iter()
            .map(|partition| partition.column(column))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(target: LOG_TARGET, "Evaluating {expr} over {} partitions", columns.len());

        let moments = columns
            .par_iter()
            .map(|column| Moments::from_values(column.non_null_values()))
            .reduce(Moments::default, Moments::merge);

        Ok(aggregate.finalize(moments))
    }
}

impl ExecutionEngine for DistributedEngine {
    fn backend(&self) -> BackendKind {
        BackendKind::Distributed
    }

    fn resolve(&self, dispatch: &DispatchTable, requests: &[MetricRequest]) -> Result<Vec<MetricValue>> {
        let plan = self.plan(dispatch, requests)?;
        self.execute(&plan)
    }
}
