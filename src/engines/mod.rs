//! Execution backends that consume the dispatch table
//!
//! Each engine answers metric requests for one [`BackendKind`](crate::metrics::BackendKind):
//!
//! - [`InMemoryEngine`] runs eager strategies directly over columns held in memory.
//! - [`SqlEngine`] turns deferred strategies into one aggregate `SELECT` and
//!   hands it to a [`QueryExecutor`].
//! - [`DistributedEngine`] evaluates deferred aggregates over a partitioned
//!   table, computing partial moments per partition and merging them.
//!
//! [`SqlEngine`] and [`DistributedEngine`] are only compiled with the `sql`
//! and `distributed` cargo features.
//!
//! Deferred engines split resolution into `plan` and `execute`. Planning only
//! invokes strategies and never reaches the backend; execution sends the whole
//! plan at once.

mod aggregation_plan;
mod column;
#[cfg(feature = "distributed")]
mod distributed;
mod execution_engine;
mod in_memory;
mod moments;
#[cfg(feature = "sql")]
mod sql;
mod table;

pub use aggregation_plan::{AggregationPlan, PlannedAggregate};
pub use column::{ColumnHandle, InMemoryColumn};
#[cfg(feature = "distributed")]
pub use distributed::{DISTRIBUTED_DIALECT, DistributedEngine};
pub use execution_engine::ExecutionEngine;
pub use in_memory::InMemoryEngine;
pub(crate) use moments::Moments;
#[cfg(feature = "sql")]
pub use sql::{QueryExecutor, SqlEngine, render_query};
pub use table::InMemoryTable;

const LOG_TARGET: &str = "   engines";
