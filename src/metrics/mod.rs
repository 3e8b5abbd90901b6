//! Metric identities, values, and the registered metric providers
//!
//! A metric is a named computation over one column. The same metric can be
//! computed on several backends, each through its own strategy:
//! - **Eager** strategies run immediately against an in-memory column and
//!   return a [`MetricValue`].
//! - **Deferred** strategies only build an [`Expr`](crate::expr::Expr) that a
//!   query or aggregation engine evaluates later.
//!
//! Metric providers are declared statically in `metric_def.rs`, each listing
//! the strategy it offers per [`BackendKind`]. The dispatch table is populated
//! from these declarations at start-up.

mod backend_kind;
mod column_standard_deviation;
mod computation_result;
mod metric_def;
mod metric_id;
mod metric_options;
mod metric_request;
mod metric_value;

pub use backend_kind::BackendKind;
pub use column_standard_deviation::sample_standard_deviation;
pub use computation_result::ComputationResult;
pub use metric_def::{METRIC_DEFINITIONS, MetricDef, find_definition};
pub use metric_id::{COLUMN_STANDARD_DEVIATION, MetricId};
pub use metric_options::MetricOptions;
pub use metric_request::MetricRequest;
pub use metric_value::MetricValue;
