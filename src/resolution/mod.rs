//! Batch metric resolution
//!
//! A [`MetricResolver`] hands a batch of [`MetricRequest`]s to any
//! [`ExecutionEngine`](crate::engines::ExecutionEngine) in a single call, then
//! post-processes the raw values: null results may be coerced to NaN, and NaN
//! results are either replaced with zero or rejected, per [`ResolveOptions`].

mod resolve_options;
mod resolver;

pub use crate::metrics::MetricRequest;
pub use resolve_options::ResolveOptions;
pub use resolver::{MetricResolver, ResolvedMetric};

const LOG_TARGET: &str = "resolution";
