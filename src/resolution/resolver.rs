use super::{LOG_TARGET, ResolveOptions};
use crate::Result;
use crate::dispatch::DispatchTable;
use crate::engines::ExecutionEngine;
use crate::metrics::{BackendKind, MetricId, MetricRequest, MetricValue};
use compact_str::CompactString;
use ohno::bail;
use serde::Serialize;

/// A fully post-processed metric value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMetric {
    pub metric: MetricId,
    pub column: CompactString,
    pub backend: BackendKind,
    pub value: MetricValue,
}

/// Resolves batches of metric requests against a dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct MetricResolver<'a> {
    dispatch: &'a DispatchTable,
    options: ResolveOptions,
}

impl<'a> MetricResolver<'a> {
    #[must_use]
    pub const fn new(dispatch: &'a DispatchTable, options: ResolveOptions) -> Self {
        Self { dispatch, options }
    }

    #[must_use]
    pub const fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Resolve every request on `engine` as one batch.
    ///
    /// Results come back in request order. Deferred engines issue a single
    /// aggregate evaluation for the whole batch.
    ///
    /// # Errors
    ///
    /// Fails on dispatch or engine errors, or when a metric resolves to NaN
    /// and NaN replacement is disabled.
    pub fn resolve(&self, engine: &impl ExecutionEngine, requests: &[MetricRequest]) -> Result<Vec<ResolvedMetric>> {
        let backend = engine.backend();
        log::debug!(target: LOG_TARGET, "Resolving {} metrics on the {backend} backend", requests.len());

        let values = engine.resolve(self.dispatch, requests)?;
        if values.len() != requests.len() {
            bail!(
                "the {backend} backend returned {} values for {} requests",
                values.len(),
                requests.len()
            );
        }

        requests
            .iter()
            .zip(values)
            .map(|(request, value)| {
                Ok(ResolvedMetric {
                    metric: request.metric.clone(),
                    column: request.column().into(),
                    backend,
                    value: self.finalize(request, value)?,
                })
            })
            .collect()
    }

    fn finalize(&self, request: &MetricRequest, value: MetricValue) -> Result<MetricValue> {
        let value = match value {
            MetricValue::Null if self.options.enforce_numeric_metric => MetricValue::Float(f64::NAN),
            other => other,
        };

        if !value.is_nan() {
            return Ok(value);
        }

        if self.options.replace_nan_with_zero {
            log::debug!(target: LOG_TARGET, "Replacing NaN result of {request} with 0");
            return Ok(MetricValue::Float(0.0));
        }

        bail!(
            "metric '{}' for column '{}' resolved to NaN; enable replace_nan_with_zero to report it as 0",
            request.metric,
            request.column()
        )
    }
}
