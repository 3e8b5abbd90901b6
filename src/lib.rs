#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Column metrics computed across heterogeneous execution backends
//!
//! A single logical metric, identified by name, is bound to one computation
//! strategy per backend. Strategies are registered once at start-up into an
//! immutable dispatch table and looked up by exact `(metric, backend)` match.
//!
//! # Module Organization
//!
//! - [`metrics`]: Metric identities, values, and the registered metric providers
//! - [`dispatch`]: Strategy registration and the `(metric, backend)` dispatch table
//! - [`expr`]: Deferred expressions and SQL dialect handling
//! - [`engines`]: Execution backends that consume the dispatch table
//! - [`resolution`]: Batch metric resolution with NaN and numeric post-processing
//! - [`commands`]: Command-line interface

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod dispatch;
pub mod engines;
pub mod expr;
pub mod metrics;
pub mod resolution;

pub use crate::commands::{Host, run};
