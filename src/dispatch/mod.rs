//! Strategy registration and the `(metric, backend)` dispatch table
//!
//! # Implementation Model
//!
//! Registration happens once at start-up through a [`RegistryBuilder`]. The
//! builder consults [`Capabilities`] to decide which backends can be served:
//! registrations for an unavailable backend are skipped with a debug log
//! instead of failing. [`RegistryBuilder::build`] freezes the bindings into a
//! [`DispatchTable`], which is read-only from then on and can be shared by any
//! number of concurrent readers without locking.
//!
//! Lookups are exact matches on the `(metric, backend)` pair. A missing pair is
//! reported as [`DispatchError::UnsupportedCombination`]; there is no fallback
//! strategy.

mod capabilities;
mod dispatch_error;
mod dispatch_table;
mod registry_builder;
mod strategy;

pub use capabilities::Capabilities;
pub use dispatch_error::DispatchError;
pub use dispatch_table::{BindingKey, DispatchTable};
pub use registry_builder::RegistryBuilder;
pub use strategy::{DeferredFn, EagerFn, Strategy, StrategyKind};

const LOG_TARGET: &str = "  dispatch";
