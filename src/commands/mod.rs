//! Command-line interface for column-metrics
//!
//! # Commands
//!
//! - **compute**: Load a CSV file and resolve metrics on the in-memory or
//!   distributed backend, printing text or JSON
//! - **sql**: Build the deferred SQL plan for a dialect and print the single
//!   aggregate query it would send (only with the `sql` feature)
//! - **list**: Print the `(metric, backend)` bindings of the dispatch table
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file and report the active backends
//!
//! Configuration is a TOML file (`metrics.toml` by default) naming the backends
//! to register, the SQL dialect, the distributed partition count, and the NaN
//! handling policy applied by the resolver.

mod common;
mod compute;
mod config;
mod host;
mod init;
mod list;
mod run;
#[cfg(feature = "sql")]
mod sql;
mod validate;

pub use common::{CommonArgs, LogLevel};
pub use compute::{ComputeArgs, compute_metrics};
pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use list::{ListArgs, list_bindings};
pub use run::run;
#[cfg(feature = "sql")]
pub use sql::{SqlArgs, render_sql};
pub use validate::{ValidateArgs, validate_config};
