use super::Host;
use super::common::{CommonArgs, dispatch_table};
use crate::Result;
use super::config::Config;
#[cfg(feature = "distributed")]
use crate::engines::DistributedEngine;
use crate::engines::{InMemoryEngine, InMemoryTable};
use crate::metrics::{BackendKind, COLUMN_STANDARD_DEVIATION, MetricRequest};
use crate::resolution::{MetricResolver, ResolvedMetric};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ComputeArgs {
    /// CSV file with a header row and numeric columns
    #[arg(value_name = "PATH")]
    pub input: Utf8PathBuf,

    /// Columns to compute the metric for
    #[arg(long, value_name = "COLUMN", value_delimiter = ',', required = true)]
    pub column: Vec<String>,

    /// Metric to compute
    #[arg(long, value_name = "METRIC", default_value = COLUMN_STANDARD_DEVIATION)]
    pub metric: String,

    /// Backend to compute on
    #[arg(long, value_name = "BACKEND", default_value = "in-memory")]
    pub backend: BackendKind,

    /// Override the configured number of distributed partitions
    #[arg(long, value_name = "COUNT")]
    pub partitions: Option<usize>,

    /// Emit results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn compute_metrics<H: Host>(host: &mut H, args: &ComputeArgs) -> Result<()> {
    let config = args.common.setup()?;

    match resolve_requests(&config, args) {
        Ok(resolved) => write_results(host, &resolved, args.json),
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Computing metrics failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

fn resolve_requests(config: &Config, args: &ComputeArgs) -> Result<Vec<ResolvedMetric>> {
    let dispatch = dispatch_table(config)?;
    let resolver = MetricResolver::new(&dispatch, config.resolve_options());

    let table = InMemoryTable::from_csv_path(&args.input)?;
    let requests: Vec<_> = args
        .column
        .iter()
        .map(|column| MetricRequest::for_column(args.metric.as_str(), column))
        .collect();

    match args.backend {
        BackendKind::InMemory => resolver.resolve(&InMemoryEngine::new(table), &requests),
        #[cfg(feature = "distributed")]
        BackendKind::Distributed => {
            let partitions = args.partitions.unwrap_or(config.distributed_partitions);
            resolver.resolve(&DistributedEngine::new(&table, partitions)?, &requests)
        }
        #[cfg(not(feature = "distributed"))]
        BackendKind::Distributed => bail!("the distributed backend is not compiled into this build"),
        BackendKind::Sql => bail!("the sql backend needs a database connection; use the `sql` command to render the query"),
    }
}

fn write_results<H: Host>(host: &mut H, resolved: &[ResolvedMetric], json: bool) -> Result<()> {
    let mut out = host.output();

    if json {
        let text = serde_json::to_string_pretty(resolved).into_app_err("serializing metric results")?;
        writeln!(out, "{text}").into_app_err("writing metric results")?;
        return Ok(());
    }

    for r in resolved {
        writeln!(out, "{}({}) = {}", r.metric, r.column, r.value).into_app_err("writing metric results")?;
    }

    Ok(())
}
