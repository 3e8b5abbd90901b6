use super::Host;
use super::common::{CommonArgs, dispatch_table};
use crate::Result;
use crate::engines::{AggregationPlan, render_query};
use crate::expr::Dialect;
use crate::metrics::{BackendKind, COLUMN_STANDARD_DEVIATION, MetricRequest};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct SqlArgs {
    /// Table to aggregate, optionally schema-qualified (`schema.table`)
    #[arg(long, value_name = "TABLE")]
    pub table: String,

    /// Columns to compute the metric for
    #[arg(long, value_name = "COLUMN", value_delimiter = ',', required = true)]
    pub column: Vec<String>,

    /// Metric to compute
    #[arg(long, value_name = "METRIC", default_value = COLUMN_STANDARD_DEVIATION)]
    pub metric: String,

    /// SQL dialect (defaults to `sql_dialect` from the configuration)
    #[arg(long, value_name = "DIALECT")]
    pub dialect: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print the aggregate query the SQL backend would send, without sending it.
pub fn render_sql<H: Host>(host: &mut H, args: &SqlArgs) -> Result<()> {
    let config = args.common.setup()?;
    let dispatch = dispatch_table(&config)?;
    let dialect = Dialect::new(args.dialect.as_deref().unwrap_or(config.sql_dialect.as_str()));

    let requests: Vec<_> = args
        .column
        .iter()
        .map(|column| MetricRequest::for_column(args.metric.as_str(), column))
        .collect();

    let plan = AggregationPlan::build(&dispatch, BackendKind::Sql, dialect, &requests)?;
    let query = render_query(&args.table, &plan)?;

    writeln!(host.output(), "{query}").into_app_err("writing query")?;
    Ok(())
}
