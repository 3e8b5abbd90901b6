//! Command dispatch logic for column-metrics

#[cfg(feature = "sql")]
use super::{SqlArgs, render_sql};
use super::{ComputeArgs, InitArgs, ListArgs, ValidateArgs, compute_metrics, init_config, list_bindings, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "column-metrics", version, author)]
#[command(about = "Compute column metrics on in-memory, SQL, and distributed backends")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: MetricsSubcommand,
}

#[derive(Subcommand, Debug)]
enum MetricsSubcommand {
    /// Compute metrics over the columns of a CSV file
    Compute(Box<ComputeArgs>),
    /// Print the aggregate SQL query for a set of columns
    #[cfg(feature = "sql")]
    Sql(Box<SqlArgs>),
    /// List the registered metric strategies per backend
    List(ListArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        MetricsSubcommand::Compute(compute_args) => compute_metrics(host, compute_args),
        #[cfg(feature = "sql")]
        MetricsSubcommand::Sql(sql_args) => render_sql(host, sql_args),
        MetricsSubcommand::List(list_args) => list_bindings(host, list_args),
        MetricsSubcommand::Init(init_args) => init_config(host, init_args),
        MetricsSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::metrics::BackendKind;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compute_columns() {
        let cli = Cli::parse_from(["column-metrics", "compute", "data.csv", "--column", "a,b", "--column", "c", "--backend", "distributed"]);
        let MetricsSubcommand::Compute(args) = cli.command else {
            panic!("expected the compute subcommand");
        };
        assert_eq!(args.column, ["a", "b", "c"]);
        assert_eq!(args.backend, BackendKind::Distributed);
        assert_eq!(args.metric, "column.standard_deviation");
    }

    #[test]
    fn test_parse_rejects_unknown_backend() {
        let _ = Cli::try_parse_from(["column-metrics", "compute", "data.csv", "--column", "a", "--backend", "spark"]).unwrap_err();
    }

    #[test]
    fn test_run_list() {
        let mut host = TestHost::new();
        run(&mut host, ["column-metrics", "list", "--describe"]).unwrap();
        assert!(host.output_text().starts_with("column.standard_deviation\n"), "{}", host.output_text());
    }

    #[test]
    #[cfg(feature = "sql")]
    fn test_parse_sql_command() {
        let cli = Cli::parse_from(["column-metrics", "sql", "--table", "events", "--column", "x"]);
        assert!(matches!(cli.command, MetricsSubcommand::Sql(_)));
    }

    #[test]
    #[cfg(not(feature = "sql"))]
    fn test_sql_command_not_compiled() {
        let _ = Cli::try_parse_from(["column-metrics", "sql", "--table", "events", "--column", "x"]).unwrap_err();
    }
}
