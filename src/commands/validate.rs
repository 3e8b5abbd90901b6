use super::Host;
use super::common::dispatch_table;
use super::config::{Config, DEFAULT_CONFIG_FILE};
use crate::Result;
use crate::metrics::BackendKind;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `metrics.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Load the configuration and build the dispatch table it describes.
///
/// Returns the backends that ended up with at least one strategy.
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Vec<BackendKind>> {
    let config = Config::load(base_dir, config_path)?;
    let dispatch = dispatch_table(&config)?;

    let mut backends: Vec<_> = dispatch.bindings().into_iter().map(|(key, _)| key.backend).collect();
    backends.sort();
    backends.dedup();
    Ok(backends)
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match validate_config_inner(Utf8Path::new("."), config_path) {
        Ok(backends) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using {DEFAULT_CONFIG_FILE} or built-in defaults");
            }

            let names: Vec<_> = backends.iter().map(ToString::to_string).collect();
            let _ = writeln!(host.output(), "Active backends: {}", names.join(", "));
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
