use crate::Result;
use crate::metrics::BackendKind;
use crate::resolution::ResolveOptions;
use camino::{Utf8Path, Utf8PathBuf};
use compact_str::CompactString;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "metrics.toml";

const MAX_PARTITIONS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backends to register strategies for
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendKind>,

    /// Dialect discriminator for generated SQL
    #[serde(default = "default_sql_dialect")]
    pub sql_dialect: CompactString,

    /// Number of partitions the distributed backend splits a table into (1..=1024)
    #[serde(default = "default_distributed_partitions")]
    pub distributed_partitions: usize,

    /// Report NaN results as 0 instead of failing
    #[serde(default)]
    pub replace_nan_with_zero: bool,

    /// Treat null results as NaN
    #[serde(default)]
    pub enforce_numeric_metric: bool,
}

fn default_backends() -> Vec<BackendKind> {
    vec![BackendKind::InMemory, BackendKind::Sql, BackendKind::Distributed]
}

fn default_sql_dialect() -> CompactString {
    "postgresql".into()
}

const fn default_distributed_partitions() -> usize {
    4
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.backends.is_empty() {
            return Err(app_err!("backends must name at least one backend"));
        }

        if self.sql_dialect.trim().is_empty() {
            return Err(app_err!("sql_dialect must not be empty"));
        }

        if !(1..=MAX_PARTITIONS).contains(&self.distributed_partitions) {
            return Err(app_err!(
                "distributed_partitions must be between 1 and {MAX_PARTITIONS}, got {}",
                self.distributed_partitions
            ));
        }

        Ok(())
    }

    #[must_use]
    pub const fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions::new(self.enforce_numeric_metric, self.replace_nan_with_zero)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
