//! Arguments and setup shared by several commands.

use crate::{NamespaceConfig, Options, Result};
use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    #[default]
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Validation settings, from a configuration file and individual flags
#[derive(Args, Debug, Default)]
pub struct OptionsArgs {
    /// Path to a configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Accept reserved categories, ping names and target keywords
    #[arg(long)]
    pub allow_reserved: bool,

    /// Disable metrics expiring at or before this major version
    #[arg(long, value_name = "VERSION")]
    pub expire_by_version: Option<u32>,

    /// Disable metrics expiring before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub expiration_date: Option<NaiveDate>,
}

impl OptionsArgs {
    /// Combine the configuration file, if any, with the flags; flags win
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded
    pub fn resolve(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };

        options.allow_reserved |= self.allow_reserved;
        if self.expire_by_version.is_some() {
            options.expire_by_version = self.expire_by_version;
        }
        if self.expiration_date.is_some() {
            options.expiration_date = self.expiration_date;
        }

        Ok(options)
    }
}

/// Where generated code goes and where the runtime library comes from
#[derive(Args, Debug, Default)]
pub struct NamespaceArgs {
    /// Package or namespace of the generated code
    #[arg(long, value_name = "NAME")]
    pub namespace: Option<String>,

    /// Namespace of the Glean runtime library
    #[arg(long, value_name = "NAME")]
    pub glean_namespace: Option<String>,
}

impl NamespaceArgs {
    #[must_use]
    pub fn to_config(&self) -> NamespaceConfig {
        NamespaceConfig {
            namespace: self.namespace.clone(),
            glean_namespace: self.glean_namespace.clone(),
        }
    }
}

/// Initialize the logger for a log level
///
/// `RUST_LOG` overrides the level. Initializing more than once is harmless.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
