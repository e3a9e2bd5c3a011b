use charmm2gmx::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Conversion(#[from] EngineError),

    #[error("Failed to read configuration file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A `-S KEY=VALUE` entry that is malformed, names an unknown key or carries a bad value.
    #[error("Invalid --set override '{entry}': {reason}")]
    Override { entry: String, reason: String },

    #[error("Failed to create log file '{}': {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install the log subscriber: {0}")]
    Logger(#[from] tracing_subscriber::util::TryInitError),
}
