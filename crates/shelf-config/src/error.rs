//! Configuration errors.

use std::path::PathBuf;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value failed validation.
    #[error("Configuration error: {0}")]
    Invalid(String),

    /// `${VAR}` referenced an unset variable.
    #[error("Environment variable error in {field}: ${{{var}}} not set")]
    EnvVar {
        /// Dotted config key, e.g. `tutorials.root`.
        field: &'static str,
        /// Name of the missing variable.
        var: String,
    },
}
