//! Typed error variants for the tmux-tools-config crate.
//!
//! Callers that work with `anyhow` can recover the variant with
//! `downcast_ref::<ConfigError>()`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error reading config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML or unknown values.
    #[error("YAML parse error in config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the problem.
    #[error("Config validation error: {0}")]
    Validation(String),
}
