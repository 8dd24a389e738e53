//! Typed error types for tmux-tools-layout.
//!
//! Every failure the topology resolver and relocation engine can produce is
//! classified here. Reporting (logging, exit codes) is left to the caller.

use crate::types::EdgeTarget;
use thiserror::Error;

/// Errors produced while querying or rearranging tmux panes.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Introspection output did not match the pane record schema.
    ///
    /// Usually a tmux version mismatch or a format string typo. Never retried.
    #[error("malformed pane record '{record}': {reason}")]
    MalformedRecord {
        /// The offending line, verbatim.
        record: String,
        /// Which field or count check failed.
        reason: String,
    },

    /// A read-only tmux command exited non-zero.
    #[error("tmux query `{command}` failed (status {status}): {stderr}")]
    QueryFailed {
        /// Rendered command line, without global options.
        command: String,
        /// Exit status reported by tmux.
        status: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// A command that changes focus or layout exited non-zero.
    ///
    /// Mutations already applied before this one are not rolled back.
    #[error("tmux command `{command}` failed (status {status}): {stderr}")]
    MutationFailed {
        /// Rendered command line, without global options.
        command: String,
        /// Exit status reported by tmux.
        status: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// No pane touches the requested edge or corner of the window.
    #[error("no pane found at the {target} boundary of the window")]
    NotFound {
        /// The edge or corner that was scanned for.
        target: EdgeTarget,
    },

    /// The tmux binary could not be started at all.
    #[error("failed to run tmux: {0}")]
    Spawn(#[from] std::io::Error),
}

impl LayoutError {
    pub(crate) fn malformed(record: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            record: record.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;
