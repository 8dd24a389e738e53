//! Configuration system for tmux-tools.
//!
//! Loads `~/.config/tmux/tools/config.yaml`: which tmux binary and socket to
//! talk to, the debug log level, and the command run in placeholder panes.
//! A missing file yields defaults.

mod config;
mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
