//! The configuration file and its on-disk location.
//!
//! Covers:
//! - `load` / `load_from` (YAML file I/O, missing file means defaults)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - `resolve_tmux_path` (PATH lookup for the tmux binary)
//! - Socket overrides applied on top of the file by the command line

use crate::error::ConfigError;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

fn default_tmux_path() -> String {
    "tmux".to_string()
}

fn default_placeholder_command() -> String {
    "cat".to_string()
}

/// Settings read from `~/.config/tmux/tools/config.yaml`.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// tmux binary; a bare `tmux` is looked up in PATH
    pub tmux_path: String,
    /// Socket name passed as `tmux -L`
    pub socket_name: Option<String>,
    /// Socket path passed as `tmux -S`
    pub socket_path: Option<PathBuf>,
    /// Debug log level when neither `--log-level` nor `RUST_LOG` is given
    pub log_level: LogLevel,
    /// Command run in the temporary pane opened while relocating a window
    pub placeholder_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmux_path: default_tmux_path(),
            socket_name: None,
            socket_path: None,
            log_level: LogLevel::default(),
            placeholder_command: default_placeholder_command(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, or defaults if it does not exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Config path: {:?}", path);

        if !path.exists() {
            log::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty or comment-only file is a valid, empty config
        let is_blank = contents
            .lines()
            .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'));
        if is_blank {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path (`~/.config/tmux/tools`)
    pub fn config_dir() -> PathBuf {
        if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join("tmux").join("tools")
        } else {
            // Fallback if home directory cannot be determined
            PathBuf::from(".")
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Check field values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmux_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tmux_path must not be empty".to_string(),
            ));
        }
        if self.placeholder_command.trim().is_empty() {
            return Err(ConfigError::Validation(
                "placeholder_command must not be empty".to_string(),
            ));
        }
        if let Some(name) = &self.socket_name
            && (name.is_empty() || name.contains('/'))
        {
            return Err(ConfigError::Validation(format!(
                "socket_name '{name}' must be a non-empty file name; use socket_path for paths"
            )));
        }
        Ok(())
    }

    /// Override the socket name (`-L`) from the command line
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }

    /// Override the socket path (`-S`) from the command line
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Resolve the tmux executable path.
    ///
    /// A configured path other than plain `tmux` is used as is. Otherwise
    /// PATH is searched, then a few common install locations for
    /// environments where PATH is incomplete.
    pub fn resolve_tmux_path(&self) -> String {
        let configured = &self.tmux_path;

        if configured != "tmux" {
            return configured.clone();
        }

        if let Some(found) = search_path("tmux", std::env::var_os("PATH").as_deref()) {
            return found.to_string_lossy().to_string();
        }

        #[cfg(target_os = "macos")]
        {
            let macos_paths = [
                "/opt/homebrew/bin/tmux", // Homebrew on Apple Silicon
                "/usr/local/bin/tmux",    // Homebrew on Intel / MacPorts
            ];
            for path in macos_paths {
                if Path::new(path).exists() {
                    return path.to_string();
                }
            }
        }

        #[cfg(target_os = "linux")]
        {
            let linux_paths = [
                "/usr/bin/tmux",       // Most distros
                "/usr/local/bin/tmux", // Manual install
                "/snap/bin/tmux",      // Snap package
            ];
            for path in linux_paths {
                if Path::new(path).exists() {
                    return path.to_string();
                }
            }
        }

        // Final fallback - let the OS try
        configured.clone()
    }
}

/// First `executable` found in the directories of a PATH-style list.
fn search_path(executable: &str, path_env: Option<&OsStr>) -> Option<PathBuf> {
    std::env::split_paths(path_env?)
        .map(|dir| dir.join(executable))
        .find(|candidate| candidate.is_file())
}
