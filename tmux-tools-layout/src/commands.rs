//! tmux command builders
//!
//! This module provides type-safe builders for the tmux commands the
//! topology resolver and relocation engine issue. A command is a name, an
//! ordered list of flags and an optional trailing argument; it is rendered
//! to argv tokens rather than a shell string, so format strings need no
//! quoting.

use crate::types::{Placement, SplitOrientation};
use std::fmt;

/// A single command-line flag, optionally followed by a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    key: String,
    value: Option<String>,
}

impl Flag {
    /// A flag with no value (e.g. `-p`)
    pub fn bare(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// A flag followed by a value (e.g. `-t %3`).
    ///
    /// An empty value renders as a bare flag.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            key: key.into(),
            value: (!value.is_empty()).then_some(value),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Argv tokens for this flag.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str()).chain(self.value.as_deref())
    }
}

/// A tmux command ready to be run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxCommand {
    name: &'static str,
    flags: Vec<Flag>,
    trailing: Option<String>,
}

impl TmuxCommand {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            flags: Vec::new(),
            trailing: None,
        }
    }

    fn flag(mut self, key: &str) -> Self {
        self.flags.push(Flag::bare(key));
        self
    }

    fn arg(mut self, key: &str, value: impl Into<String>) -> Self {
        self.flags.push(Flag::with_value(key, value));
        self
    }

    fn trailing(mut self, argument: impl Into<String>) -> Self {
        self.trailing = Some(argument.into());
        self
    }

    /// Command name (e.g. `split-window`)
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn trailing_argument(&self) -> Option<&str> {
        self.trailing.as_deref()
    }

    /// Whether `key` was passed, with or without a value.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.iter().any(|flag| flag.key == key)
    }

    /// Value passed with `key`, if any.
    pub fn flag_value(&self, key: &str) -> Option<&str> {
        self.flags
            .iter()
            .find(|flag| flag.key == key)
            .and_then(Flag::value)
    }

    /// Argv tokens: name, flags in order, then the trailing argument.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.name.to_string()];
        for flag in &self.flags {
            args.extend(flag.tokens().map(str::to_string));
        }
        if let Some(trailing) = &self.trailing {
            args.push(trailing.clone());
        }
        args
    }

    /// Whether running this command changes the pane layout of a window.
    ///
    /// The pane inventory cache must be dropped around every such command.
    pub fn alters_layout(&self) -> bool {
        matches!(
            self.name,
            "split-window" | "join-pane" | "swap-pane" | "kill-pane"
        )
    }

    // =========================================================================
    // Query Commands
    // =========================================================================

    /// List panes in the current window
    pub fn list_panes(format: &str) -> Self {
        Self::new("list-panes").arg("-F", format)
    }

    /// Print `format` expanded for `target`, or for the focused pane.
    pub fn display(target: Option<&str>, format: &str) -> Self {
        let cmd = Self::new("display-message").flag("-p");
        let cmd = match target {
            Some(target) => cmd.arg("-t", target),
            None => cmd,
        };
        cmd.arg("-F", format)
    }

    /// List sessions on the server
    pub fn list_sessions(format: &str) -> Self {
        Self::new("list-sessions").arg("-F", format)
    }

    // =========================================================================
    // Pane Commands
    // =========================================================================

    /// Select a pane by ID
    pub fn select_pane(pane_id: &str) -> Self {
        Self::new("select-pane").arg("-t", pane_id)
    }

    /// Split a pane across the full window, running `command` in the new pane.
    ///
    /// tmux prints the new pane ID on stdout.
    pub fn split_window(
        target: &str,
        orientation: SplitOrientation,
        placement: Placement,
        command: &str,
    ) -> Self {
        let cmd = Self::new("split-window").flag("-f").arg("-t", target);
        let cmd = match placement {
            Placement::Before => cmd.flag("-b"),
            Placement::After => cmd,
        };
        cmd.flag(orientation.flag())
            .flag("-P")
            .arg("-F", "#{pane_id}")
            .trailing(command)
    }

    /// Move `source` into the cell of `destination`, splitting it.
    pub fn join_pane(source: &str, destination: &str, orientation: SplitOrientation) -> Self {
        Self::new("join-pane")
            .arg("-s", source)
            .arg("-t", destination)
            .flag(orientation.flag())
    }

    /// Exchange the positions of two panes
    pub fn swap_pane(source: &str, destination: &str) -> Self {
        Self::new("swap-pane")
            .arg("-s", source)
            .arg("-t", destination)
    }

    /// Kill a pane
    pub fn kill_pane(pane_id: &str) -> Self {
        Self::new("kill-pane").arg("-t", pane_id)
    }

    /// Send a key to the focused pane
    pub fn send_keys(key: &str) -> Self {
        Self::new("send-keys").trailing(key)
    }

    // =========================================================================
    // Session Commands
    // =========================================================================

    /// Kill a session
    pub fn kill_session(name: &str) -> Self {
        Self::new("kill-session").arg("-t", name)
    }
}

impl fmt::Display for TmuxCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args().join(" "))
    }
}
