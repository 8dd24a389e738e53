//! The tmux client: a command runner plus the state every query shares.
//!
//! [`Tmux`] owns the global options (socket selection), the pane inventory
//! cache and the placeholder command used for boundary splits. Inventory,
//! neighbor, locator and relocation operations are implemented on it in
//! their own modules.

use crate::cache::PaneCache;
use crate::commands::{Flag, TmuxCommand};
use crate::error::{LayoutError, Result};
use crate::runner::{CommandOutput, CommandRunner};
use std::path::Path;

/// Command run in the temporary pane opened by a boundary split.
pub const DEFAULT_PLACEHOLDER_COMMAND: &str = "cat";

pub struct Tmux<R> {
    runner: R,
    global: Vec<Flag>,
    cache: PaneCache,
    placeholder_command: String,
}

impl<R: CommandRunner> Tmux<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            global: Vec::new(),
            cache: PaneCache::new(),
            placeholder_command: DEFAULT_PLACEHOLDER_COMMAND.to_string(),
        }
    }

    /// Talk to the server on socket `name` (`tmux -L`).
    pub fn with_socket_name(mut self, name: &str) -> Self {
        self.global.push(Flag::with_value("-L", name));
        self
    }

    /// Talk to the server on socket `path` (`tmux -S`).
    pub fn with_socket_path(mut self, path: &Path) -> Self {
        self.global
            .push(Flag::with_value("-S", path.to_string_lossy()));
        self
    }

    pub fn with_placeholder_command(mut self, command: impl Into<String>) -> Self {
        self.placeholder_command = command.into();
        self
    }

    pub fn global_options(&self) -> &[Flag] {
        &self.global
    }

    pub fn placeholder_command(&self) -> &str {
        &self.placeholder_command
    }

    pub fn cache(&self) -> &PaneCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut PaneCache {
        &mut self.cache
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut R {
        &mut self.runner
    }

    fn execute(&mut self, command: &TmuxCommand) -> Result<CommandOutput> {
        log::debug!("tmux {command}");
        let output = self.runner.run(&self.global, command)?;
        if !output.success() {
            log::debug!(
                "tmux {} exited with {}: {}",
                command.name(),
                output.status,
                output.stderr
            );
        }
        Ok(output)
    }

    /// Run a read-only command and return its stdout.
    pub fn query(&mut self, command: &TmuxCommand) -> Result<String> {
        let output = self.execute(command)?;
        if !output.success() {
            return Err(LayoutError::QueryFailed {
                command: command.to_string(),
                status: output.status,
                stderr: output.stderr,
            });
        }
        Ok(output.stdout)
    }

    /// Run a command that changes focus, layout or pane input.
    ///
    /// Layout mutations invalidate the pane cache before they are issued,
    /// whether or not they succeed.
    pub fn mutate(&mut self, command: &TmuxCommand) -> Result<String> {
        if command.alters_layout() {
            self.cache.invalidate();
        }
        let output = self.execute(command)?;
        if !output.success() {
            return Err(LayoutError::MutationFailed {
                command: command.to_string(),
                status: output.status,
                stderr: output.stderr,
            });
        }
        Ok(output.stdout)
    }
}
