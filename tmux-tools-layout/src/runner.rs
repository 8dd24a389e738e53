//! The tmux command interface.
//!
//! [`CommandRunner`] is the seam between the topology code and tmux itself.
//! [`ProcessRunner`] spawns the tmux binary synchronously; tests plug in a
//! scripted runner instead.

use crate::commands::{Flag, TmuxCommand};
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Captured result of one tmux invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Standard output without the trailing newline
    pub stdout: String,
    /// Standard error without the trailing newline
    pub stderr: String,
    /// Exit status (-1 when the process was killed by a signal)
    pub status: i32,
}

impl CommandOutput {
    /// Successful output carrying `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// Failed output with `status` and `stderr`.
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            status,
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs tmux commands and reports what they printed.
///
/// Implementations block until the command finishes; there is no timeout.
pub trait CommandRunner {
    /// Run `command` with `global` options placed before the command name.
    ///
    /// An `Err` means tmux could not be run at all; a command that ran and
    /// failed is reported through [`CommandOutput::status`].
    fn run(&mut self, global: &[Flag], command: &TmuxCommand) -> io::Result<CommandOutput>;
}

/// Runs commands by spawning the tmux binary.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: PathBuf,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("tmux")
    }
}

fn trim_newline(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes).into_owned();
    let trimmed = text.strip_suffix('\n').unwrap_or(&text);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    trimmed.to_string()
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, global: &[Flag], command: &TmuxCommand) -> io::Result<CommandOutput> {
        let output = Command::new(&self.binary)
            .args(global.iter().flat_map(|flag| flag.tokens()))
            .args(command.args())
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            stdout: trim_newline(&output.stdout),
            stderr: trim_newline(&output.stderr),
            status: output.status.code().unwrap_or(-1),
        })
    }
}
