//! Session listing and cleanup.

use crate::client::Tmux;
use crate::commands::TmuxCommand;
use crate::error::{LayoutError, Result};
use crate::runner::CommandRunner;
use serde::Serialize;

const SESSION_FORMAT: &str = "#{session_name},#{session_attached}";

/// A tmux session and how many clients are attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub name: String,
    pub attached: usize,
}

impl SessionSummary {
    /// Parse one `SESSION_FORMAT` line.
    ///
    /// Session names may contain commas; the count is after the last one.
    pub fn parse(line: &str) -> Result<Self> {
        let (name, attached) = line
            .rsplit_once(',')
            .ok_or_else(|| LayoutError::malformed(line, "missing attached count"))?;
        let attached = attached.trim().parse().map_err(|_| {
            LayoutError::malformed(line, format!("attached count '{attached}' is not an integer"))
        })?;
        Ok(Self {
            name: name.to_string(),
            attached,
        })
    }
}

impl<R: CommandRunner> Tmux<R> {
    /// All sessions on the server.
    pub fn sessions(&mut self) -> Result<Vec<SessionSummary>> {
        let output = self.query(&TmuxCommand::list_sessions(SESSION_FORMAT))?;
        output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(SessionSummary::parse)
            .collect()
    }

    /// Kill every session with no attached client; returns their names.
    pub fn clean_sessions(&mut self) -> Result<Vec<String>> {
        let mut killed = Vec::new();
        for session in self.sessions()? {
            if session.attached > 0 {
                continue;
            }
            log::info!("killing unattached session '{}'", session.name);
            self.mutate(&TmuxCommand::kill_session(&session.name))?;
            killed.push(session.name);
        }
        Ok(killed)
    }
}
