//! Pane inventory of the current window.

use crate::client::Tmux;
use crate::commands::TmuxCommand;
use crate::error::Result;
use crate::parser::{PANE_FORMAT, first_line, is_empty_record};
use crate::runner::CommandRunner;
use crate::types::Pane;

impl<R: CommandRunner> Tmux<R> {
    /// All panes of the current window, in pane-index order.
    ///
    /// Served from the cache when it is populated; otherwise one
    /// `list-panes` query refreshes it.
    pub fn panes(&mut self) -> Result<Vec<Pane>> {
        if let Some(panes) = self.cache().get() {
            return Ok(panes.to_vec());
        }

        let output = self.query(&TmuxCommand::list_panes(PANE_FORMAT))?;
        let panes = output
            .lines()
            .filter(|line| !is_empty_record(line))
            .map(Pane::parse)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("inventory: {} panes in current window", panes.len());
        self.cache_mut().store(panes.clone());
        Ok(panes)
    }

    /// Number of panes in the current window.
    pub fn pane_count(&mut self) -> Result<usize> {
        Ok(self.panes()?.len())
    }

    /// The focused pane.
    pub fn current_pane(&mut self) -> Result<Pane> {
        let output = self.query(&TmuxCommand::display(None, PANE_FORMAT))?;
        Pane::parse(first_line(&output))
    }

    /// The pane addressed by `target` (an ID or any tmux target specifier).
    pub fn pane(&mut self, target: &str) -> Result<Pane> {
        let output = self.query(&TmuxCommand::display(Some(target), PANE_FORMAT))?;
        Pane::parse(first_line(&output))
    }
}
