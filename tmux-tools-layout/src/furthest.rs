//! Furthest-pane lookup.

use crate::client::Tmux;
use crate::commands::TmuxCommand;
use crate::error::{LayoutError, Result};
use crate::neighbors::parse_flags;
use crate::runner::CommandRunner;
use crate::types::{EdgeTarget, Pane};

impl<R: CommandRunner> Tmux<R> {
    /// First pane, in index order, touching every edge of `target`.
    ///
    /// Index order is the only tie-break, so the result is stable for a
    /// given layout.
    pub fn furthest_pane(&mut self, target: impl Into<EdgeTarget>) -> Result<Pane> {
        let target = target.into();
        let format = target.boundary_format();
        let edge_count = target.edges().len();

        for pane in self.panes()? {
            let output = self.query(&TmuxCommand::display(Some(&pane.id), &format))?;
            if parse_flags(&output, edge_count)?.into_iter().all(|flag| flag) {
                log::debug!("furthest {target} pane is {}", pane.id);
                return Ok(pane);
            }
        }

        Err(LayoutError::NotFound { target })
    }
}
