//! Directional focus that cooperates with editors running inside panes.

use crate::client::Tmux;
use crate::commands::TmuxCommand;
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::types::{Direction, Pane};

/// What [`Tmux::focus_direction`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Focus moved to this pane.
    Moved(Pane),
    /// The focused pane is on the edge; `M-<hjkl>` was sent to it instead.
    Forwarded(String),
}

impl<R: CommandRunner> Tmux<R> {
    /// Focus the pane across the `direction` edge of the focused pane.
    ///
    /// At the window edge the matching `M-h/j/k/l` key is sent to the
    /// focused pane, so an editor bound to those keys can move between its
    /// own splits.
    pub fn focus_direction(&mut self, direction: Direction) -> Result<FocusOutcome> {
        let current = self.current_pane()?;

        match self.pane_in_direction(&current, direction)? {
            Some(target) => {
                self.select_pane(&target.id)?;
                Ok(FocusOutcome::Moved(target))
            }
            None => {
                let key = format!("M-{}", direction.vim_key());
                log::debug!("{} is on the {direction} edge, sending {key}", current.id);
                self.mutate(&TmuxCommand::send_keys(&key))?;
                Ok(FocusOutcome::Forwarded(key))
            }
        }
    }
}
