//! Focus changes.
//!
//! tmux has one focused pane per window, shared with every attached client.
//! Anything that moves focus temporarily goes through [`Tmux::with_focus`],
//! which puts it back on every exit path.

use crate::client::Tmux;
use crate::commands::TmuxCommand;
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::types::Pane;

impl<R: CommandRunner> Tmux<R> {
    /// Focus the pane with `pane_id`.
    pub fn select_pane(&mut self, pane_id: &str) -> Result<()> {
        self.mutate(&TmuxCommand::select_pane(pane_id))?;
        Ok(())
    }

    /// Run `f` with `pane` focused, then restore the previously focused pane.
    ///
    /// If `pane` already has focus no focus change is made. The restore runs
    /// whether `f` succeeds or fails; an error from `f` takes precedence over
    /// a failed restore.
    pub fn with_focus<T>(
        &mut self,
        pane: &Pane,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let original = self.current_pane()?;
        if original.id == pane.id {
            return f(self);
        }

        self.select_pane(&pane.id)?;
        let result = f(self);
        let restored = self.select_pane(&original.id);

        match (result, restored) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(restore_err)) => Err(restore_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(restore_err)) => {
                log::error!(
                    "could not restore focus to {} after failure: {}",
                    original.id,
                    restore_err
                );
                Err(err)
            }
        }
    }
}
