//! Window relocation.
//!
//! Moving the focused pane one step in a direction is built from tmux's
//! layout primitives:
//!
//! - **Half relocation**: a neighbor exists across the target edge, so the
//!   pane is joined into the neighbor's cell with a split across the axis
//!   of travel.
//! - **Full relocation**: no neighbor, so a new slot is split open along the
//!   whole window edge, the pane's content is swapped into it and the
//!   placeholder left behind is killed.
//!
//! Nothing is rolled back when a step fails part way through.

use crate::client::Tmux;
use crate::commands::TmuxCommand;
use crate::error::Result;
use crate::parser::first_line;
use crate::runner::CommandRunner;
use crate::types::{Direction, EdgeTarget, Pane, PaneId};

/// What [`Tmux::move_window`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The window has a single pane; nothing to move.
    SinglePane,
    /// Joined into the neighbor with this ID.
    Joined { neighbor: PaneId },
    /// Moved to the window edge next to the furthest pane with this ID.
    Relocated { anchor: PaneId },
    /// The boundary split did not leave the new pane focused; stopped
    /// before swapping. The split pane may remain.
    Aborted { split: Option<PaneId> },
    /// No neighbor and no sensible boundary move.
    Unchanged,
}

impl<R: CommandRunner> Tmux<R> {
    /// Move the focused pane one step in `direction`.
    ///
    /// Focus ends on the pane that was focused on entry, and the pane cache
    /// is invalidated, whichever branch ran and whether or not it failed.
    pub fn move_window(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let count = self.pane_count()?;
        if count <= 1 {
            log::info!("move {direction}: window has {count} pane(s), nothing to move");
            return Ok(MoveOutcome::SinglePane);
        }

        let current = match self.current_pane() {
            Ok(pane) => pane,
            Err(err) => {
                // Nothing to refocus yet
                self.cache_mut().invalidate();
                return Err(err);
            }
        };
        let result = self.relocate(&current, direction, count);
        self.finish_move(&current);
        result
    }

    fn relocate(&mut self, current: &Pane, direction: Direction, count: usize) -> Result<MoveOutcome> {
        let neighbors = self.neighbors(current)?;

        if let Some(neighbor) = &neighbors.get(direction).pane {
            let orientation = direction.join_orientation();
            log::info!(
                "move {direction}: joining {} into neighbor {} ({})",
                current.id,
                neighbor.id,
                orientation.flag()
            );
            self.mutate(&TmuxCommand::join_pane(&current.id, &neighbor.id, orientation))?;
            return Ok(MoveOutcome::Joined {
                neighbor: neighbor.id.clone(),
            });
        }

        let [side_a, side_b] = direction.perpendicular();
        if count == 2 || neighbors.exists(side_a) || neighbors.exists(side_b) {
            return self.relocate_to_boundary(current, direction);
        }

        log::info!("move {direction}: {} has nowhere to go", current.id);
        Ok(MoveOutcome::Unchanged)
    }

    fn relocate_to_boundary(&mut self, current: &Pane, direction: Direction) -> Result<MoveOutcome> {
        let anchor = match self.furthest_pane(direction) {
            Ok(pane) => pane,
            Err(err) => {
                let corner = direction.fallback_corner();
                log::warn!("move {direction}: {err}; retrying with the {corner} corner");
                self.furthest_pane(EdgeTarget::Corner(corner))?
            }
        };

        let (orientation, placement) = direction.boundary_split();
        let split = TmuxCommand::split_window(
            &anchor.id,
            orientation,
            placement,
            self.placeholder_command(),
        );
        let output = self.mutate(&split)?;
        let split_id = first_line(&output).to_string();

        let focused = self.current_pane().inspect_err(|err| {
            log::error!(
                "move {direction}: layout partially changed, split pane {split_id} left in place: {err}"
            );
        })?;

        let placeholder_focused = focused.id != current.id
            && (split_id.is_empty() || focused.id == split_id);
        if !placeholder_focused {
            log::warn!(
                "move {direction}: focus is on {} after splitting {}, not on the new pane; stopping",
                focused.id,
                anchor.id
            );
            return Ok(MoveOutcome::Aborted {
                split: (!split_id.is_empty()).then_some(split_id),
            });
        }

        let placeholder = focused.id;
        log::info!(
            "move {direction}: swapping {} into new slot {placeholder} beside {}",
            current.id,
            anchor.id
        );

        self.mutate(&TmuxCommand::swap_pane(&current.id, &placeholder))
            .inspect_err(|err| {
                log::error!(
                    "move {direction}: layout partially changed, split pane {placeholder} left in place: {err}"
                );
            })?;
        self.mutate(&TmuxCommand::kill_pane(&placeholder))
            .inspect_err(|err| {
                log::error!(
                    "move {direction}: layout partially changed, placeholder {placeholder} not killed: {err}"
                );
            })?;

        Ok(MoveOutcome::Relocated {
            anchor: anchor.id,
        })
    }

    fn finish_move(&mut self, original: &Pane) {
        if let Err(err) = self.select_pane(&original.id) {
            log::warn!("could not refocus {}: {err}", original.id);
        }
        self.cache_mut().invalidate();
    }
}
