//! Neighbor resolution.
//!
//! Adjacency comes from tmux itself: the `#{pane_at_*}` flags say whether a
//! pane touches a window edge, and the `{left-of}` family of targets names
//! the pane across an edge of the focused pane.

use crate::client::Tmux;
use crate::commands::TmuxCommand;
use crate::error::{LayoutError, Result};
use crate::parser::{PANE_FORMAT, first_line, is_empty_record};
use crate::runner::CommandRunner;
use crate::types::{BoundaryFlags, Direction, Neighbors, Pane};

const BOUNDARY_FORMAT: &str = "#{pane_at_left},#{pane_at_right},#{pane_at_top},#{pane_at_bottom}";

/// Parse a comma-separated list of `0`/`1` flags, expecting `count` of them.
pub(crate) fn parse_flags(output: &str, count: usize) -> Result<Vec<bool>> {
    let line = first_line(output);
    let flags = line
        .split(',')
        .map(|flag| match flag {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(LayoutError::malformed(
                line,
                format!("boundary flag '{other}' is not 0 or 1"),
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    if flags.len() != count {
        return Err(LayoutError::malformed(
            line,
            format!("expected {count} boundary flags, found {}", flags.len()),
        ));
    }
    Ok(flags)
}

impl<R: CommandRunner> Tmux<R> {
    /// Which window edges the pane with `pane_id` touches.
    pub fn boundary_flags(&mut self, pane_id: &str) -> Result<BoundaryFlags> {
        let output = self.query(&TmuxCommand::display(Some(pane_id), BOUNDARY_FORMAT))?;
        let flags = parse_flags(&output, 4)?;
        Ok(BoundaryFlags {
            left: flags[0],
            right: flags[1],
            top: flags[2],
            bottom: flags[3],
        })
    }

    /// The pane across the `direction` edge of `pane`, if there is one.
    ///
    /// `pane` is focused for the duration of the lookup and focus is put
    /// back afterwards. The boundary flag decides existence; when it says
    /// "interior" but the adjacent lookup comes back empty, the answer is
    /// still `None`.
    pub fn pane_in_direction(&mut self, pane: &Pane, direction: Direction) -> Result<Option<Pane>> {
        self.with_focus(pane, |tmux| {
            let edge_format = format!("#{{pane_at_{}}}", direction.edge_name());
            let at_edge = tmux.query(&TmuxCommand::display(None, &edge_format))?;
            if first_line(&at_edge) == "1" {
                return Ok(None);
            }

            let output = tmux.query(&TmuxCommand::display(
                Some(direction.relative_target()),
                PANE_FORMAT,
            ))?;
            let record = first_line(&output);
            if is_empty_record(record) {
                log::debug!(
                    "{} is not on the {} edge but tmux reports no pane {}-of it",
                    pane.id,
                    direction.edge_name(),
                    direction
                );
                return Ok(None);
            }

            Pane::parse(record).map(Some)
        })
    }

    /// Neighbors of `pane` in all four directions.
    ///
    /// Edges are read in one query without moving focus; only interior
    /// directions are then resolved through [`Tmux::pane_in_direction`].
    pub fn neighbors(&mut self, pane: &Pane) -> Result<Neighbors> {
        let flags = self.boundary_flags(&pane.id)?;
        let mut neighbors = Neighbors::none();

        for direction in Direction::ALL {
            if flags.at(direction) {
                continue;
            }
            let neighbor = self.pane_in_direction(pane, direction)?;
            neighbors.set(direction, neighbor);
        }

        Ok(neighbors)
    }
}
