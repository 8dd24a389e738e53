//! Pane record parsing
//!
//! tmux prints one comma-delimited record per pane using [`PANE_FORMAT`].
//! A record with every field empty is tmux's way of saying "no such pane";
//! callers filter it with [`is_empty_record`] before parsing.

use crate::error::{LayoutError, Result};
use crate::types::{Pane, PaneMode};
use std::str::FromStr;

/// Format string for a full pane record.
pub const PANE_FORMAT: &str = "#{pane_id},#{pane_tty},#{pane_pid},#{pane_index},#{pane_width},#{pane_height},#{pane_active},#{pane_current_path},#{pane_mode}";

/// What [`PANE_FORMAT`] expands to when the target pane does not exist.
pub const EMPTY_RECORD: &str = ",,,,,,,,";

const FIELD_COUNT: usize = 9;

/// Whether `line` carries no pane data (blank or the all-empty sentinel).
pub fn is_empty_record(line: &str) -> bool {
    let line = line.trim_end_matches('\r');
    line.is_empty() || line == EMPTY_RECORD
}

/// First line of a command's output.
pub(crate) fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("").trim_end_matches('\r')
}

fn parse_number<T: FromStr>(record: &str, name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| LayoutError::malformed(record, format!("{name} '{value}' is not an integer")))
}

fn parse_dimension(record: &str, name: &str, value: &str) -> Result<usize> {
    let parsed: usize = parse_number(record, name, value)?;
    if parsed == 0 {
        return Err(LayoutError::malformed(record, format!("{name} must be positive")));
    }
    Ok(parsed)
}

impl Pane {
    /// Parse one [`PANE_FORMAT`] record.
    pub fn parse(record: &str) -> Result<Self> {
        let record = record.trim_end_matches('\r');
        let fields: Vec<&str> = record.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(LayoutError::malformed(
                record,
                format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
            ));
        }

        Ok(Pane {
            id: fields[0].to_string(),
            tty: fields[1].to_string(),
            pid: parse_number(record, "pid", fields[2])?,
            index: parse_number(record, "index", fields[3])?,
            width: parse_dimension(record, "width", fields[4])?,
            height: parse_dimension(record, "height", fields[5])?,
            active: fields[6] == "1",
            cwd: fields[7].to_string(),
            mode: PaneMode::from_tmux(fields[8]),
        })
    }

    /// Render the pane back into a [`PANE_FORMAT`] record.
    pub fn to_record(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{}",
            self.id,
            self.tty,
            self.pid,
            self.index,
            self.width,
            self.height,
            if self.active { 1 } else { 0 },
            self.cwd,
            self.mode.as_str()
        )
    }
}

impl FromStr for Pane {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Pane::parse(s)
    }
}
