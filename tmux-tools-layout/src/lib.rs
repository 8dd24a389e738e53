//! Pane topology and window relocation for tmux.
//!
//! This crate models the panes of the current tmux window and moves them
//! around like a tiling window manager would:
//! - Parse pane records printed by tmux
//! - Cache the pane inventory until the layout changes
//! - Resolve the neighbor of a pane in each direction
//! - Find the pane furthest along an edge or in a corner
//! - Relocate the focused pane by joining, or by splitting at the edge and
//!   swapping
//!
//! ## Architecture
//!
//! - `commands.rs`: Command builders for the tmux CLI
//! - `runner.rs`: The command interface seam and the process-backed runner
//! - `client.rs`: `Tmux`, which owns the runner, socket options and cache
//! - `inventory.rs` / `neighbors.rs` / `furthest.rs`: Read-only queries
//! - `focus.rs`: Scoped focus changes
//! - `relocate.rs` / `navigate.rs` / `sessions.rs`: Operations built on them
//!
//! Everything is synchronous and single-threaded; each tmux command blocks
//! until it exits.

mod cache;
mod client;
mod commands;
mod error;
mod focus;
mod furthest;
mod inventory;
mod navigate;
mod neighbors;
pub mod parser;
mod relocate;
mod runner;
mod sessions;
mod types;

pub use cache::PaneCache;
pub use client::{DEFAULT_PLACEHOLDER_COMMAND, Tmux};
pub use commands::{Flag, TmuxCommand};
pub use error::{LayoutError, Result};
pub use navigate::FocusOutcome;
pub use relocate::MoveOutcome;
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
pub use sessions::SessionSummary;
pub use types::{
    BoundaryFlags, Corner, Direction, EdgeTarget, Neighbor, Neighbors, Pane, PaneId, PaneMode,
    Placement, SplitOrientation,
};
