//! Command-line interface for tmux-tools.
//!
//! The subcommands are meant to be bound to tmux keys, e.g.
//! `bind -n M-H run-shell "tmux-tools wm left"`.

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use tmux_tools_layout::{Direction, EdgeTarget};

/// tmux-tools - window management helpers for tmux
#[derive(Parser, Debug)]
#[command(name = "tmux-tools")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/tmux/tools/config.yaml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// tmux server socket path (passed as `tmux -S`)
    #[arg(short = 'S', long, value_name = "PATH", global = true)]
    pub socket_path: Option<PathBuf>,

    /// tmux server socket name (passed as `tmux -L`)
    #[arg(short = 'L', long, value_name = "NAME", global = true)]
    pub socket_name: Option<String>,

    /// Debug log level (overrides RUST_LOG and the config file)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Move the focused pane one step in a direction
    Wm {
        #[arg(value_enum)]
        direction: DirectionArg,
    },

    /// Focus the pane in a direction, or send M-h/j/k/l at the window edge
    FocusPane {
        #[arg(value_enum)]
        direction: DirectionArg,
    },

    /// Print the panes of the current window as JSON
    Panes,

    /// Print the ID of the first pane touching an edge or corner
    Furthest {
        /// left, right, top, bottom, top-left, top-right, bottom-left or bottom-right
        #[arg(value_parser = parse_edge_target)]
        target: EdgeTarget,
    },

    /// Kill every session with no attached client
    Clean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Left,
    Right,
    #[value(alias = "top")]
    Up,
    #[value(alias = "bottom")]
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Left => Direction::Left,
            DirectionArg::Right => Direction::Right,
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_edge_target(value: &str) -> Result<EdgeTarget, String> {
    value.parse()
}
