//! Core types for pane topology
//!
//! These types mirror what tmux reports about the panes of a window and the
//! directional vocabulary used to move between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// tmux pane ID (e.g., %0, %1)
pub type PaneId = String;

/// Interaction mode a pane is currently in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaneMode {
    /// No mode active (`#{pane_mode}` is empty)
    #[default]
    Normal,
    /// `copy-mode`
    Copy,
    /// `view-mode` (output of a command shown in a pane)
    View,
    /// Any other mode name tmux reports
    Other(String),
}

impl PaneMode {
    /// Map a `#{pane_mode}` value onto a mode.
    pub fn from_tmux(value: &str) -> Self {
        match value {
            "" => PaneMode::Normal,
            "copy-mode" => PaneMode::Copy,
            "view-mode" => PaneMode::View,
            other => PaneMode::Other(other.to_string()),
        }
    }

    /// The value tmux uses for this mode.
    pub fn as_str(&self) -> &str {
        match self {
            PaneMode::Normal => "",
            PaneMode::Copy => "copy-mode",
            PaneMode::View => "view-mode",
            PaneMode::Other(name) => name,
        }
    }
}

impl From<String> for PaneMode {
    fn from(value: String) -> Self {
        PaneMode::from_tmux(&value)
    }
}

impl From<PaneMode> for String {
    fn from(mode: PaneMode) -> Self {
        mode.as_str().to_string()
    }
}

/// A tmux pane as reported by `list-panes` / `display-message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pane {
    /// Pane ID (e.g., %0)
    pub id: PaneId,
    /// Terminal device path (e.g., /dev/pts/3)
    pub tty: String,
    /// PID of the process started in the pane
    pub pid: u32,
    /// Position within the window (`#{pane_index}`)
    pub index: usize,
    /// Pane width in cells
    pub width: usize,
    /// Pane height in cells
    pub height: usize,
    /// Whether this is the focused pane of its window
    pub active: bool,
    /// Current working directory
    pub cwd: String,
    /// Current interaction mode
    pub mode: PaneMode,
}

impl Pane {
    /// Whether the pane is in copy mode.
    pub fn in_copy_mode(&self) -> bool {
        self.mode == PaneMode::Copy
    }
}

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order tmux lists boundary flags.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Edge name used by the `#{pane_at_*}` format variables.
    pub fn edge_name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "top",
            Direction::Down => "bottom",
        }
    }

    /// Target specifier for the pane adjacent to the focused pane.
    pub fn relative_target(self) -> &'static str {
        match self {
            Direction::Left => "{left-of}",
            Direction::Right => "{right-of}",
            Direction::Up => "{up-of}",
            Direction::Down => "{down-of}",
        }
    }

    /// The two directions orthogonal to this one.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
        }
    }

    /// Split used when joining into an existing neighbor.
    ///
    /// The moved pane lands beside the neighbor, across the axis of travel.
    pub fn join_orientation(self) -> SplitOrientation {
        match self {
            Direction::Up | Direction::Down => SplitOrientation::Horizontal,
            Direction::Left | Direction::Right => SplitOrientation::Vertical,
        }
    }

    /// Split used to open a new slot along the window edge in this direction.
    pub fn boundary_split(self) -> (SplitOrientation, Placement) {
        match self {
            Direction::Up => (SplitOrientation::Vertical, Placement::Before),
            Direction::Down => (SplitOrientation::Vertical, Placement::After),
            Direction::Left => (SplitOrientation::Horizontal, Placement::Before),
            Direction::Right => (SplitOrientation::Horizontal, Placement::After),
        }
    }

    /// Corner retried when the plain edge scan finds nothing.
    pub fn fallback_corner(self) -> Corner {
        match self {
            Direction::Left | Direction::Up => Corner::TopLeft,
            Direction::Right => Corner::TopRight,
            Direction::Down => Corner::BottomLeft,
        }
    }

    /// vim motion key for this direction (h/j/k/l).
    pub fn vim_key(self) -> char {
        match self {
            Direction::Left => 'h',
            Direction::Down => 'j',
            Direction::Up => 'k',
            Direction::Right => 'l',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" | "top" => Ok(Direction::Up),
            "down" | "bottom" => Ok(Direction::Down),
            other => Err(format!(
                "unknown direction '{other}' (expected left, right, up or down)"
            )),
        }
    }
}

/// A corner of the window, i.e. two edges at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// The two edges that meet at this corner (top or bottom first).
    pub fn edges(self) -> [Direction; 2] {
        match self {
            Corner::TopLeft => [Direction::Up, Direction::Left],
            Corner::TopRight => [Direction::Up, Direction::Right],
            Corner::BottomLeft => [Direction::Down, Direction::Left],
            Corner::BottomRight => [Direction::Down, Direction::Right],
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [vertical, horizontal] = self.edges();
        write!(f, "{}-{}", vertical.edge_name(), horizontal.edge_name())
    }
}

/// What the furthest-pane locator scans for: one edge or a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeTarget {
    Edge(Direction),
    Corner(Corner),
}

impl EdgeTarget {
    /// Edges a pane must touch to match this target.
    pub fn edges(self) -> Vec<Direction> {
        match self {
            EdgeTarget::Edge(direction) => vec![direction],
            EdgeTarget::Corner(corner) => corner.edges().to_vec(),
        }
    }

    /// Format string printing one `0`/`1` boundary flag per edge.
    pub fn boundary_format(self) -> String {
        self.edges()
            .iter()
            .map(|edge| format!("#{{pane_at_{}}}", edge.edge_name()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<Direction> for EdgeTarget {
    fn from(direction: Direction) -> Self {
        EdgeTarget::Edge(direction)
    }
}

impl From<Corner> for EdgeTarget {
    fn from(corner: Corner) -> Self {
        EdgeTarget::Corner(corner)
    }
}

impl fmt::Display for EdgeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeTarget::Edge(direction) => f.write_str(direction.edge_name()),
            EdgeTarget::Corner(corner) => corner.fmt(f),
        }
    }
}

impl FromStr for EdgeTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let corner = match normalized.as_str() {
            "top-left" => Some(Corner::TopLeft),
            "top-right" => Some(Corner::TopRight),
            "bottom-left" => Some(Corner::BottomLeft),
            "bottom-right" => Some(Corner::BottomRight),
            _ => None,
        };
        if let Some(corner) = corner {
            return Ok(EdgeTarget::Corner(corner));
        }
        normalized.parse::<Direction>().map(EdgeTarget::Edge).map_err(|_| {
            format!(
                "unknown edge '{normalized}' (expected left, right, top, bottom, \
                 top-left, top-right, bottom-left or bottom-right)"
            )
        })
    }
}

/// Axis of a split, named after the tmux flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOrientation {
    /// `-h`: panes side by side
    Horizontal,
    /// `-v`: panes stacked
    Vertical,
}

impl SplitOrientation {
    pub fn flag(self) -> &'static str {
        match self {
            SplitOrientation::Horizontal => "-h",
            SplitOrientation::Vertical => "-v",
        }
    }
}

/// Where a split places the new pane relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// `-b`: left of / above the target
    Before,
    /// right of / below the target (tmux default)
    After,
}

/// Which window edges a pane touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryFlags {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl BoundaryFlags {
    /// Whether the pane sits on the window edge in `direction`.
    pub fn at(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.top,
            Direction::Down => self.bottom,
        }
    }
}

/// The pane across one edge of another pane, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub direction: Direction,
    pub pane: Option<Pane>,
}

impl Neighbor {
    pub fn exists(&self) -> bool {
        self.pane.is_some()
    }
}

/// Neighbors of a pane in all four directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbors {
    pub left: Neighbor,
    pub right: Neighbor,
    pub up: Neighbor,
    pub down: Neighbor,
}

impl Neighbors {
    /// Neighbors with no pane in any direction.
    pub fn none() -> Self {
        Self {
            left: Neighbor {
                direction: Direction::Left,
                pane: None,
            },
            right: Neighbor {
                direction: Direction::Right,
                pane: None,
            },
            up: Neighbor {
                direction: Direction::Up,
                pane: None,
            },
            down: Neighbor {
                direction: Direction::Down,
                pane: None,
            },
        }
    }

    pub fn get(&self, direction: Direction) -> &Neighbor {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }

    pub fn set(&mut self, direction: Direction, pane: Option<Pane>) {
        let slot = match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        slot.pane = pane;
    }

    /// Whether a pane exists across the edge in `direction`.
    pub fn exists(&self, direction: Direction) -> bool {
        self.get(direction).exists()
    }
}
