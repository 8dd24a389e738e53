//! Shared integration test helpers for tmux-tools-layout.
//!
//! `FakeTmux` is a `CommandRunner` backed by a small geometric model of one
//! window. It answers the queries the crate issues (pane records, boundary
//! flags, `{left-of}` style targets) from pane rectangles and records every
//! command it receives. Split, join, swap and kill reflow the rectangles the
//! way tmux does, so a window that starts tiled stays tiled.
//!
//! Include it at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::FakeTmux;
//! ```

#![allow(dead_code)]

use std::io;
use tmux_tools_layout::{CommandOutput, CommandRunner, Direction, Flag, Tmux, TmuxCommand};

/// One pane rectangle. Panes are separated by one-cell borders, as in tmux.
#[derive(Debug, Clone)]
pub struct FakePane {
    pub id: String,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub cwd: String,
    pub mode: String,
}

impl FakePane {
    pub fn new(id: &str, x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            id: id.to_string(),
            x,
            y,
            width,
            height,
            cwd: "/home/user".to_string(),
            mode: String::new(),
        }
    }

    /// Start and length along x (`horizontal`) or y.
    fn span(&self, horizontal: bool) -> (usize, usize) {
        if horizontal {
            (self.x, self.width)
        } else {
            (self.y, self.height)
        }
    }

    fn set_span(&mut self, horizontal: bool, start: usize, len: usize) {
        if horizontal {
            self.x = start;
            self.width = len;
        } else {
            self.y = start;
            self.height = len;
        }
    }

    /// The pane plus the border cell after it on each axis.
    fn cell(&self) -> (usize, usize, usize, usize) {
        (self.x, self.y, self.x + self.width + 1, self.y + self.height + 1)
    }
}

pub type FailWhen = fn(&TmuxCommand) -> bool;

pub struct FakeTmux {
    pub width: usize,
    pub height: usize,
    /// Panes in pane-index order
    pub panes: Vec<FakePane>,
    pub focused: String,
    /// (name, attached clients)
    pub sessions: Vec<(String, usize)>,
    /// Every command received, in order
    pub calls: Vec<TmuxCommand>,
    /// Global options passed with the most recent command
    pub last_global: Vec<Flag>,
    /// Commands matching this predicate exit with status 1
    pub fail_when: Option<FailWhen>,
    /// Whether `split-window` focuses the new pane (tmux does)
    pub split_steals_focus: bool,
    next_id: usize,
}

impl FakeTmux {
    /// An empty window of `width` x `height` cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            panes: Vec::new(),
            focused: String::new(),
            sessions: Vec::new(),
            calls: Vec::new(),
            last_global: Vec::new(),
            fail_when: None,
            split_steals_focus: true,
            next_id: 0,
        }
    }

    /// Add a pane; the first pane added gets focus.
    pub fn with_pane(mut self, id: &str, x: usize, y: usize, width: usize, height: usize) -> Self {
        self.add_pane(id, x, y, width, height);
        self
    }

    /// Add a pane to a fake already owned by a client.
    pub fn add_pane(&mut self, id: &str, x: usize, y: usize, width: usize, height: usize) {
        let number: usize = id.trim_start_matches('%').parse().expect("pane ids look like %N");
        self.next_id = self.next_id.max(number + 1);
        if self.focused.is_empty() {
            self.focused = id.to_string();
        }
        self.panes.push(FakePane::new(id, x, y, width, height));
    }

    pub fn focus(mut self, id: &str) -> Self {
        self.focused = id.to_string();
        self
    }

    pub fn with_session(mut self, name: &str, attached: usize) -> Self {
        self.sessions.push((name.to_string(), attached));
        self
    }

    pub fn failing_when(mut self, predicate: FailWhen) -> Self {
        self.fail_when = Some(predicate);
        self
    }

    /// One pane filling an 80x24 window: `%0`.
    pub fn single() -> Self {
        Self::new(80, 24).with_pane("%0", 0, 0, 80, 24)
    }

    /// `%0 | %1`, focus on `%0`.
    pub fn side_by_side() -> Self {
        Self::new(80, 24)
            .with_pane("%0", 0, 0, 40, 24)
            .with_pane("%1", 41, 0, 39, 24)
    }

    /// `%0` over `%1` over `%2`, focus on `%0`.
    pub fn three_rows() -> Self {
        Self::new(80, 24)
            .with_pane("%0", 0, 0, 80, 7)
            .with_pane("%1", 0, 8, 80, 7)
            .with_pane("%2", 0, 16, 80, 8)
    }

    /// `%0` over `%1` on the left, `%2` filling the right, focus on `%0`.
    pub fn l_shape() -> Self {
        Self::new(80, 24)
            .with_pane("%0", 0, 0, 40, 11)
            .with_pane("%1", 0, 12, 40, 12)
            .with_pane("%2", 41, 0, 39, 24)
    }

    /// A client wrapping this fake.
    pub fn client(self) -> Tmux<FakeTmux> {
        Tmux::new(self)
    }

    // =========================================================================
    // Assertions helpers
    // =========================================================================

    /// Names of all received commands, in order.
    pub fn names(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.name()).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.name() == name).count()
    }

    /// Commands that changed the layout (split, join, swap, kill).
    pub fn layout_mutations(&self) -> Vec<&TmuxCommand> {
        self.calls.iter().filter(|c| c.alters_layout()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&TmuxCommand> {
        self.calls.iter().find(|c| c.name() == name)
    }

    pub fn last(&self) -> &TmuxCommand {
        self.calls.last().expect("no commands were run")
    }

    pub fn pane_ids(&self) -> Vec<&str> {
        self.panes.iter().map(|p| p.id.as_str()).collect()
    }

    /// `(x, y, width, height)` of the pane with `id`.
    pub fn rect(&self, id: &str) -> (usize, usize, usize, usize) {
        let pane = self.pane_by_id(id).expect("pane is in the window");
        (pane.x, pane.y, pane.width, pane.height)
    }

    /// Panic unless the panes tile the window exactly, borders included.
    pub fn assert_tiled(&self) {
        let area: usize = self
            .panes
            .iter()
            .map(|p| (p.width + 1) * (p.height + 1))
            .sum();
        assert_eq!(
            area,
            (self.width + 1) * (self.height + 1),
            "panes do not cover the window: {:?}",
            self.panes
        );
        for (i, a) in self.panes.iter().enumerate() {
            for b in &self.panes[i + 1..] {
                let (ax0, ay0, ax1, ay1) = a.cell();
                let (bx0, by0, bx1, by1) = b.cell();
                let overlap = ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1;
                assert!(!overlap, "{} overlaps {}: {:?}", a.id, b.id, self.panes);
            }
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn pane_by_id(&self, id: &str) -> Option<&FakePane> {
        self.panes.iter().find(|p| p.id == id)
    }

    fn at_edge(&self, pane: &FakePane, direction: Direction) -> bool {
        match direction {
            Direction::Left => pane.x == 0,
            Direction::Right => pane.x + pane.width == self.width,
            Direction::Up => pane.y == 0,
            Direction::Down => pane.y + pane.height == self.height,
        }
    }

    fn adjacent(&self, pane: &FakePane, direction: Direction) -> Option<&FakePane> {
        let overlaps_rows =
            |q: &FakePane| q.y < pane.y + pane.height && pane.y < q.y + q.height;
        let overlaps_cols = |q: &FakePane| q.x < pane.x + pane.width && pane.x < q.x + q.width;
        self.panes.iter().find(|q| {
            q.id != pane.id
                && match direction {
                    Direction::Left => q.x + q.width + 1 == pane.x && overlaps_rows(q),
                    Direction::Right => pane.x + pane.width + 1 == q.x && overlaps_rows(q),
                    Direction::Up => q.y + q.height + 1 == pane.y && overlaps_cols(q),
                    Direction::Down => pane.y + pane.height + 1 == q.y && overlaps_cols(q),
                }
        })
    }

    // =========================================================================
    // Layout changes
    // =========================================================================

    /// Shrink `members`, which fill `area`, along one axis to open a slot at
    /// the start (`before`) or end of `area`. Sizes scale proportionally;
    /// the slot gets half of `area`, like tmux without `-l`.
    fn make_room(
        &mut self,
        members: &[usize],
        area: &FakePane,
        horizontal: bool,
        before: bool,
    ) -> Result<FakePane, String> {
        let (start, len) = area.span(horizontal);
        if len < 3 {
            return Err("create pane failed: pane too small".to_string());
        }
        let slot_len = (len - 1) / 2;
        let kept_len = len - slot_len - 1;
        let kept_start = if before { start + slot_len + 1 } else { start };
        // Maps a cell boundary in 0..=len+1 onto 0..=kept_len+1
        let scale = |c: usize| (c * (kept_len + 1) + (len + 1) / 2) / (len + 1);

        let mut resized = Vec::new();
        for &index in members {
            let (p, q) = self.panes[index].span(horizontal);
            let (from, to) = (scale(p - start), scale(p - start + q + 1));
            if to < from + 2 {
                return Err("create pane failed: pane too small".to_string());
            }
            resized.push((index, kept_start + from, to - from - 1));
        }
        for (index, p, q) in resized {
            self.panes[index].set_span(horizontal, p, q);
        }

        let mut slot = FakePane::new("", area.x, area.y, area.width, area.height);
        let slot_start = if before { start } else { start + kept_len + 1 };
        slot.set_span(horizontal, slot_start, slot_len);
        Ok(slot)
    }

    /// Remove the pane at `index` and give its cell to the panes that share
    /// one whole edge with it, trying left, up, right, then down.
    fn remove_and_reflow(&mut self, index: usize) -> FakePane {
        let gone = self.panes.remove(index);
        if self.panes.is_empty() {
            return gone;
        }

        for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            let grow_x = matches!(direction, Direction::Left | Direction::Right);
            let (edge_start, edge_len) = gone.span(!grow_x);
            let mut sharing: Vec<usize> = (0..self.panes.len())
                .filter(|&i| {
                    let p = &self.panes[i];
                    let touches = match direction {
                        Direction::Left => p.x + p.width + 1 == gone.x,
                        Direction::Right => gone.x + gone.width + 1 == p.x,
                        Direction::Up => p.y + p.height + 1 == gone.y,
                        Direction::Down => gone.y + gone.height + 1 == p.y,
                    };
                    let (s, l) = p.span(!grow_x);
                    touches && s >= edge_start && s + l <= edge_start + edge_len
                })
                .collect();
            sharing.sort_by_key(|&i| self.panes[i].span(!grow_x).0);

            let mut next = edge_start;
            for &i in &sharing {
                let (s, l) = self.panes[i].span(!grow_x);
                if s != next {
                    break;
                }
                next = s + l + 1;
            }
            if sharing.is_empty() || next != edge_start + edge_len + 1 {
                continue;
            }

            let (gone_start, gone_len) = gone.span(grow_x);
            for &i in &sharing {
                let (s, l) = self.panes[i].span(grow_x);
                let start = match direction {
                    Direction::Left | Direction::Up => s,
                    Direction::Right | Direction::Down => gone_start,
                };
                self.panes[i].set_span(grow_x, start, l + gone_len + 1);
            }
            return gone;
        }
        panic!("FakeTmux cannot reflow the space left by {}: {:?}", gone.id, self.panes);
    }

    fn variable(&self, pane: &FakePane, name: &str) -> String {
        let index = self
            .panes
            .iter()
            .position(|p| p.id == pane.id)
            .expect("pane is in the window");
        let number = pane.id.trim_start_matches('%');
        let flag = |on: bool| if on { "1" } else { "0" }.to_string();
        match name {
            "pane_id" => pane.id.clone(),
            "pane_tty" => format!("/dev/pts/{number}"),
            "pane_pid" => format!("{}", 1000 + index),
            "pane_index" => index.to_string(),
            "pane_width" => pane.width.to_string(),
            "pane_height" => pane.height.to_string(),
            "pane_active" => flag(pane.id == self.focused),
            "pane_current_path" => pane.cwd.clone(),
            "pane_mode" => pane.mode.clone(),
            "pane_at_left" => flag(self.at_edge(pane, Direction::Left)),
            "pane_at_right" => flag(self.at_edge(pane, Direction::Right)),
            "pane_at_top" => flag(self.at_edge(pane, Direction::Up)),
            "pane_at_bottom" => flag(self.at_edge(pane, Direction::Down)),
            other => panic!("FakeTmux does not know #{{{other}}}"),
        }
    }

    /// Expand `#{...}` variables; with no pane every variable is empty.
    fn expand(&self, format: &str, pane: Option<&FakePane>) -> String {
        let mut out = String::new();
        let mut rest = format;
        while let Some(start) = rest.find("#{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find('}').expect("unterminated format variable");
            if let Some(pane) = pane {
                out.push_str(&self.variable(pane, &after[..end]));
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        out
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn display(&self, command: &TmuxCommand) -> CommandOutput {
        let format = command.flag_value("-F").unwrap_or("");
        let focused = self.pane_by_id(&self.focused).expect("focused pane exists");
        match command.flag_value("-t") {
            None => CommandOutput::ok(self.expand(format, Some(focused))),
            Some(target) if target.starts_with('{') => {
                let direction = match target {
                    "{left-of}" => Direction::Left,
                    "{right-of}" => Direction::Right,
                    "{up-of}" => Direction::Up,
                    "{down-of}" => Direction::Down,
                    other => panic!("FakeTmux does not know target {other}"),
                };
                CommandOutput::ok(self.expand(format, self.adjacent(focused, direction)))
            }
            Some(id) => match self.pane_by_id(id) {
                Some(pane) => CommandOutput::ok(self.expand(format, Some(pane))),
                None => CommandOutput::failed(1, format!("can't find pane: {id}")),
            },
        }
    }

    fn split(&mut self, command: &TmuxCommand) -> CommandOutput {
        let target = command.flag_value("-t").unwrap_or_default();
        let Some(target_index) = self.panes.iter().position(|p| p.id == target) else {
            return CommandOutput::failed(1, format!("can't find pane: {target}"));
        };

        let horizontal = command.has_flag("-h");
        let before = command.has_flag("-b");
        let (members, area): (Vec<usize>, FakePane) = if command.has_flag("-f") {
            (
                (0..self.panes.len()).collect(),
                FakePane::new("", 0, 0, self.width, self.height),
            )
        } else {
            (vec![target_index], self.panes[target_index].clone())
        };
        let slot = match self.make_room(&members, &area, horizontal, before) {
            Ok(slot) => slot,
            Err(message) => return CommandOutput::failed(1, message),
        };

        let id = format!("%{}", self.next_id);
        self.next_id += 1;
        let at = if before { target_index } else { target_index + 1 };
        self.panes.insert(at, FakePane { id: id.clone(), ..slot });
        if self.split_steals_focus {
            self.focused = id.clone();
        }

        let printed = if command.has_flag("-P") {
            self.expand(command.flag_value("-F").unwrap_or("#{pane_id}"), Some(&self.panes[at]))
        } else {
            String::new()
        };
        CommandOutput::ok(printed)
    }

    fn swap(&mut self, command: &TmuxCommand) -> CommandOutput {
        let source = command.flag_value("-s").unwrap_or_default();
        let target = command.flag_value("-t").unwrap_or_default();
        let a = self.panes.iter().position(|p| p.id == source);
        let b = self.panes.iter().position(|p| p.id == target);
        let (Some(a), Some(b)) = (a, b) else {
            return CommandOutput::failed(1, "can't find pane");
        };
        let (ax, ay, aw, ah) = {
            let p = &self.panes[a];
            (p.x, p.y, p.width, p.height)
        };
        let (bx, by, bw, bh) = {
            let p = &self.panes[b];
            (p.x, p.y, p.width, p.height)
        };
        {
            let p = &mut self.panes[a];
            (p.x, p.y, p.width, p.height) = (bx, by, bw, bh);
        }
        {
            let p = &mut self.panes[b];
            (p.x, p.y, p.width, p.height) = (ax, ay, aw, ah);
        }
        self.panes.swap(a, b);
        CommandOutput::ok("")
    }

    fn kill(&mut self, command: &TmuxCommand) -> CommandOutput {
        let target = command.flag_value("-t").unwrap_or_default();
        let Some(index) = self.panes.iter().position(|p| p.id == target) else {
            return CommandOutput::failed(1, format!("can't find pane: {target}"));
        };
        self.remove_and_reflow(index);
        if self.focused == target {
            self.focused = self.panes.first().map(|p| p.id.clone()).unwrap_or_default();
        }
        CommandOutput::ok("")
    }

    fn select(&mut self, command: &TmuxCommand) -> CommandOutput {
        let target = command.flag_value("-t").unwrap_or_default();
        if self.pane_by_id(target).is_none() {
            return CommandOutput::failed(1, format!("can't find pane: {target}"));
        }
        self.focused = target.to_string();
        CommandOutput::ok("")
    }

    /// Move the source pane out of its cell and split the target in half
    /// for it, source after target unless `-b`. The source becomes active.
    fn join(&mut self, command: &TmuxCommand) -> CommandOutput {
        let source = command.flag_value("-s").unwrap_or_default().to_string();
        let target = command.flag_value("-t").unwrap_or_default().to_string();
        let Some(source_index) = self.panes.iter().position(|p| p.id == source) else {
            return CommandOutput::failed(1, "can't find pane");
        };
        if source == target || self.pane_by_id(&target).is_none() {
            return CommandOutput::failed(1, "can't find pane");
        }

        let moved = self.remove_and_reflow(source_index);
        let target_index = self
            .panes
            .iter()
            .position(|p| p.id == target)
            .expect("target survives the reflow");
        let area = self.panes[target_index].clone();
        let before = command.has_flag("-b");
        let slot = match self.make_room(&[target_index], &area, command.has_flag("-h"), before) {
            Ok(slot) => slot,
            Err(message) => return CommandOutput::failed(1, message),
        };

        let at = if before { target_index } else { target_index + 1 };
        self.panes.insert(
            at,
            FakePane {
                x: slot.x,
                y: slot.y,
                width: slot.width,
                height: slot.height,
                ..moved
            },
        );
        self.focused = source;
        CommandOutput::ok("")
    }

    fn list_sessions(&self) -> CommandOutput {
        if self.sessions.is_empty() {
            return CommandOutput::failed(1, "no server running on /tmp/tmux-1000/default");
        }
        let lines: Vec<String> = self
            .sessions
            .iter()
            .map(|(name, attached)| format!("{name},{attached}"))
            .collect();
        CommandOutput::ok(lines.join("\n"))
    }

    fn kill_session(&mut self, command: &TmuxCommand) -> CommandOutput {
        let target = command.flag_value("-t").unwrap_or_default();
        let before = self.sessions.len();
        self.sessions.retain(|(name, _)| name != target);
        if self.sessions.len() == before {
            return CommandOutput::failed(1, format!("can't find session: {target}"));
        }
        CommandOutput::ok("")
    }
}

impl CommandRunner for FakeTmux {
    fn run(&mut self, global: &[Flag], command: &TmuxCommand) -> io::Result<CommandOutput> {
        self.calls.push(command.clone());
        self.last_global = global.to_vec();

        if let Some(fail) = self.fail_when
            && fail(command)
        {
            return Ok(CommandOutput::failed(1, format!("{} refused", command.name())));
        }

        let output = match command.name() {
            "list-panes" => {
                let format = command.flag_value("-F").unwrap_or("");
                let lines: Vec<String> = self
                    .panes
                    .iter()
                    .map(|p| self.expand(format, Some(p)))
                    .collect();
                CommandOutput::ok(lines.join("\n"))
            }
            "display-message" => self.display(command),
            "select-pane" => self.select(command),
            "split-window" => self.split(command),
            "join-pane" => self.join(command),
            "swap-pane" => self.swap(command),
            "kill-pane" => self.kill(command),
            "send-keys" => CommandOutput::ok(""),
            "list-sessions" => self.list_sessions(),
            "kill-session" => self.kill_session(command),
            other => CommandOutput::failed(1, format!("unknown command: {other}")),
        };
        Ok(output)
    }
}
