//! Snapshot of the panes in the current window.
//!
//! Populated by the first inventory query and served verbatim afterwards.
//! Any command that changes the layout must [`PaneCache::invalidate`] it,
//! otherwise neighbor resolution runs against a layout that no longer
//! exists. [`crate::Tmux`] does this automatically for layout mutations.
//!
//! Not synchronized: the owning client is used from one thread.

use crate::types::Pane;

#[derive(Debug, Clone, Default)]
pub struct PaneCache {
    panes: Vec<Pane>,
    enabled: bool,
}

impl PaneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached panes, or `None` if the cache is not populated.
    pub fn get(&self) -> Option<&[Pane]> {
        self.enabled.then_some(self.panes.as_slice())
    }

    /// Replace the snapshot and enable the cache.
    pub fn store(&mut self, panes: Vec<Pane>) {
        self.panes = panes;
        self.enabled = true;
    }

    /// Drop the snapshot; the next inventory query goes to tmux.
    pub fn invalidate(&mut self) {
        if self.enabled {
            log::trace!("pane cache invalidated ({} panes dropped)", self.panes.len());
        }
        self.panes.clear();
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
