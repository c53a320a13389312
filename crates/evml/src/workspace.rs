//! Host workspace contract for explorer panels.

use std::fmt;

/// View type tag of explorer panels.
pub const VIEW_TYPE: &str = "evml-explorer";

/// Identifier of a panel in the host workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(u64);

impl PanelId {
    /// Wraps a raw host panel identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw host panel identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// The host's panel management.
pub trait Workspace: Send + Sync {
    /// Returns the currently open panels of `view_type`, in the host's order.
    fn panels_of_type(&self, view_type: &str) -> Vec<PanelId>;

    /// Opens a new active panel of `view_type`.
    fn create_panel(&self, view_type: &str) -> PanelId;

    /// Makes `panel` the active, focused panel.
    fn reveal_panel(&self, panel: PanelId);

    /// Closes `panel`.
    fn detach_panel(&self, panel: PanelId);
}
