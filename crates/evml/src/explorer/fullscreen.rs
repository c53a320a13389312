//! Fullscreen facility of the host and the explorer's toggle state.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use log::trace;

use crate::{error::FullscreenError, workspace::PanelId};

/// Callback invoked with the new fullscreen element after every change.
pub type FullscreenListener = Box<dyn Fn(Option<PanelId>) + Send + Sync>;

/// Handle of a fullscreen-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wraps a raw host subscription handle.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw host subscription handle.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// The host's document-wide fullscreen facility.
pub trait FullscreenHost: Send + Sync {
    /// Returns the panel currently shown fullscreen, if any.
    fn fullscreen_element(&self) -> Option<PanelId>;

    /// Asks the host to show `panel` fullscreen.
    fn request_fullscreen(&self, panel: PanelId) -> Result<(), FullscreenError>;

    /// Asks the host to leave fullscreen.
    fn exit_fullscreen(&self) -> Result<(), FullscreenError>;

    /// Registers `listener` for fullscreen changes, by any means.
    fn subscribe(&self, listener: FullscreenListener) -> SubscriptionId;

    /// Removes a listener registered with [`FullscreenHost::subscribe`].
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Displayed state of an explorer's fullscreen toggle.
///
/// Clones share state so the subscription listener can update it.
#[derive(Debug, Clone)]
pub struct FullscreenToggle {
    panel: PanelId,
    active: Arc<AtomicBool>,
}

impl FullscreenToggle {
    /// Creates an inactive toggle for `panel`.
    pub fn new(panel: PanelId) -> Self {
        Self {
            panel,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns `true` while the panel is shown fullscreen.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Updates the state from the host's current fullscreen element.
    pub fn sync(&self, element: Option<PanelId>) {
        let active = element == Some(self.panel);
        let previous = self.active.swap(active, Ordering::Relaxed);
        if previous != active {
            trace!(panel:% = self.panel, active = active; "Fullscreen state changed");
        }
    }

    /// Returns a listener that keeps this toggle in sync.
    pub fn listener(&self) -> FullscreenListener {
        let toggle = self.clone();
        Box::new(move |element| toggle.sync(element))
    }
}
