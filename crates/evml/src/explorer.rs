//! The full-panel explorer surface.
//!
//! An [`ExplorerSurface`] shows one model in a panel with a toolbar and a
//! viewport region. The viewport region owns a [`Viewport`] controller and
//! translates pointer and wheel input into zoom and pan changes, which are
//! re-applied to the mounted diagram after every change.

mod fullscreen;
mod toolbar;

pub use fullscreen::{FullscreenHost, FullscreenListener, FullscreenToggle, SubscriptionId};
pub use toolbar::{ToolbarAction, ToolbarButton};

use std::sync::Arc;

use log::{debug, trace};

use evml_core::viewport::{PointerId, Viewport, ViewportState};

use crate::{
    error::FullscreenError,
    host::{Container, DiagramHost},
    workspace::PanelId,
};

/// Panel display text.
pub const DISPLAY_TEXT: &str = "Event Model Explorer";

/// Panel icon.
pub const ICON: &str = "maximize";

/// Text shown while no model is selected.
pub const PLACEHOLDER: &str = "Select an Event Model to explore.";

/// Class of the viewport region.
pub const VIEWPORT_CLASS: &str = "evml-explorer-viewport";

/// Class added to the viewport region during a pan gesture.
pub const PANNING_CLASS: &str = "evml-explorer-viewport--panning";

/// A pointer event on the viewport region, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Pointer that produced the event.
    pub pointer: PointerId,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl PointerInput {
    /// Creates an event for `pointer` at (`x`, `y`).
    pub fn new(pointer: PointerId, x: f64, y: f64) -> Self {
        Self { pointer, x, y }
    }
}

/// Explorer panel content.
pub struct ExplorerSurface<M> {
    panel: PanelId,
    host: DiagramHost<M>,
    fullscreen_host: Arc<dyn FullscreenHost>,
    fullscreen: FullscreenToggle,
    subscription: Option<SubscriptionId>,
    viewport: Viewport,
    region: Container,
    model: Option<Arc<M>>,
}

impl<M> ExplorerSurface<M> {
    /// Creates a closed surface for `panel` showing the placeholder.
    pub fn new(
        panel: PanelId,
        host: DiagramHost<M>,
        fullscreen_host: Arc<dyn FullscreenHost>,
    ) -> Self {
        let mut region = Container::with_class(VIEWPORT_CLASS);
        region.show_placeholder(PLACEHOLDER);

        Self {
            panel,
            host,
            fullscreen_host,
            fullscreen: FullscreenToggle::new(panel),
            subscription: None,
            viewport: Viewport::new(),
            region,
            model: None,
        }
    }

    /// Returns the panel this surface lives in.
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    /// Returns the viewport region.
    pub fn region(&self) -> &Container {
        &self.region
    }

    /// Returns the current viewport state.
    pub fn viewport(&self) -> &ViewportState {
        self.viewport.state()
    }

    /// Returns the shown model, if any.
    pub fn model(&self) -> Option<&Arc<M>> {
        self.model.as_ref()
    }

    /// Returns `true` while a fullscreen-change subscription is held.
    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    /// Returns `true` while the panel is shown fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_active()
    }

    /// Returns the toolbar buttons for the current state.
    pub fn toolbar(&self) -> Vec<ToolbarButton> {
        toolbar::buttons(self.is_fullscreen())
    }

    /// Subscribes to fullscreen changes and renders the current content.
    ///
    /// Opening an already open surface only re-renders.
    pub fn open(&mut self) {
        if self.subscription.is_none() {
            self.fullscreen.sync(self.fullscreen_host.fullscreen_element());
            let id = self.fullscreen_host.subscribe(self.fullscreen.listener());
            self.subscription = Some(id);
            debug!(panel:% = self.panel; "Explorer opened");
        }

        self.render_diagram();
    }

    /// Releases the fullscreen subscription and clears the viewport region.
    ///
    /// A pan gesture in progress is abandoned.
    pub fn close(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.fullscreen_host.unsubscribe(id);
            debug!(panel:% = self.panel; "Explorer closed");
        }

        self.viewport.cancel_pan();
        self.region.remove_class(PANNING_CLASS);
        self.region.empty();
    }

    /// Shows `model` with a fresh viewport.
    pub fn set_model(&mut self, model: Arc<M>) {
        self.model = Some(model);
        self.viewport.reset();
        self.region.remove_class(PANNING_CLASS);
        self.render_diagram();
    }

    /// Mounts the current model, or shows the placeholder without one.
    pub fn render_diagram(&mut self) {
        let Some(model) = &self.model else {
            self.region.show_placeholder(PLACEHOLDER);
            return;
        };

        if self.host.mount(model, &mut self.region).is_some() {
            self.apply_transform();
        }
    }

    /// Runs a toolbar action.
    ///
    /// Only the fullscreen toggle can fail; its error is returned unhandled.
    pub fn activate(&mut self, action: ToolbarAction) -> Result<(), FullscreenError> {
        trace!(action:% = action; "Toolbar action");

        let changed = match action {
            ToolbarAction::ZoomOut => self.viewport.zoom_out(),
            ToolbarAction::ZoomIn => self.viewport.zoom_in(),
            ToolbarAction::Reset => {
                self.region.remove_class(PANNING_CLASS);
                self.viewport.reset()
            }
            ToolbarAction::ToggleFullscreen => return self.toggle_fullscreen(),
        };

        if changed {
            self.apply_transform();
        }
        Ok(())
    }

    /// Leaves fullscreen if this panel is fullscreen, otherwise shows this
    /// panel fullscreen.
    ///
    /// The toggle's displayed state follows the host's change notification,
    /// not this call.
    pub fn toggle_fullscreen(&mut self) -> Result<(), FullscreenError> {
        if self.fullscreen_host.fullscreen_element() == Some(self.panel) {
            self.fullscreen_host.exit_fullscreen()
        } else {
            self.fullscreen_host.request_fullscreen(self.panel)
        }
    }

    /// Handles a pointer press. Returns `true` if the host should capture
    /// the pointer.
    pub fn pointer_down(&mut self, input: PointerInput) -> bool {
        if self.region.diagram().is_none() {
            return false;
        }

        let started = self.viewport.begin_pan(input.pointer, input.x, input.y);
        if started {
            self.region.add_class(PANNING_CLASS);
        }
        started
    }

    /// Handles pointer movement. Returns `true` if the diagram moved.
    pub fn pointer_move(&mut self, input: PointerInput) -> bool {
        if self.region.diagram().is_none() {
            return false;
        }

        let moved = self.viewport.continue_pan(input.pointer, input.x, input.y);
        if moved {
            self.apply_transform();
        }
        moved
    }

    /// Handles a pointer release. Returns `true` if the host should release
    /// its capture of the pointer.
    pub fn pointer_up(&mut self, input: PointerInput) -> bool {
        self.finish_pan(input.pointer)
    }

    /// Handles a cancelled pointer. Same as [`ExplorerSurface::pointer_up`].
    pub fn pointer_cancel(&mut self, input: PointerInput) -> bool {
        self.finish_pan(input.pointer)
    }

    /// Handles wheel input. Returns `true` if the event was consumed and the
    /// host should suppress its default scrolling.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        if self.region.diagram().is_none() {
            return false;
        }

        if self.viewport.zoom_for_wheel(delta_y) {
            self.apply_transform();
        }
        true
    }

    fn finish_pan(&mut self, pointer: PointerId) -> bool {
        let ended = self.viewport.end_pan(pointer);
        if ended {
            self.region.remove_class(PANNING_CLASS);
        }
        ended
    }

    fn apply_transform(&mut self) {
        DiagramHost::<M>::apply_transform(&mut self.region, self.viewport.transform());
    }
}

impl<M> Drop for ExplorerSurface<M> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.fullscreen_host.unsubscribe(id);
        }
    }
}
