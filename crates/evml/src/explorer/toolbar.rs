//! Explorer toolbar buttons.

use std::fmt;

/// An action bound to a toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Zoom out one step.
    ZoomOut,
    /// Zoom in one step.
    ZoomIn,
    /// Restore the initial zoom and pan.
    Reset,
    /// Enter or leave fullscreen.
    ToggleFullscreen,
}

impl ToolbarAction {
    /// All actions, in toolbar order.
    pub const ALL: [ToolbarAction; 4] = [
        Self::ZoomOut,
        Self::ZoomIn,
        Self::Reset,
        Self::ToggleFullscreen,
    ];

    /// Returns the accessible label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ZoomOut => "Zoom out",
            Self::ZoomIn => "Zoom in",
            Self::Reset => "Reset view",
            Self::ToggleFullscreen => "Toggle fullscreen",
        }
    }

    /// Returns the icon, which for the fullscreen toggle depends on `fullscreen`.
    pub fn icon(self, fullscreen: bool) -> &'static str {
        match self {
            Self::ZoomOut => "zoom-out",
            Self::ZoomIn => "zoom-in",
            Self::Reset => "rotate-ccw",
            Self::ToggleFullscreen if fullscreen => "minimize",
            Self::ToggleFullscreen => "maximize",
        }
    }
}

impl fmt::Display for ToolbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rendered toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    action: ToolbarAction,
    icon: &'static str,
    pressed: Option<bool>,
}

impl ToolbarButton {
    fn new(action: ToolbarAction, fullscreen: bool) -> Self {
        let pressed = (action == ToolbarAction::ToggleFullscreen).then_some(fullscreen);
        Self {
            action,
            icon: action.icon(fullscreen),
            pressed,
        }
    }

    /// Returns the bound action.
    pub fn action(&self) -> ToolbarAction {
        self.action
    }

    /// Returns the icon name.
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// Returns the accessible label.
    pub fn label(&self) -> &'static str {
        self.action.label()
    }

    /// Returns the `aria-pressed` value for toggle buttons.
    pub fn aria_pressed(&self) -> Option<&'static str> {
        self.pressed
            .map(|pressed| if pressed { "true" } else { "false" })
    }
}

/// Builds the four toolbar buttons in order.
pub fn buttons(fullscreen: bool) -> Vec<ToolbarButton> {
    ToolbarAction::ALL
        .into_iter()
        .map(|action| ToolbarButton::new(action, fullscreen))
        .collect()
}
