//! Context menu of rendered diagram blocks.

use std::fmt;

/// Identifier of a rendered diagram block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// An action offered for a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramAction {
    /// Open the block's model in the explorer.
    Explore,
    /// Save the block's source.
    SaveSource,
    /// Save the block's rendering.
    SaveRendering,
}

impl DiagramAction {
    /// All actions, in menu order.
    pub const ALL: [DiagramAction; 3] = [Self::Explore, Self::SaveSource, Self::SaveRendering];

    /// Returns the menu title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Explore => "Explore event model",
            Self::SaveSource => "Save as Event Model",
            Self::SaveRendering => "Save as SVG",
        }
    }

    /// Returns the menu icon.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Explore => "maximize",
            Self::SaveSource => "save",
            Self::SaveRendering => "image",
        }
    }
}

impl fmt::Display for DiagramAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A context menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    block: BlockId,
    action: DiagramAction,
}

impl MenuItem {
    /// Returns the block this item acts on.
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Returns the action to run when the item is chosen.
    pub fn action(&self) -> DiagramAction {
        self.action
    }

    /// Returns the title of the item's action.
    pub fn title(&self) -> &'static str {
        self.action.title()
    }

    /// Returns the icon of the item's action.
    pub fn icon(&self) -> &'static str {
        self.action.icon()
    }
}

/// The menu shown for a rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    items: Vec<MenuItem>,
}

impl ContextMenu {
    /// Builds the menu for `block`: explore, save source and save rendering.
    pub fn for_block(block: BlockId) -> Self {
        let items = DiagramAction::ALL
            .into_iter()
            .map(|action| MenuItem { block, action })
            .collect();
        Self { items }
    }

    /// Returns the entries in display order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}
