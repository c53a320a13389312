//! Mounting rendered diagrams into host containers.
//!
//! A [`Container`] is the host-side element a diagram is shown in. It holds
//! exactly one kind of content at a time: nothing, a placeholder, a mounted
//! diagram, or error text. The [`DiagramHost`] asks the external
//! [`DiagramRenderer`] for a root element, mounts it, and later re-applies
//! viewport transforms to it without touching anything else in the subtree.

use std::sync::{Arc, Mutex};

use log::debug;
use svg::{Node, node::element::Element};

use evml_core::viewport::{TRANSFORM_ORIGIN, ViewportTransform};

/// Class added to every mounted diagram root.
pub const DIAGRAM_ROOT_CLASS: &str = "evml-diagram-root";

/// A container shared between the host and in-flight renders.
///
/// Renders only hold a weak reference while they wait for the pipeline, so
/// a container the host has already dropped is not kept alive by them.
pub type SharedContainer = Arc<Mutex<Container>>;

/// External renderer turning a model into a drawable root element.
pub trait DiagramRenderer<M>: Send + Sync {
    /// Renders `model`. Returns `None` if there is nothing to draw.
    fn render(&self, model: &M) -> Option<Element>;
}

/// A diagram root adopted by a [`Container`].
#[derive(Debug, Clone)]
pub struct MountedDiagram {
    root: Element,
    base_style: Option<String>,
    transform: Option<ViewportTransform>,
}

impl MountedDiagram {
    fn adopt(mut root: Element) -> Self {
        let base_style = attribute(&root, "style");

        let class = match attribute(&root, "class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{existing} {DIAGRAM_ROOT_CLASS}")
            }
            _ => DIAGRAM_ROOT_CLASS.to_string(),
        };
        root.assign("class", class);

        let mut diagram = Self {
            root,
            base_style,
            transform: None,
        };
        diagram.write_style();
        diagram
    }

    /// Returns the mounted root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the transform last applied, if any.
    pub fn transform(&self) -> Option<ViewportTransform> {
        self.transform
    }

    fn apply(&mut self, transform: ViewportTransform) {
        self.transform = Some(transform);
        self.write_style();
    }

    fn write_style(&mut self) {
        let mut style = match &self.base_style {
            Some(base) => format!("{}; ", base.trim_end().trim_end_matches(';')),
            None => String::new(),
        };
        style.push_str(&format!("transform-origin: {TRANSFORM_ORIGIN}"));
        if let Some(transform) = self.transform {
            style.push_str(&format!("; transform: {transform}"));
        }

        self.root.assign("style", style);
    }
}

fn attribute(element: &Element, name: &str) -> Option<String> {
    element
        .get_attributes()
        .get(name)
        .map(|value| value.to_string())
}

/// What a [`Container`] currently shows.
#[derive(Debug, Clone, Default)]
pub enum ContainerContent {
    /// Nothing.
    #[default]
    Empty,
    /// Informational text shown instead of a diagram.
    Placeholder(String),
    /// A mounted diagram.
    Diagram(MountedDiagram),
    /// Readable error text shown instead of a diagram.
    Error(String),
}

/// Host element a diagram is mounted into.
#[derive(Debug, Clone, Default)]
pub struct Container {
    classes: Vec<String>,
    content: ContainerContent,
}

impl Container {
    /// Creates an empty container with no classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container carrying `class`.
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            content: ContainerContent::Empty,
        }
    }

    /// Wraps this container for sharing with asynchronous renders.
    pub fn shared(self) -> SharedContainer {
        Arc::new(Mutex::new(self))
    }

    /// Returns the container's classes.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns `true` if the container carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds `class` unless already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes `class` if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Returns the current content.
    pub fn content(&self) -> &ContainerContent {
        &self.content
    }

    /// Removes all content.
    pub fn empty(&mut self) {
        self.content = ContainerContent::Empty;
    }

    /// Returns `true` if the container shows nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self.content, ContainerContent::Empty)
    }

    /// Replaces the content with placeholder text.
    pub fn show_placeholder(&mut self, text: impl Into<String>) {
        self.content = ContainerContent::Placeholder(text.into());
    }

    /// Replaces the content with error text.
    pub fn show_error(&mut self, text: impl Into<String>) {
        self.content = ContainerContent::Error(text.into());
    }

    /// Returns the mounted diagram, if any.
    pub fn diagram(&self) -> Option<&MountedDiagram> {
        match &self.content {
            ContainerContent::Diagram(diagram) => Some(diagram),
            _ => None,
        }
    }

    /// Returns the placeholder text, if any.
    pub fn placeholder(&self) -> Option<&str> {
        match &self.content {
            ContainerContent::Placeholder(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the error text, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.content {
            ContainerContent::Error(text) => Some(text),
            _ => None,
        }
    }

    fn diagram_mut(&mut self) -> Option<&mut MountedDiagram> {
        match &mut self.content {
            ContainerContent::Diagram(diagram) => Some(diagram),
            _ => None,
        }
    }
}

/// Mounts renderer output into containers and applies viewport transforms.
pub struct DiagramHost<M> {
    renderer: Arc<dyn DiagramRenderer<M>>,
}

impl<M> Clone for DiagramHost<M> {
    fn clone(&self) -> Self {
        Self {
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<M> DiagramHost<M> {
    /// Creates a host using `renderer`.
    pub fn new(renderer: Arc<dyn DiagramRenderer<M>>) -> Self {
        Self { renderer }
    }

    /// Clears `container`, renders `model` once and mounts the result.
    ///
    /// Any previously mounted diagram is replaced entirely. Returns the
    /// mounted diagram, or `None` if the renderer produced nothing, in which
    /// case the container is left empty.
    pub fn mount<'c>(
        &self,
        model: &M,
        container: &'c mut Container,
    ) -> Option<&'c MountedDiagram> {
        container.empty();

        let Some(root) = self.renderer.render(model) else {
            debug!("Renderer produced no content");
            return None;
        };

        container.content = ContainerContent::Diagram(MountedDiagram::adopt(root));
        container.diagram()
    }

    /// Applies `transform` to the diagram mounted in `container`.
    ///
    /// Returns `false` if no diagram is mounted.
    pub fn apply_transform(container: &mut Container, transform: ViewportTransform) -> bool {
        match container.diagram_mut() {
            Some(diagram) => {
                diagram.apply(transform);
                true
            }
            None => false,
        }
    }
}
