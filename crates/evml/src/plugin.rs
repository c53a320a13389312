//! Wiring of pipeline, host, export and explorer into one host extension.
//!
//! The host hands every fenced `evml` block to [`EvmlPlugin::process_block`]
//! together with the container it should appear in. Successfully rendered
//! blocks are remembered so their context menu actions can later explore or
//! export them.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, Weak,
    atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;
use log::{debug, error, info};
use svg::node::element::Element;

use evml_document::{DocumentPipeline, LanguageService};

use crate::{
    config::AppConfig,
    error::EvmlError,
    explorer::{ExplorerSurface, FullscreenHost},
    export::{ExportService, Notifier, StorageAdapter, content_hash},
    host::{Container, DiagramHost, DiagramRenderer},
    menu::{BlockId, ContextMenu, DiagramAction},
    workspace::{PanelId, VIEW_TYPE, Workspace},
};

/// Class added to every container a block is rendered into.
pub const BLOCK_CLASS: &str = "evml-diagram";

/// Prefix of error text shown in place of a diagram.
pub const RENDER_ERROR_PREFIX: &str = "Event Modeling render error:";

/// Capabilities the host provides to the plugin.
#[derive(Clone)]
pub struct HostServices {
    /// Where exported artifacts are written.
    pub storage: Arc<dyn StorageAdapter>,
    /// Shows save notices.
    pub notifier: Arc<dyn Notifier>,
    /// Opens and focuses explorer panels.
    pub workspace: Arc<dyn Workspace>,
    /// Enters and leaves fullscreen.
    pub fullscreen: Arc<dyn FullscreenHost>,
}

struct RenderedBlock<M> {
    container: Weak<Mutex<Container>>,
    model: Arc<M>,
    source: String,
    hash: String,
    root: Element,
}

/// The host extension.
pub struct EvmlPlugin<S: LanguageService> {
    pipeline: DocumentPipeline<S>,
    host: DiagramHost<S::Model>,
    export: ExportService,
    workspace: Arc<dyn Workspace>,
    fullscreen: Arc<dyn FullscreenHost>,
    blocks: Mutex<IndexMap<BlockId, RenderedBlock<S::Model>>>,
    next_block: AtomicU64,
    explorers: IndexMap<PanelId, ExplorerSurface<S::Model>>,
}

impl<S: LanguageService> EvmlPlugin<S> {
    /// Creates the plugin around a language service and a renderer.
    pub fn new(
        config: &AppConfig,
        service: Arc<S>,
        renderer: Arc<dyn DiagramRenderer<S::Model>>,
        services: HostServices,
    ) -> Self {
        let pipeline = DocumentPipeline::new(service).with_namespace(config.pipeline().namespace());
        info!(namespace = pipeline.namespace(); "Event Modeling plugin loaded");

        Self {
            pipeline,
            host: DiagramHost::new(renderer),
            export: ExportService::new(services.storage, services.notifier),
            workspace: services.workspace,
            fullscreen: services.fullscreen,
            blocks: Mutex::new(IndexMap::new()),
            next_block: AtomicU64::new(0),
            explorers: IndexMap::new(),
        }
    }

    /// Returns the document pipeline.
    pub fn pipeline(&self) -> &DocumentPipeline<S> {
        &self.pipeline
    }

    /// Renders `source` into `container`.
    ///
    /// On success the diagram is mounted and the block is registered for its
    /// context menu. On failure the container shows the error text instead.
    /// If the container is dropped while the build is in flight, the result is
    /// discarded. Returns the block id of a mounted diagram.
    pub async fn process_block(
        &self,
        source: &str,
        container: Weak<Mutex<Container>>,
    ) -> Option<BlockId> {
        {
            let shared = container.upgrade()?;
            let mut target = shared.lock().unwrap_or_else(PoisonError::into_inner);
            target.add_class(BLOCK_CLASS);
            target.empty();
        }
        self.forget_container(&container);

        let hash = content_hash(source);
        let result = self.pipeline.render(source).await;

        let Some(shared) = container.upgrade() else {
            debug!(hash = hash.as_str(); "Container dropped during render, discarding result");
            return None;
        };
        let mut target = shared.lock().unwrap_or_else(PoisonError::into_inner);

        let model = match result {
            Ok(model) => Arc::new(model),
            Err(err) => {
                error!(hash = hash.as_str(), err:% = err; "Failed to render diagram block");
                target.show_error(format!("{RENDER_ERROR_PREFIX} {err}"));
                return None;
            }
        };

        let root = self.host.mount(&model, &mut target)?.root().clone();
        let id = BlockId::new(self.next_block.fetch_add(1, Ordering::Relaxed));
        debug!(block:% = id, hash = hash.as_str(); "Diagram block rendered");

        self.lock_blocks().insert(
            id,
            RenderedBlock {
                container,
                model,
                source: source.to_string(),
                hash,
                root,
            },
        );
        Some(id)
    }

    /// Returns the context menu of a rendered block.
    pub fn context_menu(&self, block: BlockId) -> Option<ContextMenu> {
        let blocks = self.lock_blocks();
        let rendered = blocks.get(&block)?;
        (rendered.container.strong_count() > 0).then(|| ContextMenu::for_block(block))
    }

    /// Returns the ids of blocks whose diagrams are still shown.
    pub fn blocks(&self) -> Vec<BlockId> {
        self.lock_blocks()
            .iter()
            .filter(|(_, rendered)| rendered.container.strong_count() > 0)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Runs a context menu action for `block`.
    pub async fn run_action(
        &mut self,
        block: BlockId,
        action: DiagramAction,
    ) -> Result<(), EvmlError> {
        debug!(block:% = block, action:% = action; "Running diagram action");

        match action {
            DiagramAction::Explore => {
                let model = self.with_block(block, |rendered| Arc::clone(&rendered.model))?;
                self.open_explorer(model);
            }
            DiagramAction::SaveSource => {
                let source = self.with_block(block, |rendered| rendered.source.clone())?;
                self.export.save_source(&source).await?;
            }
            DiagramAction::SaveRendering => {
                let (root, hash) = self.with_block(block, |rendered| {
                    (rendered.root.clone(), rendered.hash.clone())
                })?;
                self.export.save_rendering(&root, &hash).await?;
            }
        }

        Ok(())
    }

    /// Shows `model` in an explorer panel and returns the panel.
    ///
    /// The first open explorer panel is reused; a new one is created only if
    /// none is open. The chosen panel is focused either way.
    pub fn open_explorer(&mut self, model: Arc<S::Model>) -> PanelId {
        let open = self.workspace.panels_of_type(VIEW_TYPE);
        self.explorers.retain(|panel, surface| {
            let alive = open.contains(panel);
            if !alive {
                debug!(panel:% = panel; "Dropping explorer of a panel closed by the host");
                surface.close();
            }
            alive
        });

        let panel = match open.first() {
            Some(panel) => *panel,
            None => {
                let panel = self.workspace.create_panel(VIEW_TYPE);
                info!(panel:% = panel; "Explorer panel created");
                panel
            }
        };
        self.workspace.reveal_panel(panel);

        let host = self.host.clone();
        let fullscreen = Arc::clone(&self.fullscreen);
        let surface = self
            .explorers
            .entry(panel)
            .or_insert_with(|| ExplorerSurface::new(panel, host, fullscreen));
        surface.open();
        surface.set_model(model);

        panel
    }

    /// Returns the explorer shown in `panel`.
    pub fn explorer(&self, panel: PanelId) -> Option<&ExplorerSurface<S::Model>> {
        self.explorers.get(&panel)
    }

    /// Returns the explorer shown in `panel` for input handling.
    pub fn explorer_mut(&mut self, panel: PanelId) -> Option<&mut ExplorerSurface<S::Model>> {
        self.explorers.get_mut(&panel)
    }

    /// Tears down the explorer of a panel the host has closed.
    pub fn close_panel(&mut self, panel: PanelId) {
        if let Some(mut surface) = self.explorers.shift_remove(&panel) {
            surface.close();
        }
    }

    /// Closes every explorer panel and releases all ephemeral documents.
    pub fn unload(&mut self) {
        for (_, mut surface) in self.explorers.drain(..) {
            surface.close();
        }
        for panel in self.workspace.panels_of_type(VIEW_TYPE) {
            self.workspace.detach_panel(panel);
        }

        let released = self.pipeline.release_namespace();
        self.lock_blocks().clear();
        info!(released = released; "Event Modeling plugin unloaded");
    }

    fn with_block<T>(
        &self,
        block: BlockId,
        f: impl FnOnce(&RenderedBlock<S::Model>) -> T,
    ) -> Result<T, EvmlError> {
        self.lock_blocks()
            .get(&block)
            .map(f)
            .ok_or_else(|| EvmlError::UnknownBlock(block.get()))
    }

    fn forget_container(&self, container: &Weak<Mutex<Container>>) {
        self.lock_blocks().retain(|_, rendered| {
            rendered.container.strong_count() > 0 && !rendered.container.ptr_eq(container)
        });
    }

    fn lock_blocks(&self) -> MutexGuard<'_, IndexMap<BlockId, RenderedBlock<S::Model>>> {
        self.blocks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
