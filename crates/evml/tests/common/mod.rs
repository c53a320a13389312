//! In-memory host fakes shared by the integration tests.
//!
//! The fake language service understands two directives in the source:
//! `!error <msg>` adds an error diagnostic and `!blank` makes the renderer
//! produce nothing. Any other source becomes a model holding the text.

#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use svg::{Node, node::element::Element};

use evml::{
    FullscreenError, HostServices,
    config::AppConfig,
    document::{
        BuildOutput, Diagnostic, DocumentRegistry, DocumentUri, LanguageService, ServiceError,
    },
    explorer::{FullscreenHost, FullscreenListener, SubscriptionId},
    export::{Notifier, StorageAdapter},
    host::{DiagramHost, DiagramRenderer},
    plugin::EvmlPlugin,
    workspace::{PanelId, Workspace},
};

#[derive(Default)]
pub struct FakeService {
    pub registry: DocumentRegistry,
}

#[async_trait]
impl LanguageService for FakeService {
    type Model = String;

    fn add_document(&self, uri: &DocumentUri, source: &str) {
        self.registry.add(uri.clone(), source);
    }

    async fn build(&self, uri: &DocumentUri) -> Result<BuildOutput<String>, ServiceError> {
        let source = self
            .registry
            .source(uri)
            .ok_or_else(|| ServiceError::UnknownDocument(uri.clone()))?;

        tokio::task::yield_now().await;

        let diagnostics: Vec<_> = source
            .lines()
            .filter_map(|line| line.strip_prefix("!error "))
            .map(Diagnostic::error)
            .collect();
        Ok(BuildOutput::new(diagnostics, Some(source)))
    }

    fn delete_document(&self, uri: &DocumentUri) -> bool {
        self.registry.remove(uri)
    }

    fn delete_documents(&self, namespace: &str) -> usize {
        self.registry.remove_namespace(namespace)
    }
}

pub struct FakeRenderer;

impl DiagramRenderer<String> for FakeRenderer {
    fn render(&self, model: &String) -> Option<Element> {
        if model.contains("!blank") {
            return None;
        }

        let mut root = Element::new("svg");
        root.assign("data-source", model.as_str());
        Some(root)
    }
}

pub fn diagram_host() -> DiagramHost<String> {
    DiagramHost::new(Arc::new(FakeRenderer))
}

#[derive(Default)]
pub struct MemoryStorage {
    pub writes: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl MemoryStorage {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn write(&self, path: &str, payload: &str) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only vault"));
        }

        self.writes
            .lock()
            .unwrap()
            .push((path.to_string(), payload.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct FakeWorkspace {
    pub panels: Mutex<Vec<(PanelId, String)>>,
    pub revealed: Mutex<Vec<PanelId>>,
    pub detached: Mutex<Vec<PanelId>>,
    pub created: Mutex<u64>,
}

impl FakeWorkspace {
    pub fn open_panels(&self) -> Vec<PanelId> {
        self.panels.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }

    pub fn created(&self) -> u64 {
        *self.created.lock().unwrap()
    }

    pub fn revealed(&self) -> Vec<PanelId> {
        self.revealed.lock().unwrap().clone()
    }

    /// Closes a panel the way a user would, without telling the plugin.
    pub fn close_externally(&self, panel: PanelId) {
        self.panels.lock().unwrap().retain(|(id, _)| *id != panel);
    }
}

impl Workspace for FakeWorkspace {
    fn panels_of_type(&self, view_type: &str) -> Vec<PanelId> {
        self.panels
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, kind)| kind == view_type)
            .map(|(id, _)| *id)
            .collect()
    }

    fn create_panel(&self, view_type: &str) -> PanelId {
        let mut created = self.created.lock().unwrap();
        *created += 1;
        let panel = PanelId::new(100 + *created);
        self.panels
            .lock()
            .unwrap()
            .push((panel, view_type.to_string()));
        panel
    }

    fn reveal_panel(&self, panel: PanelId) {
        self.revealed.lock().unwrap().push(panel);
    }

    fn detach_panel(&self, panel: PanelId) {
        self.panels.lock().unwrap().retain(|(id, _)| *id != panel);
        self.detached.lock().unwrap().push(panel);
    }
}

#[derive(Default)]
pub struct FakeFullscreen {
    element: Mutex<Option<PanelId>>,
    listeners: Mutex<Vec<(SubscriptionId, FullscreenListener)>>,
    next_subscription: Mutex<u64>,
    pub refuse: bool,
}

impl FakeFullscreen {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub fn subscriptions(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Leaves fullscreen by a path other than the explorer toolbar.
    pub fn exit_externally(&self) {
        self.change(None);
    }

    fn change(&self, element: Option<PanelId>) {
        *self.element.lock().unwrap() = element;
        for (_, listener) in self.listeners.lock().unwrap().iter() {
            listener(element);
        }
    }
}

impl FullscreenHost for FakeFullscreen {
    fn fullscreen_element(&self) -> Option<PanelId> {
        *self.element.lock().unwrap()
    }

    fn request_fullscreen(&self, panel: PanelId) -> Result<(), FullscreenError> {
        if self.refuse {
            return Err(FullscreenError("permission denied".to_string()));
        }
        self.change(Some(panel));
        Ok(())
    }

    fn exit_fullscreen(&self) -> Result<(), FullscreenError> {
        self.change(None);
        Ok(())
    }

    fn subscribe(&self, listener: FullscreenListener) -> SubscriptionId {
        let mut next = self.next_subscription.lock().unwrap();
        *next += 1;
        let id = SubscriptionId::new(*next);
        self.listeners.lock().unwrap().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|(subscription, _)| *subscription != id);
    }
}

/// A plugin wired to fakes, with handles to inspect them.
pub struct Harness {
    pub plugin: EvmlPlugin<FakeService>,
    pub service: Arc<FakeService>,
    pub storage: Arc<MemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub workspace: Arc<FakeWorkspace>,
    pub fullscreen: Arc<FakeFullscreen>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::default())
    }

    pub fn with_storage(storage: MemoryStorage) -> Self {
        let service = Arc::new(FakeService::default());
        let storage = Arc::new(storage);
        let notifier = Arc::new(RecordingNotifier::default());
        let workspace = Arc::new(FakeWorkspace::default());
        let fullscreen = Arc::new(FakeFullscreen::default());

        let services = HostServices {
            storage: storage.clone(),
            notifier: notifier.clone(),
            workspace: workspace.clone(),
            fullscreen: fullscreen.clone(),
        };
        let plugin = EvmlPlugin::new(
            &AppConfig::default(),
            service.clone(),
            Arc::new(FakeRenderer),
            services,
        );

        Self {
            plugin,
            service,
            storage,
            notifier,
            workspace,
            fullscreen,
        }
    }
}
