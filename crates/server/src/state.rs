//! Shared application state and server lifecycle.

use crate::config::ServerConfig;
use apiview_spec_tools::document::SpecDocument;
use apiview_viewer::config::ViewerConfig;
use parking_lot::RwLock;
use std::sync::Arc;

/// Lifecycle of the running server, backing the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Running,
    ShuttingDown,
    Stopped,
}

/// State shared across handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    viewer: ViewerConfig,
    spec: SpecDocument,
    page_origin: String,
    client: reqwest::Client,
    lifecycle: RwLock<LifecycleState>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: ServerConfig,
        viewer: ViewerConfig,
        spec: SpecDocument,
        page_origin: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                viewer,
                spec,
                page_origin,
                client,
                lifecycle: RwLock::new(LifecycleState::Starting),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn viewer(&self) -> &ViewerConfig {
        &self.inner.viewer
    }

    #[must_use]
    pub fn spec(&self) -> &SpecDocument {
        &self.inner.spec
    }

    /// Origin the hosted page is served from.
    #[must_use]
    pub fn page_origin(&self) -> &str {
        &self.inner.page_origin
    }

    #[must_use]
    pub fn client(&self) -> &reqwest::Client {
        &self.inner.client
    }

    #[must_use]
    pub fn lifecycle(&self) -> LifecycleState {
        *self.inner.lifecycle.read()
    }

    pub fn set_lifecycle(&self, state: LifecycleState) {
        *self.inner.lifecycle.write() = state;
    }

    /// Healthy means fully started and not yet shutting down.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.lifecycle() == LifecycleState::Running
    }
}
