use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LanguageModel;
use crate::render::DocumentRenderer;
use crate::search::SearchProvider;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Collaborators sit behind traits so tests can swap in scripted ones.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LanguageModel>,
    pub search: Arc<dyn SearchProvider>,
    /// Rendering is synchronous; call it through `publish::render_document`.
    pub renderer: Arc<dyn DocumentRenderer>,
    pub store: Arc<dyn ObjectStore>,
    pub config: Config,
}
