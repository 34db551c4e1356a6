use std::path::PathBuf;
use std::sync::Arc;

use crate::components::Skin;
use crate::server::Server;
use crate::store::FileStore;

/// Store handle shared by every request.
pub type SharedStore = Arc<dyn FileStore + Send + Sync>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub server: Arc<Server<SharedStore>>,
    pub skin: Arc<Skin>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: SharedStore, skin: Skin, static_dir: PathBuf) -> Self {
        Self {
            server: Arc::new(Server::new(store)),
            skin: Arc::new(skin),
            static_dir: Arc::new(static_dir),
        }
    }
}

/// Markdown rendering result
#[derive(Debug, Clone)]
pub struct MarkdownResult {
    pub html: String,
    pub toc: String,
    pub title: Option<String>,
}

/// Template rendering context
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub content: String,
    pub sidebar: String,
}
