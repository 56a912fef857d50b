//! Application state passed to all handlers.

use std::sync::Arc;

use crate::config::ViewerConfig;
use crate::content::{Manifest, ManifestEntry};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ViewerConfig>,
    pub manifest: Arc<Manifest>,
    /// Set when the manifest could not be loaded at startup; shown in the
    /// error banner of every page
    pub manifest_error: Option<Arc<str>>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: ViewerConfig, manifest: Manifest, manifest_error: Option<String>) -> Self {
        let sessions = SessionStore::new(
            config.session_expiry_hours,
            config.default_mode,
            config.random_step,
        );
        Self {
            config: Arc::new(config),
            manifest: Arc::new(manifest),
            manifest_error: manifest_error.map(Arc::from),
            sessions,
        }
    }

    /// Load the manifest from the configured data directory. A missing or
    /// invalid manifest leaves the viewer running with no decks.
    pub fn load(config: ViewerConfig) -> Self {
        match Manifest::load(&config.data_dir) {
            Ok(manifest) => Self::new(config, manifest, None),
            Err(e) => {
                tracing::warn!("Failed to load manifest: {}", e);
                let message = format!("Failed to initialize. {}", e.user_message());
                Self::new(config, Manifest::default(), Some(message))
            }
        }
    }

    pub fn deck_entries(&self) -> &[ManifestEntry] {
        &self.manifest.entries
    }
}
