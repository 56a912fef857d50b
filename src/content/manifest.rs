//! The deck manifest (`manifest.json`): which surah decks exist and how to
//! label them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::decks::DeckLoadError;
use crate::paths;

/// One selectable deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(default)]
    pub id: Option<String>,
    /// Deck file name, relative to the data directory
    pub filename: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub name_bn: Option<String>,
    #[serde(default)]
    pub name_ar: Option<String>,
}

impl ManifestEntry {
    /// Label for the deck selector: display > name_bn > name_ar > id > filename.
    pub fn label(&self) -> &str {
        [&self.display, &self.name_bn, &self.name_ar, &self.id]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
            .unwrap_or(&self.filename)
    }
}

/// Ordered list of decks; the first one is the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load `manifest.json` from the data directory.
    pub fn load(data_dir: &Path) -> Result<Self, DeckLoadError> {
        let path = data_dir.join(paths::MANIFEST_FILE);
        let display = path.display().to_string();

        if !path.exists() {
            return Err(DeckLoadError::FileNotFound(display));
        }

        let content =
            fs::read_to_string(&path).map_err(|e| DeckLoadError::IoError(display.clone(), e.to_string()))?;

        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| DeckLoadError::ParseError(display.clone(), e.to_string()))?;

        tracing::info!("Loaded manifest with {} decks", manifest.entries.len());
        Ok(manifest)
    }

    pub fn default_filename(&self) -> Option<&str> {
        self.entries.first().map(|e| e.filename.as_str())
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.entries.iter().any(|e| e.filename == filename)
    }
}
