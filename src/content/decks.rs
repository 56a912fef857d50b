//! Deck file loading from the data directory.

use std::path::{Path, PathBuf};

use crate::domain::Deck;

/// Deck and manifest loading errors.
#[derive(Debug)]
pub enum DeckLoadError {
    FileNotFound(String),
    InvalidFilename(String),
    IoError(String, String),
    ParseError(String, String),
}

impl std::fmt::Display for DeckLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckLoadError::FileNotFound(path) => write!(f, "Deck file not found: {}", path),
            DeckLoadError::InvalidFilename(name) => write!(f, "Invalid deck filename: {:?}", name),
            DeckLoadError::IoError(path, err) => write!(f, "IO error reading {}: {}", path, err),
            DeckLoadError::ParseError(path, err) => write!(f, "Parse error in {}: {}", path, err),
        }
    }
}

impl DeckLoadError {
    /// Returns a user-facing error message without exposing filesystem paths.
    pub fn user_message(&self) -> &'static str {
        match self {
            DeckLoadError::FileNotFound(_) => "Deck file not found",
            DeckLoadError::InvalidFilename(_) => "Invalid deck filename",
            DeckLoadError::IoError(_, _) => "Failed to read deck file",
            DeckLoadError::ParseError(_, _) => "Failed to parse deck file",
        }
    }
}

impl std::error::Error for DeckLoadError {}

/// Resolve `filename` inside `data_dir`, rejecting anything that is not a
/// plain file name.
pub fn deck_path(data_dir: &Path, filename: &str) -> Result<PathBuf, DeckLoadError> {
    let valid = !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0']);
    if !valid {
        return Err(DeckLoadError::InvalidFilename(filename.to_string()));
    }
    Ok(data_dir.join(filename))
}

/// Read and parse a deck file.
///
/// Missing files and JSON syntax errors are errors; a well-formed document
/// without the ayah/word structure loads as an empty deck.
pub async fn load_deck(data_dir: &Path, filename: &str) -> Result<Deck, DeckLoadError> {
    let path = deck_path(data_dir, filename)?;
    let display = path.display().to_string();

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DeckLoadError::FileNotFound(display));
        }
        Err(e) => return Err(DeckLoadError::IoError(display, e.to_string())),
    };

    let deck = Deck::from_json_str(&content)
        .map_err(|e| DeckLoadError::ParseError(display.clone(), e.to_string()))?;

    tracing::info!(
        "Loaded deck {} ({} ayahs, {} words)",
        filename,
        deck.ayats.len(),
        deck.word_count()
    );
    Ok(deck)
}

/// Banner text shown when a deck cannot be loaded.
pub fn load_failure_message(filename: &str, err: &DeckLoadError) -> String {
    format!(
        "{}: data/{}. Check that the file exists under /data and the name matches manifest.json exactly.",
        err.user_message(),
        filename
    )
}
