//! Deck content on disk.
//!
//! The data directory holds a `manifest.json` listing the available surah
//! decks and one JSON file per deck:
//!
//! ```text
//! data/
//!   manifest.json
//!   067-al-mulk.json
//!   112-al-ikhlas.json
//! ```

pub mod decks;
pub mod manifest;

pub use decks::{deck_path, load_deck, load_failure_message, DeckLoadError};
pub use manifest::{Manifest, ManifestEntry};
