//! Display-ready view of a word card, with placeholders filled in.

use serde::Serialize;

use crate::config::FRONT_DERIVATION_LIMIT;
use crate::domain::annotations::{self, TajweedRule};
use crate::domain::DerivationRecord;
use crate::navigator::FlatEntry;

/// Shown for a missing Arabic word, meaning or ayah translation
pub const MISSING_TEXT: &str = "—";

/// Shown for a missing ayah text
pub const MISSING_AYAH: &str = "﴿ ﴾";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivationView {
  pub arabic: String,
  pub meaning: String,
  /// Empty when the record has no example
  #[serde(skip_serializing_if = "String::is_empty")]
  pub example_arabic: String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub example_bangla: String,
  pub occurrences: String,
}

impl From<&DerivationRecord> for DerivationView {
  fn from(d: &DerivationRecord) -> Self {
    Self {
      arabic: d.arabic.clone(),
      meaning: d.meaning.clone(),
      example_arabic: trimmed(d.example_arabic.as_deref()),
      example_bangla: trimmed(d.example_bangla.as_deref()),
      occurrences: d.occurrence_list(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
  /// `surah:ayah:word`
  pub label: String,
  pub ayah_id: String,
  pub ayah_arabic: String,
  pub ayah_bangla: String,
  pub arabic_word: String,
  pub bangla_meaning: String,
  pub root: String,
  pub root_meaning: String,
  pub derivation_method: String,
  pub derivations: Vec<DerivationView>,
  pub audio_url: Option<String>,
  pub tajweed: Vec<TajweedRule>,
}

impl CardView {
  pub fn from_entry(entry: &FlatEntry<'_>) -> Self {
    let word = entry.word;
    let ayah = entry.ayah;

    Self {
      label: entry.label(),
      ayah_id: ayah.ayah_id.clone(),
      ayah_arabic: or_placeholder(&ayah.arabic, MISSING_AYAH),
      ayah_bangla: or_placeholder(&ayah.bangla, MISSING_TEXT),
      arabic_word: or_placeholder(&word.arabic_word, MISSING_TEXT),
      bangla_meaning: or_placeholder(&word.bangla_meaning, MISSING_TEXT),
      root: word.root.clone().unwrap_or_default(),
      root_meaning: word.root_meaning.clone().unwrap_or_default(),
      derivation_method: word.derivation_method.clone().unwrap_or_default(),
      derivations: word.quranic_derivations.iter().map(DerivationView::from).collect(),
      audio_url: annotations::audio_url(word.audio.as_ref()),
      tajweed: annotations::tajweed_rules(word.tajweed.as_ref()),
    }
  }

  pub fn has_audio(&self) -> bool {
    self.audio_url.is_some()
  }

  pub fn audio_src(&self) -> &str {
    self.audio_url.as_deref().unwrap_or_default()
  }

  /// Derivations shown on the front face.
  pub fn front_derivations(&self) -> &[DerivationView] {
    let n = self.derivations.len().min(FRONT_DERIVATION_LIMIT);
    &self.derivations[..n]
  }
}

fn or_placeholder(s: &str, placeholder: &str) -> String {
  if s.is_empty() {
    placeholder.to_string()
  } else {
    s.to_string()
  }
}

fn trimmed(s: Option<&str>) -> String {
  s.map(str::trim).unwrap_or_default().to_string()
}
