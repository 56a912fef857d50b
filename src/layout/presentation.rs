//! Which face of the card is visible, and which back-face tab is selected.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardFace {
  #[default]
  Front,
  Back,
}

impl CardFace {
  pub fn flipped(self) -> Self {
    match self {
      Self::Front => Self::Back,
      Self::Back => Self::Front,
    }
  }
}

/// Back-face tabs for the tabbed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackTab {
  #[default]
  Derivations,
  Tajweed,
  Audio,
}

impl BackTab {
  pub const ALL: [BackTab; 3] = [BackTab::Derivations, BackTab::Tajweed, BackTab::Audio];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Derivations => "derivations",
      Self::Tajweed => "tajweed",
      Self::Audio => "audio",
    }
  }

  pub fn title(&self) -> &'static str {
    match self {
      Self::Derivations => "Derivations",
      Self::Tajweed => "Tajweed",
      Self::Audio => "Audio",
    }
  }
}

impl std::str::FromStr for BackTab {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "derivations" => Ok(Self::Derivations),
      "tajweed" => Ok(Self::Tajweed),
      "audio" => Ok(Self::Audio),
      _ => Err(format!("Invalid tab: {}", s)),
    }
  }
}

/// Presentation state for the current card. Changes only on explicit flip
/// and tab commands, and resets whenever a different card is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presentation {
  pub face: CardFace,
  pub tab: BackTab,
}

impl Presentation {
  pub fn flip(&mut self) {
    self.face = self.face.flipped();
  }

  pub fn select_tab(&mut self, tab: BackTab) {
    self.tab = tab;
  }

  /// Show the front of a newly selected card.
  pub fn reset(&mut self) {
    *self = Self::default();
  }
}
