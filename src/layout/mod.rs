//! Card layouts.
//!
//! Each [`Layout`] variant has a [`CardRenderer`] producing the HTML for the
//! front and back faces of a word card. The navigator knows nothing about
//! layouts; the page builds one [`CardView`] from the current entry and
//! hands it to both faces.

pub mod presentation;
pub mod view;

use askama::Template;
use serde::{Deserialize, Serialize};

pub use presentation::{BackTab, CardFace, Presentation};
pub use view::{CardView, DerivationView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
  /// Word, root, morphology and derivations
  #[default]
  Full,
  /// Full layout plus a word audio player
  Audio,
  /// Audio on the front, back face split into derivation/tajweed/audio tabs
  TajweedAudioWithTabs,
}

impl Layout {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Full => "full",
      Self::Audio => "audio",
      Self::TajweedAudioWithTabs => "tajweed-audio-with-tabs",
    }
  }

  pub fn renderer(&self) -> &'static dyn CardRenderer {
    match self {
      Self::Full => &FullLayout,
      Self::Audio => &AudioLayout,
      Self::TajweedAudioWithTabs => &TabbedLayout,
    }
  }
}

impl std::fmt::Display for Layout {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for Layout {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "full" => Ok(Self::Full),
      "audio" => Ok(Self::Audio),
      "tajweed-audio-with-tabs" | "tajweed" => Ok(Self::TajweedAudioWithTabs),
      _ => Err(format!("Invalid layout: {}", s)),
    }
  }
}

/// Renders the two faces of a word card.
pub trait CardRenderer: Send + Sync {
  fn render_front(&self, card: &CardView) -> askama::Result<String>;

  /// `tab` is only meaningful for layouts with a tabbed back face.
  fn render_back(&self, card: &CardView, tab: BackTab) -> askama::Result<String>;
}

// ==================== Templates ====================

#[derive(Template)]
#[template(path = "card/front.html")]
pub struct FrontTemplate<'a> {
  pub card: &'a CardView,
  pub derivations: &'a [DerivationView],
  pub show_audio: bool,
}

#[derive(Template)]
#[template(path = "card/back.html")]
pub struct BackTemplate<'a> {
  pub card: &'a CardView,
  pub show_audio: bool,
}

pub struct TabLink {
  pub value: &'static str,
  pub title: &'static str,
  pub active: bool,
}

#[derive(Template)]
#[template(path = "card/back_tabs.html")]
pub struct TabbedBackTemplate<'a> {
  pub card: &'a CardView,
  pub tabs: Vec<TabLink>,
  pub active_tab: &'static str,
}

// ==================== Renderers ====================

fn render_front_face(card: &CardView, show_audio: bool) -> askama::Result<String> {
  FrontTemplate {
    card,
    derivations: card.front_derivations(),
    show_audio,
  }
  .render()
}

pub struct FullLayout;

impl CardRenderer for FullLayout {
  fn render_front(&self, card: &CardView) -> askama::Result<String> {
    render_front_face(card, false)
  }

  fn render_back(&self, card: &CardView, _tab: BackTab) -> askama::Result<String> {
    BackTemplate { card, show_audio: false }.render()
  }
}

pub struct AudioLayout;

impl CardRenderer for AudioLayout {
  fn render_front(&self, card: &CardView) -> askama::Result<String> {
    render_front_face(card, true)
  }

  fn render_back(&self, card: &CardView, _tab: BackTab) -> askama::Result<String> {
    BackTemplate { card, show_audio: true }.render()
  }
}

pub struct TabbedLayout;

impl CardRenderer for TabbedLayout {
  fn render_front(&self, card: &CardView) -> askama::Result<String> {
    render_front_face(card, true)
  }

  fn render_back(&self, card: &CardView, tab: BackTab) -> askama::Result<String> {
    let tabs = BackTab::ALL
      .iter()
      .map(|t| TabLink {
        value: t.as_str(),
        title: t.title(),
        active: *t == tab,
      })
      .collect();
    TabbedBackTemplate {
      card,
      tabs,
      active_tab: tab.as_str(),
    }
    .render()
  }
}
