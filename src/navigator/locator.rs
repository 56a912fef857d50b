//! "Jump to" locators such as `67:3`, `2.255` or `2:255:4`.

use super::flatten::FlatDeck;

/// A parsed `surah:ayah[:word]` locator. `:` and `.` are both accepted as
/// separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
  pub surah: u32,
  pub ayah: u32,
  /// 1-based word position within the ayah
  pub word: Option<u32>,
}

impl Locator {
  /// Parse a locator, returning `None` for anything that does not match.
  pub fn parse(query: &str) -> Option<Self> {
    let parts: Vec<&str> = query.trim().split([':', '.']).collect();
    if !(2..=3).contains(&parts.len()) {
      return None;
    }

    let mut numbers = parts.iter().map(|p| parse_number(p));
    let surah = numbers.next()??;
    let ayah = numbers.next()??;
    let word = match numbers.next() {
      Some(n) => Some(n?),
      None => None,
    };

    Some(Self { surah, ayah, word })
  }

  /// Index into the flattened sequence of the first entry this locator
  /// names.
  pub fn find_in(&self, deck: &FlatDeck) -> Option<usize> {
    deck.iter().position(|entry| {
      if entry.ayah.surah_and_ayah() != Some((self.surah, self.ayah)) {
        return false;
      }
      match self.word {
        Some(w) => entry.word_position() == w as usize,
        None => true,
      }
    })
  }

  /// Position within `order` of the entry this locator names.
  pub fn resolve(&self, deck: &FlatDeck, order: &[usize]) -> Option<usize> {
    let flat_index = self.find_in(deck)?;
    order.iter().position(|&i| i == flat_index)
  }
}

fn parse_number(s: &str) -> Option<u32> {
  if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  s.parse().ok()
}

impl std::fmt::Display for Locator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.word {
      Some(w) => write!(f, "{}:{}:{}", self.surah, self.ayah, w),
      None => write!(f, "{}:{}", self.surah, self.ayah),
    }
  }
}
