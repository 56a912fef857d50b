//! Deck flattening: every word of every ayah, in document order.

use crate::domain::{Ayah, Deck, Word};

/// A word card as it appears in the flattened sequence.
#[derive(Debug, Clone, Copy)]
pub struct FlatEntry<'a> {
  pub ayah: &'a Ayah,
  pub word: &'a Word,
  pub ayah_index: usize,
  pub word_index: usize,
}

impl FlatEntry<'_> {
  /// 1-based position of the word within its ayah.
  pub fn word_position(&self) -> usize {
    self.word_index + 1
  }

  /// `surah:ayah:word` label built from the ayah id and word position.
  pub fn label(&self) -> String {
    format!("{}:{}", self.ayah.ayah_id, self.word_position())
  }
}

/// A loaded deck together with its flattened word sequence.
///
/// The sequence is computed once at construction and never edited; loading
/// a different deck means building a new `FlatDeck`.
#[derive(Debug, Clone, Default)]
pub struct FlatDeck {
  deck: Deck,
  /// (ayah index, word index) pairs
  entries: Vec<(usize, usize)>,
}

impl FlatDeck {
  pub fn new(deck: Deck) -> Self {
    let entries = deck
      .ayats
      .iter()
      .enumerate()
      .flat_map(|(ai, ayah)| (0..ayah.words.len()).map(move |wi| (ai, wi)))
      .collect();
    Self { deck, entries }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<FlatEntry<'_>> {
    let &(ayah_index, word_index) = self.entries.get(index)?;
    let ayah = &self.deck.ayats[ayah_index];
    Some(FlatEntry {
      ayah,
      word: &ayah.words[word_index],
      ayah_index,
      word_index,
    })
  }

  pub fn iter(&self) -> impl Iterator<Item = FlatEntry<'_>> {
    (0..self.len()).filter_map(move |i| self.get(i))
  }
}
