//! Card sequencing: the flattened deck, the traversal order over it, and the
//! current position.
//!
//! A [`Navigator`] owns all of this state. Every operation runs to
//! completion against `&mut self`; deck replacement swaps the flattened
//! sequence, order and position together so callers never observe a new
//! deck paired with a stale order.

pub mod flatten;
pub mod locator;
pub mod order;
pub mod position;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::Deck;

pub use flatten::{FlatDeck, FlatEntry};
pub use locator::Locator;
pub use order::{RandomStep, TraversalMode, rebuild_order};

/// Identifies one in-flight deck load. Only the most recently issued ticket
/// is accepted by [`Navigator::finish_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct Navigator {
  deck: FlatDeck,
  order: Vec<usize>,
  position: usize,
  mode: TraversalMode,
  random_step: RandomStep,
  load_generation: u64,
  rng: StdRng,
}

impl Default for Navigator {
  fn default() -> Self {
    Self::new(TraversalMode::default(), RandomStep::default())
  }
}

impl Navigator {
  /// Empty deck, position 0.
  pub fn new(mode: TraversalMode, random_step: RandomStep) -> Self {
    Self::with_rng(mode, random_step, StdRng::from_os_rng())
  }

  /// Same as [`Navigator::new`] with a caller-supplied generator, for
  /// reproducible shuffles.
  pub fn with_rng(mode: TraversalMode, random_step: RandomStep, rng: StdRng) -> Self {
    Self {
      deck: FlatDeck::default(),
      order: Vec::new(),
      position: 0,
      mode,
      random_step,
      load_generation: 0,
      rng,
    }
  }

  pub fn seeded(mode: TraversalMode, random_step: RandomStep, seed: u64) -> Self {
    Self::with_rng(mode, random_step, StdRng::seed_from_u64(seed))
  }

  // ==================== Deck loading ====================

  /// Replace the deck, rebuilding the order and resetting to the first card.
  pub fn load_deck(&mut self, deck: Deck) {
    let ticket = self.begin_load();
    self.finish_load(ticket, deck);
  }

  /// Start a deck load. Any ticket issued earlier becomes stale.
  pub fn begin_load(&mut self) -> LoadTicket {
    self.load_generation += 1;
    LoadTicket(self.load_generation)
  }

  /// Install a deck fetched under `ticket`. Returns `false`, leaving the
  /// current state untouched, if a newer load has been started since.
  pub fn finish_load(&mut self, ticket: LoadTicket, deck: Deck) -> bool {
    if ticket.0 != self.load_generation {
      tracing::debug!(
        "Discarding stale deck load (ticket {}, current {})",
        ticket.0,
        self.load_generation
      );
      return false;
    }

    let deck = FlatDeck::new(deck);
    let order = rebuild_order(self.mode, deck.len(), &mut self.rng);
    tracing::debug!("Loaded deck with {} word cards ({} mode)", deck.len(), self.mode);

    self.deck = deck;
    self.order = order;
    self.position = position::first();
    true
  }

  // ==================== Order management ====================

  /// Switch traversal mode. The order is rebuilt and position resets to 0
  /// even when the mode is unchanged; the flattened sequence is kept.
  pub fn set_mode(&mut self, mode: TraversalMode) {
    self.mode = mode;
    self.rebuild_order();
  }

  pub fn rebuild_order(&mut self) {
    self.order = rebuild_order(self.mode, self.deck.len(), &mut self.rng);
    self.position = position::first();
  }

  // ==================== Position navigation ====================

  pub fn first(&mut self) {
    self.position = position::first();
  }

  pub fn last(&mut self) {
    self.position = position::last(self.order.len());
  }

  pub fn next(&mut self) {
    let len = self.order.len();
    self.position = match (self.mode, self.random_step) {
      (TraversalMode::Sequential, _) => position::next_clamped(self.position, len),
      (TraversalMode::Random, RandomStep::Redraw) => position::random(len, &mut self.rng),
      (TraversalMode::Random, RandomStep::ShuffledWalk) => position::next_wrapping(self.position, len),
    };
  }

  pub fn previous(&mut self) {
    let len = self.order.len();
    self.position = match (self.mode, self.random_step) {
      (TraversalMode::Sequential, _) => position::previous_clamped(self.position, len),
      (TraversalMode::Random, RandomStep::Redraw) => position::random(len, &mut self.rng),
      (TraversalMode::Random, RandomStep::ShuffledWalk) => {
        position::previous_wrapping(self.position, len)
      }
    };
  }

  // ==================== Lookup ====================

  /// Move to the card named by a `surah:ayah[:word]` query.
  ///
  /// Unparseable queries and queries with no matching card leave the
  /// position unchanged and return `false`.
  pub fn jump_to(&mut self, query: &str) -> bool {
    let Some(locator) = Locator::parse(query) else {
      tracing::debug!("Ignoring unparseable locator {:?}", query);
      return false;
    };

    match self.resolve(&locator) {
      Some(pos) => {
        self.position = pos;
        true
      }
      None => {
        tracing::debug!("No card matches locator {}", locator);
        false
      }
    }
  }

  /// Order position of the card `locator` names, without moving.
  pub fn resolve(&self, locator: &Locator) -> Option<usize> {
    locator.resolve(&self.deck, &self.order)
  }

  // ==================== Accessors ====================

  /// The displayed card: `flattened[order[position]]`.
  pub fn current(&self) -> Option<FlatEntry<'_>> {
    let index = *self.order.get(self.position)?;
    self.deck.get(index)
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  pub fn order(&self) -> &[usize] {
    &self.order
  }

  pub fn mode(&self) -> TraversalMode {
    self.mode
  }

  pub fn random_step(&self) -> RandomStep {
    self.random_step
  }

  pub fn deck(&self) -> &FlatDeck {
    &self.deck
  }

  /// Pager text, `"3 / 40"`, or `"0 / 0"` for an empty deck.
  pub fn position_text(&self) -> String {
    if self.is_empty() {
      "0 / 0".to_string()
    } else {
      format!("{} / {}", self.position + 1, self.len())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::deck_with_word_counts;
  use serde_json::json;

  fn sequential() -> Navigator {
    Navigator::seeded(TraversalMode::Sequential, RandomStep::Redraw, 11)
  }

  #[test]
  fn test_initial_state_is_empty() {
    let nav = Navigator::default();
    assert!(nav.is_empty());
    assert_eq!(nav.position(), 0);
    assert_eq!(nav.mode(), TraversalMode::Sequential);
    assert!(nav.current().is_none());
    assert_eq!(nav.position_text(), "0 / 0");
  }

  #[test]
  fn test_two_ayah_scenario() {
    let mut nav = sequential();
    nav.load_deck(deck_with_word_counts(1, &[2, 1]));
    assert_eq!(nav.deck().len(), 3);

    nav.first();
    assert_eq!(nav.current().unwrap().word.word_id, "1:1:1");
    nav.last();
    assert_eq!(nav.current().unwrap().word.word_id, "1:2:1");

    nav.first();
    nav.next();
    assert_eq!(nav.position(), 1);
    nav.next();
    assert_eq!(nav.position(), 2);
    nav.next();
    assert_eq!(nav.position(), 2);
    assert_eq!(nav.position_text(), "3 / 3");
  }

  #[test]
  fn test_sequential_previous_clamps() {
    let mut nav = sequential();
    nav.load_deck(deck_with_word_counts(1, &[3]));
    nav.previous();
    assert_eq!(nav.position(), 0);
    nav.last();
    nav.previous();
    assert_eq!(nav.position(), 1);
  }

  #[test]
  fn test_malformed_deck_is_empty_state() {
    let mut nav = sequential();
    nav.load_deck(deck_with_word_counts(1, &[4]));
    nav.last();

    nav.load_deck(Deck::from_value(json!({"no_ayats": true})));
    assert!(nav.is_empty());
    assert_eq!(nav.position_text(), "0 / 0");
    assert!(nav.current().is_none());

    nav.next();
    nav.previous();
    nav.last();
    assert_eq!(nav.position(), 0);
    assert!(!nav.jump_to("1:1"));
  }

  #[test]
  fn test_load_resets_position() {
    let mut nav = sequential();
    nav.load_deck(deck_with_word_counts(1, &[5]));
    nav.last();
    nav.load_deck(deck_with_word_counts(2, &[3]));
    assert_eq!(nav.position(), 0);
    assert_eq!(nav.order(), &[0, 1, 2]);
  }

  #[test]
  fn test_set_mode_resets_position_and_keeps_deck() {
    let mut nav = sequential();
    nav.load_deck(deck_with_word_counts(1, &[10]));
    nav.last();

    nav.set_mode(TraversalMode::Random);
    assert_eq!(nav.position(), 0);
    assert_eq!(nav.deck().len(), 10);
    let mut sorted = nav.order().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..10).collect::<Vec<_>>());

    nav.next();
    nav.set_mode(TraversalMode::Sequential);
    assert_eq!(nav.position(), 0);
    assert_eq!(nav.order(), (0..10).collect::<Vec<_>>().as_slice());
  }

  #[test]
  fn test_random_redraw_stays_in_bounds() {
    let mut nav = Navigator::seeded(TraversalMode::Random, RandomStep::Redraw, 3);
    nav.load_deck(deck_with_word_counts(1, &[4, 4]));
    for _ in 0..200 {
      nav.next();
      assert!(nav.position() < 8);
      nav.previous();
      assert!(nav.position() < 8);
      assert!(nav.current().is_some());
    }
  }

  #[test]
  fn test_random_walk_visits_every_card_before_repeating() {
    let mut nav = Navigator::seeded(TraversalMode::Random, RandomStep::ShuffledWalk, 3);
    nav.load_deck(deck_with_word_counts(1, &[3, 3]));

    let mut seen = std::collections::HashSet::new();
    for _ in 0..6 {
      assert!(seen.insert(nav.current().unwrap().word.word_id.clone()));
      nav.next();
    }
    assert_eq!(nav.position(), 0);

    nav.previous();
    assert_eq!(nav.position(), 5);
  }

  #[test]
  fn test_jump_to() {
    let mut nav = sequential();
    nav.load_deck(deck_with_word_counts(2, &[1, 3]));

    assert!(nav.jump_to("2:2"));
    assert_eq!(nav.current().unwrap().word.word_id, "2:2:1");
    assert!(nav.jump_to("2.2.3"));
    assert_eq!(nav.current().unwrap().word.word_id, "2:2:3");
  }

  #[test]
  fn test_jump_to_miss_leaves_position() {
    let mut nav = sequential();
    nav.load_deck(deck_with_word_counts(2, &[1, 3]));
    nav.next();

    assert!(!nav.jump_to("999:1"));
    assert_eq!(nav.position(), 1);
    assert!(!nav.jump_to("not a locator"));
    assert_eq!(nav.position(), 1);
  }

  #[test]
  fn test_jump_in_random_mode_uses_order_position() {
    let mut nav = Navigator::seeded(TraversalMode::Random, RandomStep::Redraw, 99);
    nav.load_deck(deck_with_word_counts(2, &[4, 4]));

    assert!(nav.jump_to("2:2:3"));
    assert_eq!(nav.current().unwrap().word.word_id, "2:2:3");
  }

  #[test]
  fn test_stale_load_is_discarded() {
    let mut nav = sequential();
    let first = nav.begin_load();
    let second = nav.begin_load();

    assert!(nav.finish_load(second, deck_with_word_counts(1, &[2])));
    assert!(!nav.finish_load(first, deck_with_word_counts(9, &[7])));
    assert_eq!(nav.len(), 2);
    assert_eq!(nav.current().unwrap().ayah.ayah_id, "1:1");
  }

  #[test]
  fn test_pending_load_keeps_previous_deck() {
    let mut nav = sequential();
    nav.load_deck(deck_with_word_counts(1, &[3]));
    nav.next();

    let ticket = nav.begin_load();
    nav.next();
    assert_eq!(nav.position(), 2);
    assert_eq!(nav.len(), 3);

    assert!(nav.finish_load(ticket, deck_with_word_counts(2, &[1])));
    assert_eq!(nav.position(), 0);
    assert_eq!(nav.len(), 1);
  }
}
