//! Traversal order over the flattened sequence.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// How the navigator walks the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
  #[default]
  Sequential,
  Random,
}

impl TraversalMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Sequential => "sequential",
      Self::Random => "random",
    }
  }
}

impl std::fmt::Display for TraversalMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for TraversalMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "sequential" => Ok(Self::Sequential),
      "random" => Ok(Self::Random),
      _ => Err(format!("Invalid traversal mode: {}", s)),
    }
  }
}

/// What next/previous do in random mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomStep {
  /// Every step draws a fresh uniformly random position; repeats are possible.
  #[default]
  Redraw,
  /// Step through the shuffled order with wraparound; no repeats until the
  /// whole deck has been seen.
  ShuffledWalk,
}

impl RandomStep {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Redraw => "redraw",
      Self::ShuffledWalk => "shuffled_walk",
    }
  }
}

impl std::str::FromStr for RandomStep {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().replace('-', "_").as_str() {
      "redraw" => Ok(Self::Redraw),
      "shuffled_walk" | "walk" => Ok(Self::ShuffledWalk),
      _ => Err(format!("Invalid random step policy: {}", s)),
    }
  }
}

/// Build a traversal order of `count` indices for `mode`.
///
/// Sequential mode yields the identity permutation. Random mode shuffles it
/// in place (Fisher-Yates, from the last slot down), so every permutation is
/// equally likely.
pub fn rebuild_order<R: Rng + ?Sized>(mode: TraversalMode, count: usize, rng: &mut R) -> Vec<usize> {
  let mut order: Vec<usize> = (0..count).collect();
  if mode == TraversalMode::Random {
    order.shuffle(rng);
  }
  order
}
