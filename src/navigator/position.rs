//! Position arithmetic over a traversal order of length `len`.
//!
//! Positions index into the order, not into the flattened sequence. Every
//! function returns 0 for an empty order.

use rand::Rng;

pub fn first() -> usize {
  0
}

pub fn last(len: usize) -> usize {
  len.saturating_sub(1)
}

/// One step forward, stopping at the last position.
pub fn next_clamped(position: usize, len: usize) -> usize {
  position.saturating_add(1).min(last(len))
}

/// One step back, stopping at the first position.
pub fn previous_clamped(position: usize, len: usize) -> usize {
  position.saturating_sub(1).min(last(len))
}

pub fn next_wrapping(position: usize, len: usize) -> usize {
  if len == 0 {
    return 0;
  }
  (position + 1) % len
}

pub fn previous_wrapping(position: usize, len: usize) -> usize {
  if len == 0 {
    return 0;
  }
  (position % len + len - 1) % len
}

/// A uniformly random position.
pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
  if len == 0 {
    return 0;
  }
  rng.random_range(0..len)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  #[test]
  fn test_last_guards_empty() {
    assert_eq!(last(0), 0);
    assert_eq!(last(1), 0);
    assert_eq!(last(5), 4);
  }

  #[test]
  fn test_next_clamped_reaches_end_and_stays() {
    let len = 4;
    let mut pos = first();
    let mut seen = vec![pos];
    for _ in 0..10 {
      pos = next_clamped(pos, len);
      seen.push(pos);
    }
    assert_eq!(&seen[..5], &[0, 1, 2, 3, 3]);
    assert!(seen.iter().all(|&p| p < len));
    assert_eq!(pos, 3);
  }

  #[test]
  fn test_previous_clamped_stops_at_zero() {
    assert_eq!(previous_clamped(0, 4), 0);
    assert_eq!(previous_clamped(3, 4), 2);
  }

  #[test]
  fn test_clamped_empty_order() {
    assert_eq!(next_clamped(0, 0), 0);
    assert_eq!(previous_clamped(0, 0), 0);
  }

  #[test]
  fn test_wrapping() {
    assert_eq!(next_wrapping(2, 3), 0);
    assert_eq!(next_wrapping(0, 3), 1);
    assert_eq!(previous_wrapping(0, 3), 2);
    assert_eq!(previous_wrapping(2, 3), 1);
    assert_eq!(next_wrapping(0, 0), 0);
    assert_eq!(previous_wrapping(0, 0), 0);
  }

  #[test]
  fn test_random_in_bounds() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..500 {
      assert!(random(7, &mut rng) < 7);
    }
    assert_eq!(random(0, &mut rng), 0);
    assert_eq!(random(1, &mut rng), 0);
  }
}
