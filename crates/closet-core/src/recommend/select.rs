//! Random selection of recommendation candidates.

use rand::Rng;

/// In-place Fisher–Yates shuffle driven by `rng`.
///
/// Every permutation is equally likely provided `rng` is uniform.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
  R: Rng + ?Sized,
{
  for i in (1..items.len()).rev() {
    let j = rng.random_range(0..=i);
    items.swap(i, j);
  }
}

/// Shuffle `items` and keep the first `count`.
///
/// Returns everything (shuffled) when `items.len() <= count`.
pub fn pick<T, R>(mut items: Vec<T>, count: usize, rng: &mut R) -> Vec<T>
where
  R: Rng + ?Sized,
{
  shuffle(&mut items, rng);
  items.truncate(count);
  items
}
