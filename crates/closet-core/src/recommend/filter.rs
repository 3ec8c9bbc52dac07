//! Candidate filters: recency and weather.

use chrono::{Days, NaiveDate};

use super::RecommendPolicy;
use crate::view::OutfitWithStats;

// ─── Recency ─────────────────────────────────────────────────────────────────

/// Keep outfits that were never worn, or last worn strictly before
/// `today - window_days`.
pub fn filter_recently_worn(
  mut candidates: Vec<OutfitWithStats>,
  today: NaiveDate,
  window_days: u32,
) -> Vec<OutfitWithStats> {
  let cutoff = today
    .checked_sub_days(Days::new(u64::from(window_days)))
    .unwrap_or(NaiveDate::MIN);
  candidates.retain(|o| o.last_worn.is_none_or(|worn| worn < cutoff));
  candidates
}

// ─── Weather ─────────────────────────────────────────────────────────────────

/// How a temperature is bucketed by [`RecommendPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warmth {
  /// Below `cold_below`: an outer layer is required.
  Cold,
  Mild,
  /// Above `hot_above`: an outer layer is excluded.
  Hot,
}

impl RecommendPolicy {
  pub fn warmth(&self, temperature: f64) -> Warmth {
    if temperature < self.cold_below {
      Warmth::Cold
    } else if temperature > self.hot_above {
      Warmth::Hot
    } else {
      Warmth::Mild
    }
  }
}

/// Keep outfits suited to `temperature`.
///
/// If no candidate would survive, the unfiltered list is returned instead:
/// a weather mismatch alone never empties the result.
pub fn filter_by_weather(
  candidates: Vec<OutfitWithStats>,
  temperature: f64,
  policy: &RecommendPolicy,
) -> Vec<OutfitWithStats> {
  let keep_outer = match policy.warmth(temperature) {
    Warmth::Mild => return candidates,
    Warmth::Cold => true,
    Warmth::Hot => false,
  };

  if !candidates.iter().any(|o| o.has_outer() == keep_outer) {
    tracing::debug!(
      temperature,
      candidates = candidates.len(),
      "weather filter would drop every outfit; keeping all"
    );
    return candidates;
  }

  candidates
    .into_iter()
    .filter(|o| o.has_outer() == keep_outer)
    .collect()
}
