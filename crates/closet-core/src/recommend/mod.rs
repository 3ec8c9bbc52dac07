//! The "what to wear today" recommender.
//!
//! A recommendation run is read-only and best-effort: it loads the user's
//! collection from an [`OutfitStore`], derives wear statistics, applies the
//! requested filters and returns a random selection. Store failures are
//! logged and produce an empty list rather than an error.

pub mod filter;
pub mod select;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  store::{OutfitQuery, OutfitStore},
  view::{OutfitWithStats, with_stats},
  weather::{Location, WeatherSnapshot, WeatherSource},
};

pub use filter::{Warmth, filter_by_weather, filter_recently_worn};
pub use select::{pick, shuffle};

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Tunable thresholds for the filters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecommendPolicy {
  /// Below this temperature (°C) only outfits with an outer layer qualify.
  pub cold_below:         f64,
  /// Above this temperature (°C) outfits with an outer layer are dropped.
  pub hot_above:          f64,
  /// Outfits worn within this many days of today are skipped when
  /// [`RecommendFilters::exclude_worn_recently`] is set.
  pub recent_window_days: u32,
}

impl Default for RecommendPolicy {
  fn default() -> Self {
    Self { cold_below: 10.0, hot_above: 28.0, recent_window_days: 2 }
  }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// Which filters to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RecommendFilters {
  #[serde(default)]
  pub exclude_worn_recently: bool,
  #[serde(default)]
  pub match_weather:         bool,
  #[serde(default)]
  pub favorite_only:         bool,
}

/// Input to [`Recommender::recommend`].
#[derive(Debug, Clone)]
pub struct RecommendRequest {
  pub user_id: Uuid,
  pub filters: RecommendFilters,
  /// Ignored unless `filters.match_weather` is set.
  pub weather: Option<WeatherSnapshot>,
  /// Upper bound on the number of outfits returned.
  pub count:   usize,
  /// The date recency is measured from; defaults to the current UTC date.
  pub today:   Option<NaiveDate>,
}

impl RecommendRequest {
  pub fn new(user_id: Uuid, count: usize) -> Self {
    Self {
      user_id,
      filters: RecommendFilters::default(),
      weather: None,
      count,
      today: None,
    }
  }
}

// ─── Recommender ─────────────────────────────────────────────────────────────

/// Picks outfits for a user from an [`OutfitStore`].
pub struct Recommender<S> {
  store:  Arc<S>,
  policy: RecommendPolicy,
}

impl<S> Clone for Recommender<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), policy: self.policy.clone() }
  }
}

impl<S: OutfitStore> Recommender<S> {
  pub fn new(store: Arc<S>, policy: RecommendPolicy) -> Self {
    Self { store, policy }
  }

  pub fn policy(&self) -> &RecommendPolicy { &self.policy }

  /// Produce up to `request.count` of the user's non-archived outfits.
  ///
  /// Never fails: a store error is logged and yields an empty list. Fewer
  /// results than requested is a normal outcome.
  pub async fn recommend<R>(
    &self,
    request: &RecommendRequest,
    rng: &mut R,
  ) -> Vec<OutfitWithStats>
  where
    R: Rng + ?Sized,
  {
    let query = OutfitQuery {
      user_id:       request.user_id,
      archived:      false,
      favorite_only: request.filters.favorite_only,
    };

    let raws = match self.store.list_outfits(query).await {
      Ok(raws) => raws,
      Err(e) => {
        tracing::warn!(user_id = %request.user_id, error = %e, "failed to load outfits for recommendation");
        return Vec::new();
      }
    };

    let candidates = self.narrow(with_stats(raws), request);
    pick(candidates, request.count, rng)
  }

  /// Apply the recency and weather filters selected in `request`.
  fn narrow(
    &self,
    mut candidates: Vec<OutfitWithStats>,
    request: &RecommendRequest,
  ) -> Vec<OutfitWithStats> {
    tracing::debug!(candidates = candidates.len(), "loaded outfits");

    if request.filters.exclude_worn_recently {
      let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
      candidates = filter_recently_worn(
        candidates,
        today,
        self.policy.recent_window_days,
      );
      tracing::debug!(candidates = candidates.len(), %today, "after recency filter");
    }

    if request.filters.match_weather
      && let Some(weather) = &request.weather
    {
      candidates =
        filter_by_weather(candidates, weather.temperature, &self.policy);
      tracing::debug!(
        candidates = candidates.len(),
        temperature = weather.temperature,
        "after weather filter"
      );
    }

    candidates
  }
}

// ─── Weather ─────────────────────────────────────────────────────────────────

/// Ask `source` for the current weather, degrading any failure to `None`
/// so that weather matching becomes a no-op.
pub async fn resolve_weather<W>(
  source: &W,
  location: &Location,
) -> Option<WeatherSnapshot>
where
  W: WeatherSource,
{
  match source.current(location).await {
    Ok(snapshot) => Some(snapshot),
    Err(e) => {
      tracing::warn!(?location, error = %e, "weather lookup failed; ignoring weather");
      None
    }
  }
}
