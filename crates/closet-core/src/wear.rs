//! Wear history and its aggregation.
//!
//! A wear record states that an outfit was worn on a calendar date. Wear
//! counts and last-worn dates are never stored; they are folded from the
//! records on every read.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single "worn on" fact. At most one exists per `(outfit_id, worn_date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WearRecord {
  pub wear_id:    Uuid,
  pub outfit_id:  Uuid,
  pub user_id:    Uuid,
  pub worn_date:  NaiveDate,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::OutfitStore::record_wear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewWearRecord {
  pub outfit_id: Uuid,
  pub user_id:   Uuid,
  pub worn_date: NaiveDate,
}

/// Aggregated wear statistics for one outfit.
///
/// The `Default` value (`count == 0`, no last-worn date) is what callers use
/// for outfits absent from an aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WearStats {
  pub count:     u32,
  pub last_worn: Option<NaiveDate>,
}

impl WearStats {
  fn observe(&mut self, worn_date: NaiveDate) {
    self.count += 1;
    if self.last_worn.is_none_or(|current| worn_date > current) {
      self.last_worn = Some(worn_date);
    }
  }
}

/// Fold `(outfit_id, worn_date)` pairs into per-outfit [`WearStats`].
///
/// Outfits with no records do not appear in the map.
pub fn aggregate_wear<I>(records: I) -> HashMap<Uuid, WearStats>
where
  I: IntoIterator<Item = (Uuid, NaiveDate)>,
{
  let mut stats: HashMap<Uuid, WearStats> = HashMap::new();
  for (outfit_id, worn_date) in records {
    stats.entry(outfit_id).or_default().observe(worn_date);
  }
  stats
}

/// [`aggregate_wear`] over full [`WearRecord`]s.
pub fn aggregate_records<'a, I>(records: I) -> HashMap<Uuid, WearStats>
where
  I: IntoIterator<Item = &'a WearRecord>,
{
  aggregate_wear(records.into_iter().map(|r| (r.outfit_id, r.worn_date)))
}
