//! Read models for outfits.
//!
//! Stores return [`OutfitWithHistory`], the raw rows for an outfit. Wear
//! statistics are computed at query time by folding the history, producing
//! an [`OutfitWithStats`] that is never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  outfit::{ClothingCategory, ClothingItem, Outfit},
  wear::{WearRecord, aggregate_records},
};

// ─── Raw read shape ──────────────────────────────────────────────────────────

/// An outfit joined with its clothing items and full wear history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitWithHistory {
  pub outfit: Outfit,
  pub items:  Vec<ClothingItem>,
  pub wear:   Vec<WearRecord>,
}

// ─── Materialised view ───────────────────────────────────────────────────────

/// The computed read model for an outfit. Never stored, always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitWithStats {
  #[serde(flatten)]
  pub outfit:     Outfit,
  pub items:      Vec<ClothingItem>,
  /// Number of wear records for this outfit.
  pub wear_count: u32,
  /// Most recent `worn_date`, if the outfit was ever worn.
  pub last_worn:  Option<NaiveDate>,
}

impl OutfitWithStats {
  pub fn outfit_id(&self) -> Uuid { self.outfit.outfit_id }

  /// Whether any item fills the outer-layer slot.
  pub fn has_outer(&self) -> bool {
    self
      .items
      .iter()
      .any(|item| item.category == ClothingCategory::Outer)
  }
}

impl From<OutfitWithHistory> for OutfitWithStats {
  fn from(raw: OutfitWithHistory) -> Self {
    let stats = aggregate_records(&raw.wear)
      .remove(&raw.outfit.outfit_id)
      .unwrap_or_default();
    Self {
      outfit:     raw.outfit,
      items:      raw.items,
      wear_count: stats.count,
      last_worn:  stats.last_worn,
    }
  }
}

/// Attach wear statistics to every outfit.
///
/// The history of all outfits is aggregated in one pass; records whose
/// `outfit_id` belongs to a different outfit are not counted.
pub fn with_stats(raws: Vec<OutfitWithHistory>) -> Vec<OutfitWithStats> {
  let stats = aggregate_records(raws.iter().flat_map(|r| r.wear.iter()));
  raws
    .into_iter()
    .map(|raw| {
      let s = stats.get(&raw.outfit.outfit_id).copied().unwrap_or_default();
      OutfitWithStats {
        outfit:     raw.outfit,
        items:      raw.items,
        wear_count: s.count,
        last_worn:  s.last_worn,
      }
    })
    .collect()
}
