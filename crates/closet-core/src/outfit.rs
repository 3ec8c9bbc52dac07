//! Outfit and clothing-item types.
//!
//! An outfit is a single saved clothing combination, represented primarily by
//! one image. Its clothing items are either detected by an external vision
//! model or declared by the user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// The slot a clothing item fills in an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingCategory {
  Top,
  Bottom,
  /// Coats, jackets, cardigans. Drives the weather filter.
  Outer,
  Dress,
  Shoes,
  Accessory,
}

/// Season tag attached to an outfit.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Season {
  Spring,
  Summer,
  Fall,
  Winter,
  #[default]
  All,
}

// ─── Outfit ──────────────────────────────────────────────────────────────────

/// A saved outfit owned by one user.
///
/// Archived and non-archived outfits live in the same table; `is_archived`
/// splits them into the collection and archive views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
  pub outfit_id:   Uuid,
  pub user_id:     Uuid,
  pub image_url:   String,
  pub season:      Option<Season>,
  pub style:       Option<String>,
  pub is_favorite: bool,
  pub is_archived: bool,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

// ─── ClothingItem ────────────────────────────────────────────────────────────

/// One garment or accessory belonging to an outfit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
  pub item_id:    Uuid,
  pub outfit_id:  Uuid,
  pub category:   ClothingCategory,
  pub color:      String,
  /// Free-form description, e.g. "カーディガン" or "chelsea boots".
  pub item_type:  String,
  /// `true` once the user confirms they own the item; AI-detected items start
  /// out `false`.
  pub has_item:   bool,
  pub created_at: DateTime<Utc>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// A clothing item supplied when creating an outfit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClothingItem {
  pub category:  ClothingCategory,
  pub color:     String,
  pub item_type: String,
  #[serde(default)]
  pub has_item:  bool,
}

/// Input to [`crate::store::OutfitStore::create_outfit`].
/// Ids and timestamps are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewOutfit {
  pub user_id:     Uuid,
  pub image_url:   String,
  pub season:      Option<Season>,
  pub style:       Option<String>,
  /// Wishlist entries are created directly in the archive.
  pub is_archived: bool,
  pub items:       Vec<NewClothingItem>,
}

impl NewOutfit {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(user_id: Uuid, image_url: impl Into<String>) -> Self {
    Self {
      user_id,
      image_url: image_url.into(),
      season: None,
      style: None,
      is_archived: false,
      items: Vec::new(),
    }
  }

  pub fn with_item(mut self, item: NewClothingItem) -> Self {
    self.items.push(item);
    self
  }

  /// Reject inputs the store must never persist.
  pub fn validate(&self) -> Result<()> {
    if self.image_url.trim().is_empty() {
      return Err(Error::EmptyImageUrl);
    }
    Ok(())
  }
}

/// A partial update to an outfit's flags and tags. `None` leaves the field
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitPatch {
  pub is_favorite: Option<bool>,
  pub is_archived: Option<bool>,
  pub season:      Option<Season>,
  /// `Some(None)` (JSON `"style": null`) clears the tag.
  #[serde(
    default,
    deserialize_with = "present",
    skip_serializing_if = "Option::is_none"
  )]
  pub style:       Option<Option<String>>,
}

/// Map a field that is present in the input to `Some`, even when it is
/// `null`. Absent fields fall back to `None` via `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
  D: serde::Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}

impl OutfitPatch {
  pub fn favorite(is_favorite: bool) -> Self {
    Self { is_favorite: Some(is_favorite), ..Self::default() }
  }

  pub fn archived(is_archived: bool) -> Self {
    Self { is_archived: Some(is_archived), ..Self::default() }
  }

  pub fn is_empty(&self) -> bool { self == &Self::default() }
}
