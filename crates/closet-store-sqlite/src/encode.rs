//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that they sort
//! lexicographically. Calendar dates are `YYYY-MM-DD`. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use closet_core::{
  outfit::{ClothingCategory, ClothingItem, Outfit, Season},
  wear::WearRecord,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── ClothingCategory ─────────────────────────────────────────────────────────

pub fn encode_category(c: ClothingCategory) -> &'static str {
  match c {
    ClothingCategory::Top => "top",
    ClothingCategory::Bottom => "bottom",
    ClothingCategory::Outer => "outer",
    ClothingCategory::Dress => "dress",
    ClothingCategory::Shoes => "shoes",
    ClothingCategory::Accessory => "accessory",
  }
}

pub fn decode_category(s: &str) -> Result<ClothingCategory> {
  match s {
    "top" => Ok(ClothingCategory::Top),
    "bottom" => Ok(ClothingCategory::Bottom),
    "outer" => Ok(ClothingCategory::Outer),
    "dress" => Ok(ClothingCategory::Dress),
    "shoes" => Ok(ClothingCategory::Shoes),
    "accessory" => Ok(ClothingCategory::Accessory),
    other => Err(closet_core::Error::UnknownCategory(other.to_owned()).into()),
  }
}

// ─── Season ───────────────────────────────────────────────────────────────────

pub fn encode_season(s: Season) -> &'static str {
  match s {
    Season::Spring => "spring",
    Season::Summer => "summer",
    Season::Fall => "fall",
    Season::Winter => "winter",
    Season::All => "all",
  }
}

pub fn decode_season(s: &str) -> Result<Season> {
  match s {
    "spring" => Ok(Season::Spring),
    "summer" => Ok(Season::Summer),
    "fall" => Ok(Season::Fall),
    "winter" => Ok(Season::Winter),
    "all" => Ok(Season::All),
    other => Err(closet_core::Error::UnknownSeason(other.to_owned()).into()),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const OUTFIT_COLUMNS: &str = "o.outfit_id, o.user_id, o.image_url, \
  o.season, o.style, o.is_favorite, o.is_archived, o.created_at, o.updated_at";

/// Raw values read directly from an `outfits` row.
pub struct RawOutfit {
  pub outfit_id:   String,
  pub user_id:     String,
  pub image_url:   String,
  pub season:      Option<String>,
  pub style:       Option<String>,
  pub is_favorite: bool,
  pub is_archived: bool,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawOutfit {
  /// Read a row selected with [`OUTFIT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      outfit_id:   row.get(0)?,
      user_id:     row.get(1)?,
      image_url:   row.get(2)?,
      season:      row.get(3)?,
      style:       row.get(4)?,
      is_favorite: row.get(5)?,
      is_archived: row.get(6)?,
      created_at:  row.get(7)?,
      updated_at:  row.get(8)?,
    })
  }

  pub fn into_outfit(self) -> Result<Outfit> {
    Ok(Outfit {
      outfit_id:   decode_uuid(&self.outfit_id)?,
      user_id:     decode_uuid(&self.user_id)?,
      image_url:   self.image_url,
      season:      self.season.as_deref().map(decode_season).transpose()?,
      style:       self.style,
      is_favorite: self.is_favorite,
      is_archived: self.is_archived,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const ITEM_COLUMNS: &str = "i.item_id, i.outfit_id, i.category, i.color, \
  i.item_type, i.has_item, i.created_at";

/// Raw values read directly from a `clothing_items` row.
pub struct RawItem {
  pub item_id:    String,
  pub outfit_id:  String,
  pub category:   String,
  pub color:      String,
  pub item_type:  String,
  pub has_item:   bool,
  pub created_at: String,
}

impl RawItem {
  /// Read a row selected with [`ITEM_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      item_id:    row.get(0)?,
      outfit_id:  row.get(1)?,
      category:   row.get(2)?,
      color:      row.get(3)?,
      item_type:  row.get(4)?,
      has_item:   row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn into_item(self) -> Result<ClothingItem> {
    Ok(ClothingItem {
      item_id:    decode_uuid(&self.item_id)?,
      outfit_id:  decode_uuid(&self.outfit_id)?,
      category:   decode_category(&self.category)?,
      color:      self.color,
      item_type:  self.item_type,
      has_item:   self.has_item,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const WEAR_COLUMNS: &str =
  "w.wear_id, w.outfit_id, w.user_id, w.worn_date, w.created_at";

/// Raw values read directly from a `wear_history` row.
pub struct RawWear {
  pub wear_id:    String,
  pub outfit_id:  String,
  pub user_id:    String,
  pub worn_date:  String,
  pub created_at: String,
}

impl RawWear {
  /// Read a row selected with [`WEAR_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      wear_id:    row.get(0)?,
      outfit_id:  row.get(1)?,
      user_id:    row.get(2)?,
      worn_date:  row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<WearRecord> {
    Ok(WearRecord {
      wear_id:    decode_uuid(&self.wear_id)?,
      outfit_id:  decode_uuid(&self.outfit_id)?,
      user_id:    decode_uuid(&self.user_id)?,
      worn_date:  decode_date(&self.worn_date)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
