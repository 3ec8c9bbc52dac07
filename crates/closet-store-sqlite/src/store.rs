//! [`SqliteStore`], the SQLite implementation of [`OutfitStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use closet_core::{
  outfit::{ClothingItem, NewOutfit, Outfit, OutfitPatch},
  store::{OutfitQuery, OutfitStore},
  view::OutfitWithHistory,
  wear::{NewWearRecord, WearRecord},
};
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    ITEM_COLUMNS, OUTFIT_COLUMNS, RawItem, RawOutfit, RawWear, WEAR_COLUMNS,
    encode_category, encode_date, encode_dt, encode_season, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Selection ───────────────────────────────────────────────────────────────

/// Which outfits a read loads. Rendered as a `WHERE` clause over alias `o`.
enum Scope {
  Query(OutfitQuery),
  One { user_id: Uuid, outfit_id: Uuid },
}

impl Scope {
  fn where_clause(&self) -> &'static str {
    match self {
      Scope::Query(_) => {
        "o.user_id = ?1 AND o.is_archived = ?2 AND (?3 = 0 OR o.is_favorite = 1)"
      }
      Scope::One { .. } => "o.user_id = ?1 AND o.outfit_id = ?2",
    }
  }

  fn params(&self) -> Vec<Value> {
    match self {
      Scope::Query(q) => vec![
        Value::Text(encode_uuid(q.user_id)),
        Value::Integer(i64::from(q.archived)),
        Value::Integer(i64::from(q.favorite_only)),
      ],
      Scope::One { user_id, outfit_id } => vec![
        Value::Text(encode_uuid(*user_id)),
        Value::Text(encode_uuid(*outfit_id)),
      ],
    }
  }
}

/// Result of a wear insertion attempt, decided inside one database call.
enum WearInsert {
  Inserted,
  Duplicate,
  OutfitMissing,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Closet outfit store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Load outfits in `scope` together with their items and wear history,
  /// newest outfit first.
  async fn load(&self, scope: Scope) -> Result<Vec<OutfitWithHistory>> {
    let where_clause = scope.where_clause();
    let params = scope.params();

    let (raw_outfits, raw_items, raw_wear) = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {OUTFIT_COLUMNS} FROM outfits o
           WHERE {where_clause}
           ORDER BY o.created_at DESC, o.rowid DESC"
        ))?;
        let outfits = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawOutfit::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {ITEM_COLUMNS} FROM clothing_items i
           JOIN outfits o ON o.outfit_id = i.outfit_id
           WHERE {where_clause}
           ORDER BY i.rowid"
        ))?;
        let items = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {WEAR_COLUMNS} FROM wear_history w
           JOIN outfits o ON o.outfit_id = w.outfit_id
           WHERE {where_clause}
           ORDER BY w.worn_date DESC"
        ))?;
        let wear = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawWear::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((outfits, items, wear))
      })
      .await?;

    let mut items_by_outfit: HashMap<Uuid, Vec<ClothingItem>> = HashMap::new();
    for raw in raw_items {
      let item = raw.into_item()?;
      items_by_outfit.entry(item.outfit_id).or_default().push(item);
    }

    let mut wear_by_outfit: HashMap<Uuid, Vec<WearRecord>> = HashMap::new();
    for raw in raw_wear {
      let record = raw.into_record()?;
      wear_by_outfit.entry(record.outfit_id).or_default().push(record);
    }

    raw_outfits
      .into_iter()
      .map(|raw| {
        let outfit = raw.into_outfit()?;
        let id = outfit.outfit_id;
        Ok(OutfitWithHistory {
          outfit,
          items: items_by_outfit.remove(&id).unwrap_or_default(),
          wear: wear_by_outfit.remove(&id).unwrap_or_default(),
        })
      })
      .collect()
  }
}

// ─── OutfitStore impl ────────────────────────────────────────────────────────

impl OutfitStore for SqliteStore {
  type Error = Error;

  // ── Outfits ───────────────────────────────────────────────────────────────

  async fn create_outfit(&self, input: NewOutfit) -> Result<OutfitWithHistory> {
    input.validate()?;

    let now = Utc::now();
    let outfit = Outfit {
      outfit_id:   Uuid::new_v4(),
      user_id:     input.user_id,
      image_url:   input.image_url,
      season:      Some(input.season.unwrap_or_default()),
      style:       input.style,
      is_favorite: false,
      is_archived: input.is_archived,
      created_at:  now,
      updated_at:  now,
    };
    let items: Vec<ClothingItem> = input
      .items
      .into_iter()
      .map(|i| ClothingItem {
        item_id:    Uuid::new_v4(),
        outfit_id:  outfit.outfit_id,
        category:   i.category,
        color:      i.color,
        item_type:  i.item_type,
        has_item:   i.has_item,
        created_at: now,
      })
      .collect();

    let outfit_id_str = encode_uuid(outfit.outfit_id);
    let user_id_str   = encode_uuid(outfit.user_id);
    let image_url     = outfit.image_url.clone();
    let season_str    = outfit.season.map(encode_season);
    let style         = outfit.style.clone();
    let is_archived   = outfit.is_archived;
    let at_str        = encode_dt(now);
    let item_rows: Vec<(String, &'static str, String, String, bool)> = items
      .iter()
      .map(|i| {
        (
          encode_uuid(i.item_id),
          encode_category(i.category),
          i.color.clone(),
          i.item_type.clone(),
          i.has_item,
        )
      })
      .collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO outfits (
             outfit_id, user_id, image_url, season, style,
             is_favorite, is_archived, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7, ?7)",
          rusqlite::params![
            outfit_id_str,
            user_id_str,
            image_url,
            season_str,
            style,
            is_archived,
            at_str,
          ],
        )?;
        for (item_id, category, color, item_type, has_item) in &item_rows {
          tx.execute(
            "INSERT INTO clothing_items (
               item_id, outfit_id, category, color, item_type, has_item, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
              item_id,
              outfit_id_str,
              category,
              color,
              item_type,
              has_item,
              at_str,
            ],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(OutfitWithHistory { outfit, items, wear: Vec::new() })
  }

  async fn get_outfit(
    &self,
    user_id:   Uuid,
    outfit_id: Uuid,
  ) -> Result<Option<OutfitWithHistory>> {
    let mut found = self.load(Scope::One { user_id, outfit_id }).await?;
    Ok(found.pop())
  }

  async fn list_outfits(&self, query: OutfitQuery) -> Result<Vec<OutfitWithHistory>> {
    self.load(Scope::Query(query)).await
  }

  async fn update_outfit(
    &self,
    user_id:   Uuid,
    outfit_id: Uuid,
    patch:     OutfitPatch,
  ) -> Result<Outfit> {
    let outfit_id_str = encode_uuid(outfit_id);
    let user_id_str   = encode_uuid(user_id);
    let is_favorite   = patch.is_favorite;
    let is_archived   = patch.is_archived;
    let season_str    = patch.season.map(encode_season);
    let set_style     = patch.style.is_some();
    let style         = patch.style.flatten();
    let at_str        = encode_dt(Utc::now());

    let raw: Option<RawOutfit> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE outfits SET
             is_favorite = COALESCE(?3, is_favorite),
             is_archived = COALESCE(?4, is_archived),
             season      = COALESCE(?5, season),
             style       = CASE WHEN ?6 THEN ?7 ELSE style END,
             updated_at  = ?8
           WHERE outfit_id = ?1 AND user_id = ?2",
          rusqlite::params![
            outfit_id_str,
            user_id_str,
            is_favorite,
            is_archived,
            season_str,
            set_style,
            style,
            at_str,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = conn.query_row(
          &format!("SELECT {OUTFIT_COLUMNS} FROM outfits o WHERE o.outfit_id = ?1"),
          rusqlite::params![outfit_id_str],
          RawOutfit::from_row,
        )?;
        Ok(Some(raw))
      })
      .await?;

    raw
      .ok_or(closet_core::Error::OutfitNotFound(outfit_id))?
      .into_outfit()
  }

  async fn delete_outfit(&self, user_id: Uuid, outfit_id: Uuid) -> Result<bool> {
    let outfit_id_str = encode_uuid(outfit_id);
    let user_id_str   = encode_uuid(user_id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM outfits WHERE outfit_id = ?1 AND user_id = ?2",
          rusqlite::params![outfit_id_str, user_id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Wear history ──────────────────────────────────────────────────────────

  async fn record_wear(&self, input: NewWearRecord) -> Result<WearRecord> {
    let record = WearRecord {
      wear_id:    Uuid::new_v4(),
      outfit_id:  input.outfit_id,
      user_id:    input.user_id,
      worn_date:  input.worn_date,
      created_at: Utc::now(),
    };

    let wear_id_str   = encode_uuid(record.wear_id);
    let outfit_id_str = encode_uuid(record.outfit_id);
    let user_id_str   = encode_uuid(record.user_id);
    let date_str      = encode_date(record.worn_date);
    let at_str        = encode_dt(record.created_at);

    let outcome = self
      .conn
      .call(move |conn| {
        let owned = conn
          .query_row(
            "SELECT 1 FROM outfits WHERE outfit_id = ?1 AND user_id = ?2",
            rusqlite::params![outfit_id_str, user_id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !owned {
          return Ok(WearInsert::OutfitMissing);
        }

        let inserted = conn.execute(
          "INSERT INTO wear_history (wear_id, outfit_id, user_id, worn_date, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![wear_id_str, outfit_id_str, user_id_str, date_str, at_str],
        );
        match inserted {
          Ok(_) => Ok(WearInsert::Inserted),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
          {
            Ok(WearInsert::Duplicate)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match outcome {
      WearInsert::Inserted => Ok(record),
      WearInsert::Duplicate => {
        tracing::debug!(outfit_id = %record.outfit_id, worn_date = %record.worn_date, "duplicate wear record rejected");
        Err(Error::Core(closet_core::Error::AlreadyWorn {
          outfit_id: record.outfit_id,
          worn_date: record.worn_date,
        }))
      }
      WearInsert::OutfitMissing => {
        Err(Error::Core(closet_core::Error::OutfitNotFound(record.outfit_id)))
      }
    }
  }

  async fn list_wear(&self, user_id: Uuid, outfit_id: Uuid) -> Result<Vec<WearRecord>> {
    let outfit_id_str = encode_uuid(outfit_id);
    let user_id_str   = encode_uuid(user_id);

    let raws: Vec<RawWear> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {WEAR_COLUMNS} FROM wear_history w
           JOIN outfits o ON o.outfit_id = w.outfit_id
           WHERE o.outfit_id = ?1 AND o.user_id = ?2
           ORDER BY w.worn_date DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![outfit_id_str, user_id_str], RawWear::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawWear::into_record).collect()
  }
}
