//! SQL schema for the Closet SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS outfits (
    outfit_id   TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    image_url   TEXT NOT NULL,
    season      TEXT,            -- 'spring' | 'summer' | 'fall' | 'winter' | 'all'
    style       TEXT,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    is_archived INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, fixed width
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS clothing_items (
    item_id    TEXT PRIMARY KEY,
    outfit_id  TEXT NOT NULL REFERENCES outfits(outfit_id) ON DELETE CASCADE,
    category   TEXT NOT NULL,    -- 'top' | 'bottom' | 'outer' | 'dress' | 'shoes' | 'accessory'
    color      TEXT NOT NULL,
    item_type  TEXT NOT NULL,
    has_item   INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

-- Wear counts and last-worn dates are derived from this table on read.
CREATE TABLE IF NOT EXISTS wear_history (
    wear_id    TEXT PRIMARY KEY,
    outfit_id  TEXT NOT NULL REFERENCES outfits(outfit_id) ON DELETE CASCADE,
    user_id    TEXT NOT NULL,
    worn_date  TEXT NOT NULL,    -- YYYY-MM-DD
    created_at TEXT NOT NULL,
    UNIQUE (outfit_id, worn_date)
);

CREATE INDEX IF NOT EXISTS outfits_user_idx  ON outfits(user_id, is_archived);
CREATE INDEX IF NOT EXISTS items_outfit_idx  ON clothing_items(outfit_id);
CREATE INDEX IF NOT EXISTS wear_outfit_idx   ON wear_history(outfit_id);

PRAGMA user_version = 1;
";
