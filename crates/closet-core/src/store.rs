//! The `OutfitStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `closet-store-sqlite`).
//! Higher layers (`closet-api`, the recommender) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Error,
  outfit::{NewOutfit, Outfit, OutfitPatch},
  view::OutfitWithHistory,
  wear::{NewWearRecord, WearRecord},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`OutfitStore::list_outfits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutfitQuery {
  pub user_id:       Uuid,
  /// Select the archive view instead of the collection view.
  pub archived:      bool,
  /// Restrict to outfits flagged as favorites.
  pub favorite_only: bool,
}

impl OutfitQuery {
  /// The user's non-archived collection.
  pub fn collection(user_id: Uuid) -> Self {
    Self { user_id, archived: false, favorite_only: false }
  }

  /// The user's archive (retired outfits and wishlist entries).
  pub fn archive(user_id: Uuid) -> Self {
    Self { user_id, archived: true, favorite_only: false }
  }
}

// ─── Error classification ────────────────────────────────────────────────────

/// Lets callers recognise domain conditions (not-found, conflict) without
/// knowing which backend produced the error.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error underneath, if this failure is one.
  fn as_core(&self) -> Option<&Error>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Closet outfit store backend.
///
/// Reads return raw rows ([`OutfitWithHistory`]); wear statistics are always
/// derived by the caller, never stored.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait OutfitStore: Send + Sync {
  type Error: StoreError;

  // ── Outfits ─────────────────────────────────────────────────────────────

  /// Persist a new outfit together with its clothing items.
  ///
  /// Returns [`Error::EmptyImageUrl`] (wrapped) if the input fails
  /// [`NewOutfit::validate`].
  fn create_outfit(
    &self,
    input: NewOutfit,
  ) -> impl Future<Output = Result<OutfitWithHistory, Self::Error>> + Send + '_;

  /// Retrieve one of `user_id`'s outfits. Returns `None` if it does not exist
  /// or belongs to someone else.
  fn get_outfit(
    &self,
    user_id: Uuid,
    outfit_id: Uuid,
  ) -> impl Future<Output = Result<Option<OutfitWithHistory>, Self::Error>> + Send + '_;

  /// List outfits matching `query`, newest first, each with its items and
  /// full wear history.
  fn list_outfits(
    &self,
    query: OutfitQuery,
  ) -> impl Future<Output = Result<Vec<OutfitWithHistory>, Self::Error>> + Send + '_;

  /// Apply `patch` to one of `user_id`'s outfits and bump `updated_at`.
  ///
  /// Returns [`Error::OutfitNotFound`] (wrapped) if there is no such outfit.
  fn update_outfit(
    &self,
    user_id: Uuid,
    outfit_id: Uuid,
    patch: OutfitPatch,
  ) -> impl Future<Output = Result<Outfit, Self::Error>> + Send + '_;

  /// Delete an outfit, cascading to its items and wear history.
  /// Returns `false` if nothing was deleted.
  fn delete_outfit(
    &self,
    user_id: Uuid,
    outfit_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Wear history ────────────────────────────────────────────────────────

  /// Record that an outfit was worn on a date.
  ///
  /// Returns [`Error::OutfitNotFound`] (wrapped) if the outfit does not belong
  /// to the user, and [`Error::AlreadyWorn`] (wrapped) if a record for the
  /// same outfit and date already exists.
  fn record_wear(
    &self,
    input: NewWearRecord,
  ) -> impl Future<Output = Result<WearRecord, Self::Error>> + Send + '_;

  /// Wear records for one of `user_id`'s outfits, most recent date first.
  fn list_wear(
    &self,
    user_id: Uuid,
    outfit_id: Uuid,
  ) -> impl Future<Output = Result<Vec<WearRecord>, Self::Error>> + Send + '_;
}
