//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::NaiveDate;
use closet_core::{
  outfit::{ClothingCategory, NewClothingItem, NewOutfit, OutfitPatch, Season},
  recommend::{RecommendPolicy, RecommendRequest, Recommender},
  store::{OutfitQuery, OutfitStore, StoreError as _},
  wear::NewWearRecord,
};
use rand::{SeedableRng as _, rngs::StdRng};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn item(category: ClothingCategory, item_type: &str) -> NewClothingItem {
  NewClothingItem {
    category,
    color: "navy".to_owned(),
    item_type: item_type.to_owned(),
    has_item: false,
  }
}

fn wear(user_id: Uuid, outfit_id: Uuid, on: &str) -> NewWearRecord {
  NewWearRecord { outfit_id, user_id, worn_date: date(on) }
}

// ─── Outfits ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_outfit() {
  let s = store().await;
  let user = Uuid::new_v4();

  let created = s
    .create_outfit(NewOutfit::new(user, "https://img.example/1.jpg"))
    .await
    .unwrap();
  assert_eq!(created.outfit.user_id, user);
  assert_eq!(created.outfit.season, Some(Season::All));
  assert!(!created.outfit.is_favorite);
  assert!(!created.outfit.is_archived);
  assert!(created.wear.is_empty());

  let fetched = s
    .get_outfit(user, created.outfit.outfit_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.outfit, created.outfit);
}

#[tokio::test]
async fn get_outfit_missing_returns_none() {
  let s = store().await;
  let result = s.get_outfit(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn get_outfit_of_another_user_returns_none() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let created = s
    .create_outfit(NewOutfit::new(owner, "https://img.example/1.jpg"))
    .await
    .unwrap();

  let result = s
    .get_outfit(Uuid::new_v4(), created.outfit.outfit_id)
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn empty_image_url_is_rejected() {
  let s = store().await;
  let err = s
    .create_outfit(NewOutfit::new(Uuid::new_v4(), ""))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(closet_core::Error::EmptyImageUrl)));
}

#[tokio::test]
async fn clothing_items_roundtrip() {
  let s = store().await;
  let user = Uuid::new_v4();

  let input = NewOutfit::new(user, "https://img.example/2.jpg")
    .with_item(item(ClothingCategory::Outer, "カーディガン"))
    .with_item(NewClothingItem {
      has_item: true,
      ..item(ClothingCategory::Shoes, "chelsea boots")
    });
  let created = s.create_outfit(input).await.unwrap();
  assert_eq!(created.items.len(), 2);

  let fetched = s
    .get_outfit(user, created.outfit.outfit_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.items, created.items);
  assert_eq!(fetched.items[0].item_type, "カーディガン");
  assert_eq!(fetched.items[0].category, ClothingCategory::Outer);
  assert!(fetched.items[1].has_item);
}

#[tokio::test]
async fn list_outfits_newest_first() {
  let s = store().await;
  let user = Uuid::new_v4();

  let first = s
    .create_outfit(NewOutfit::new(user, "https://img.example/a.jpg"))
    .await
    .unwrap();
  let second = s
    .create_outfit(NewOutfit::new(user, "https://img.example/b.jpg"))
    .await
    .unwrap();

  let listed = s.list_outfits(OutfitQuery::collection(user)).await.unwrap();
  let ids: Vec<Uuid> = listed.iter().map(|o| o.outfit.outfit_id).collect();
  assert_eq!(ids, vec![second.outfit.outfit_id, first.outfit.outfit_id]);
}

#[tokio::test]
async fn list_outfits_splits_collection_and_archive() {
  let s = store().await;
  let user = Uuid::new_v4();

  s.create_outfit(NewOutfit::new(user, "https://img.example/kept.jpg"))
    .await
    .unwrap();
  let wishlist = NewOutfit {
    is_archived: true,
    ..NewOutfit::new(user, "https://img.example/wish.jpg")
  };
  s.create_outfit(wishlist).await.unwrap();
  s.create_outfit(NewOutfit::new(Uuid::new_v4(), "https://img.example/x.jpg"))
    .await
    .unwrap();

  let collection = s.list_outfits(OutfitQuery::collection(user)).await.unwrap();
  assert_eq!(collection.len(), 1);
  assert_eq!(collection[0].outfit.image_url, "https://img.example/kept.jpg");

  let archive = s.list_outfits(OutfitQuery::archive(user)).await.unwrap();
  assert_eq!(archive.len(), 1);
  assert_eq!(archive[0].outfit.image_url, "https://img.example/wish.jpg");
}

#[tokio::test]
async fn list_outfits_favorite_only() {
  let s = store().await;
  let user = Uuid::new_v4();

  let fav = s
    .create_outfit(NewOutfit::new(user, "https://img.example/fav.jpg"))
    .await
    .unwrap();
  s.create_outfit(NewOutfit::new(user, "https://img.example/plain.jpg"))
    .await
    .unwrap();
  s.update_outfit(user, fav.outfit.outfit_id, OutfitPatch::favorite(true))
    .await
    .unwrap();

  let query = OutfitQuery { favorite_only: true, ..OutfitQuery::collection(user) };
  let listed = s.list_outfits(query).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].outfit.outfit_id, fav.outfit.outfit_id);
}

#[tokio::test]
async fn update_outfit_applies_only_set_fields() {
  let s = store().await;
  let user = Uuid::new_v4();
  let input = NewOutfit {
    style: Some("casual".to_owned()),
    season: Some(Season::Winter),
    ..NewOutfit::new(user, "https://img.example/1.jpg")
  };
  let created = s.create_outfit(input).await.unwrap();

  let updated = s
    .update_outfit(user, created.outfit.outfit_id, OutfitPatch::archived(true))
    .await
    .unwrap();
  assert!(updated.is_archived);
  assert!(!updated.is_favorite);
  assert_eq!(updated.style.as_deref(), Some("casual"));
  assert_eq!(updated.season, Some(Season::Winter));
  assert!(updated.updated_at >= created.outfit.updated_at);

  let collection = s.list_outfits(OutfitQuery::collection(user)).await.unwrap();
  assert!(collection.is_empty());
}

#[tokio::test]
async fn update_outfit_sets_and_clears_style() {
  let s = store().await;
  let user = Uuid::new_v4();
  let id = s
    .create_outfit(NewOutfit::new(user, "https://img.example/1.jpg"))
    .await
    .unwrap()
    .outfit
    .outfit_id;

  let set = OutfitPatch { style: Some(Some("street".to_owned())), ..OutfitPatch::default() };
  let updated = s.update_outfit(user, id, set).await.unwrap();
  assert_eq!(updated.style.as_deref(), Some("street"));

  let updated = s.update_outfit(user, id, OutfitPatch::favorite(true)).await.unwrap();
  assert_eq!(updated.style.as_deref(), Some("street"));

  let clear = OutfitPatch { style: Some(None), ..OutfitPatch::default() };
  let updated = s.update_outfit(user, id, clear).await.unwrap();
  assert_eq!(updated.style, None);
  assert!(updated.is_favorite);
}

#[tokio::test]
async fn update_missing_outfit_errors() {
  let s = store().await;
  let user = Uuid::new_v4();
  let created = s
    .create_outfit(NewOutfit::new(user, "https://img.example/1.jpg"))
    .await
    .unwrap();

  let err = s
    .update_outfit(Uuid::new_v4(), created.outfit.outfit_id, OutfitPatch::favorite(true))
    .await
    .unwrap_err();
  assert!(matches!(
    err.as_core(),
    Some(closet_core::Error::OutfitNotFound(id)) if *id == created.outfit.outfit_id
  ));
}

#[tokio::test]
async fn delete_outfit_cascades() {
  let s = store().await;
  let user = Uuid::new_v4();
  let created = s
    .create_outfit(
      NewOutfit::new(user, "https://img.example/1.jpg")
        .with_item(item(ClothingCategory::Top, "tee")),
    )
    .await
    .unwrap();
  let id = created.outfit.outfit_id;
  s.record_wear(wear(user, id, "2025-03-01")).await.unwrap();

  assert!(!s.delete_outfit(Uuid::new_v4(), id).await.unwrap());
  assert!(s.delete_outfit(user, id).await.unwrap());
  assert!(!s.delete_outfit(user, id).await.unwrap());

  assert!(s.get_outfit(user, id).await.unwrap().is_none());
  assert!(s.list_wear(user, id).await.unwrap().is_empty());

  // Wear cannot be recorded against a deleted outfit.
  let err = s.record_wear(wear(user, id, "2025-03-02")).await.unwrap_err();
  assert!(matches!(err.as_core(), Some(closet_core::Error::OutfitNotFound(_))));
}

// ─── Wear history ────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_wear_and_list_newest_first() {
  let s = store().await;
  let user = Uuid::new_v4();
  let id = s
    .create_outfit(NewOutfit::new(user, "https://img.example/1.jpg"))
    .await
    .unwrap()
    .outfit
    .outfit_id;

  for day in ["2025-03-01", "2025-03-10", "2025-03-05"] {
    let record = s.record_wear(wear(user, id, day)).await.unwrap();
    assert_eq!(record.outfit_id, id);
    assert_eq!(record.worn_date, date(day));
  }

  let dates: Vec<NaiveDate> = s
    .list_wear(user, id)
    .await
    .unwrap()
    .into_iter()
    .map(|w| w.worn_date)
    .collect();
  assert_eq!(dates, vec![date("2025-03-10"), date("2025-03-05"), date("2025-03-01")]);

  let fetched = s.get_outfit(user, id).await.unwrap().unwrap();
  assert_eq!(fetched.wear.len(), 3);
}

#[tokio::test]
async fn recorded_wear_matches_what_is_read_back() {
  let s = store().await;
  let user = Uuid::new_v4();
  let id = s
    .create_outfit(NewOutfit::new(user, "https://img.example/1.jpg"))
    .await
    .unwrap()
    .outfit
    .outfit_id;

  let recorded = s.record_wear(wear(user, id, "2025-03-01")).await.unwrap();

  let listed = s.list_wear(user, id).await.unwrap();
  assert_eq!(listed, vec![recorded.clone()]);

  let fetched = s.get_outfit(user, id).await.unwrap().unwrap();
  assert_eq!(fetched.wear, vec![recorded]);
}

#[tokio::test]
async fn duplicate_wear_on_same_day_is_rejected() {
  let s = store().await;
  let user = Uuid::new_v4();
  let id = s
    .create_outfit(NewOutfit::new(user, "https://img.example/1.jpg"))
    .await
    .unwrap()
    .outfit
    .outfit_id;

  s.record_wear(wear(user, id, "2025-03-01")).await.unwrap();
  let err = s.record_wear(wear(user, id, "2025-03-01")).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(closet_core::Error::AlreadyWorn { outfit_id, worn_date })
      if outfit_id == id && worn_date == date("2025-03-01")
  ));

  s.record_wear(wear(user, id, "2025-03-02")).await.unwrap();
  assert_eq!(s.list_wear(user, id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn wear_on_another_users_outfit_is_not_found() {
  let s = store().await;
  let owner = Uuid::new_v4();
  let id = s
    .create_outfit(NewOutfit::new(owner, "https://img.example/1.jpg"))
    .await
    .unwrap()
    .outfit
    .outfit_id;

  let err = s
    .record_wear(wear(Uuid::new_v4(), id, "2025-03-01"))
    .await
    .unwrap_err();
  assert!(matches!(
    err.as_core(),
    Some(closet_core::Error::OutfitNotFound(oid)) if *oid == id
  ));
  assert!(s.list_wear(owner, id).await.unwrap().is_empty());
}

// ─── Recommendation over SQLite ──────────────────────────────────────────────

#[tokio::test]
async fn recommender_reads_through_sqlite() {
  let s = Arc::new(store().await);
  let user = Uuid::new_v4();

  let fresh = s
    .create_outfit(NewOutfit::new(user, "https://img.example/fresh.jpg"))
    .await
    .unwrap()
    .outfit
    .outfit_id;
  let stale = s
    .create_outfit(NewOutfit::new(user, "https://img.example/stale.jpg"))
    .await
    .unwrap()
    .outfit
    .outfit_id;
  let archived = NewOutfit {
    is_archived: true,
    ..NewOutfit::new(user, "https://img.example/old.jpg")
  };
  s.create_outfit(archived).await.unwrap();

  s.record_wear(wear(user, stale, "2025-03-09")).await.unwrap();
  s.record_wear(wear(user, stale, "2025-03-01")).await.unwrap();

  let recommender = Recommender::new(s.clone(), RecommendPolicy::default());
  let mut request = RecommendRequest::new(user, 4);
  request.filters.exclude_worn_recently = true;
  request.today = Some(date("2025-03-10"));

  let mut rng = StdRng::seed_from_u64(3);
  let picked = recommender.recommend(&request, &mut rng).await;
  assert_eq!(picked.len(), 1);
  assert_eq!(picked[0].outfit_id(), fresh);

  request.filters.exclude_worn_recently = false;
  let picked = recommender.recommend(&request, &mut rng).await;
  assert_eq!(picked.len(), 2);
  let stale_view = picked.iter().find(|o| o.outfit_id() == stale).unwrap();
  assert_eq!(stale_view.wear_count, 2);
  assert_eq!(stale_view.last_worn, Some(date("2025-03-09")));
}
