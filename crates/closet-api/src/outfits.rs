//! Handlers for `/users/:user_id/outfits` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/:user_id/outfits` | Optional `?archived=true`, `?favorite_only=true` |
//! | `POST`   | `/users/:user_id/outfits` | Body: [`CreateBody`]; returns 201 |
//! | `GET`    | `/users/:user_id/outfits/:id` | 404 if not found |
//! | `PATCH`  | `/users/:user_id/outfits/:id` | Body: [`OutfitPatch`]; returns the outfit |
//! | `DELETE` | `/users/:user_id/outfits/:id` | 204, or 404 if not found |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use closet_core::{
  outfit::{NewClothingItem, NewOutfit, Outfit, OutfitPatch, Season},
  store::{OutfitQuery, OutfitStore},
  view::{OutfitWithStats, with_stats},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  error::ApiError,
  extract::{AppJson, AppPath, AppQuery},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Return the archive view instead of the collection.
  #[serde(default)]
  pub archived:      bool,
  #[serde(default)]
  pub favorite_only: bool,
}

/// `GET /users/:user_id/outfits[?archived=true][&favorite_only=true]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  AppPath(user_id): AppPath<Uuid>,
  AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Vec<OutfitWithStats>>, ApiError>
where
  S: OutfitStore,
{
  let query = OutfitQuery {
    user_id,
    archived: params.archived,
    favorite_only: params.favorite_only,
  };
  let outfits = state
    .store
    .list_outfits(query)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(with_stats(outfits)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Request body for `POST /users/:user_id/outfits`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub image_url:   String,
  pub season:      Option<Season>,
  pub style:       Option<String>,
  #[serde(default)]
  pub is_archived: bool,
  #[serde(default)]
  pub items:       Vec<NewClothingItem>,
}

/// `POST /users/:user_id/outfits`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  AppPath(user_id): AppPath<Uuid>,
  AppJson(body): AppJson<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OutfitStore,
{
  let input = NewOutfit {
    user_id,
    image_url: body.image_url,
    season: body.season,
    style: body.style,
    is_archived: body.is_archived,
    items: body.items,
  };
  let created = state
    .store
    .create_outfit(input)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(%user_id, outfit_id = %created.outfit.outfit_id, "outfit created");
  Ok((StatusCode::CREATED, Json(OutfitWithStats::from(created))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/:user_id/outfits/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  AppPath((user_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<OutfitWithStats>, ApiError>
where
  S: OutfitStore,
{
  let outfit = state
    .store
    .get_outfit(user_id, id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("outfit {id} not found")))?;
  Ok(Json(outfit.into()))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /users/:user_id/outfits/:id`, body: `{"is_favorite":true}` etc.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  AppPath((user_id, id)): AppPath<(Uuid, Uuid)>,
  AppJson(patch): AppJson<OutfitPatch>,
) -> Result<Json<Outfit>, ApiError>
where
  S: OutfitStore,
{
  if patch.is_empty() {
    return Err(ApiError::BadRequest("patch sets no fields".to_owned()));
  }
  let outfit = state
    .store
    .update_outfit(user_id, id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(outfit))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /users/:user_id/outfits/:id`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  AppPath((user_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError>
where
  S: OutfitStore,
{
  let deleted = state
    .store
    .delete_outfit(user_id, id)
    .await
    .map_err(ApiError::from_store)?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("outfit {id} not found")))
  }
}
