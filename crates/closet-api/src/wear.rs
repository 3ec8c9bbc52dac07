//! Handlers for wear-history endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users/:user_id/outfits/:id/wear-history` | Newest first |
//! | `POST` | `/users/:user_id/wear-history` | Body: [`RecordBody`]; 201, 404 unknown outfit, 409 already worn that day |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use closet_core::{
  store::OutfitStore,
  wear::{NewWearRecord, WearRecord},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  error::ApiError,
  extract::{AppJson, AppPath},
};

/// `GET /users/:user_id/outfits/:id/wear-history`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  AppPath((user_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<Vec<WearRecord>>, ApiError>
where
  S: OutfitStore,
{
  let records = state
    .store
    .list_wear(user_id, id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct RecordBody {
  pub outfit_id: Uuid,
  /// Defaults to the current UTC date.
  pub worn_date: Option<NaiveDate>,
}

/// `POST /users/:user_id/wear-history`, body: `{"outfit_id":"...","worn_date":"2025-03-01"}`
pub async fn record<S>(
  State(state): State<AppState<S>>,
  AppPath(user_id): AppPath<Uuid>,
  AppJson(body): AppJson<RecordBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OutfitStore,
{
  let input = NewWearRecord {
    outfit_id: body.outfit_id,
    user_id,
    worn_date: body.worn_date.unwrap_or_else(|| Utc::now().date_naive()),
  };
  let record = state
    .store
    .record_wear(input)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(record)))
}
