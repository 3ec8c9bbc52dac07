//! Handler for `GET /users/:user_id/recommendations`.
//!
//! Query parameters:
//!
//! | Name | Default | Notes |
//! |------|---------|-------|
//! | `exclude_worn_recently` | `false` | Drop outfits worn within the recency window |
//! | `match_weather` | `false` | Needs `weather`; otherwise a no-op |
//! | `favorite_only` | `false` | |
//! | `count` | `4` | Upper bound on results |
//! | `weather` | — | URL-encoded JSON [`WeatherSnapshot`]; ignored if malformed |
//! | `today` | current UTC date | `YYYY-MM-DD` |

use axum::{
  Json,
  extract::State,
};
use chrono::NaiveDate;
use closet_core::{
  recommend::{RecommendFilters, RecommendRequest},
  store::OutfitStore,
  view::OutfitWithStats,
  weather::WeatherSnapshot,
};
use rand::{SeedableRng as _, rngs::StdRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  AppState,
  extract::{AppPath, AppQuery},
};

const DEFAULT_COUNT: usize = 4;

fn default_count() -> usize { DEFAULT_COUNT }

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
  #[serde(default)]
  pub exclude_worn_recently: bool,
  #[serde(default)]
  pub match_weather:         bool,
  #[serde(default)]
  pub favorite_only:         bool,
  #[serde(default = "default_count")]
  pub count:                 usize,
  pub weather:               Option<String>,
  pub today:                 Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
  pub recommendations: Vec<OutfitWithStats>,
}

/// Parse the `weather` parameter, treating a malformed value as absent.
fn parse_weather(raw: Option<&str>) -> Option<WeatherSnapshot> {
  let raw = raw?;
  match serde_json::from_str(raw) {
    Ok(snapshot) => Some(snapshot),
    Err(e) => {
      tracing::warn!(error = %e, "ignoring malformed weather parameter");
      None
    }
  }
}

/// `GET /users/:user_id/recommendations`
///
/// Recommendation itself never fails, it only returns fewer outfits. A
/// malformed query string is rejected with a JSON 400.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  AppPath(user_id): AppPath<Uuid>,
  AppQuery(params): AppQuery<RecommendParams>,
) -> Json<RecommendResponse>
where
  S: OutfitStore,
{
  let request = RecommendRequest {
    user_id,
    filters: RecommendFilters {
      exclude_worn_recently: params.exclude_worn_recently,
      match_weather:         params.match_weather,
      favorite_only:         params.favorite_only,
    },
    weather: parse_weather(params.weather.as_deref()),
    count: params.count,
    today: params.today,
  };

  let mut rng = StdRng::from_os_rng();
  let recommendations = state.recommender.recommend(&request, &mut rng).await;
  tracing::debug!(%user_id, returned = recommendations.len(), "recommendations served");

  Json(RecommendResponse { recommendations })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn malformed_weather_is_ignored() {
    assert_eq!(parse_weather(None), None);
    assert_eq!(parse_weather(Some("{not json")), None);
    assert_eq!(parse_weather(Some(r#"{"temperature":"warm"}"#)), None);
  }

  #[test]
  fn weather_snapshot_is_parsed() {
    let raw = r#"{"temperature":4.5,"feels_like":1.0,"condition":"snow","description":"light snow","icon":"13d"}"#;
    let snapshot = parse_weather(Some(raw)).unwrap();
    assert_eq!(snapshot.temperature, 4.5);
    assert_eq!(snapshot.description, "light snow");
  }
}
