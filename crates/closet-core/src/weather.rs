//! Weather snapshots and the collaborator that supplies them.
//!
//! Snapshots are transient: fetched per request, never persisted.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Coarse weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
  Clear,
  Clouds,
  Rain,
  Snow,
  Thunderstorm,
  Drizzle,
  Mist,
}

/// A point-in-time weather reading. Temperatures are in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
  pub temperature: f64,
  pub feels_like:  f64,
  pub condition:   WeatherCondition,
  pub description: String,
  pub icon:        String,
}

/// Where to look up the weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
  Coordinates { latitude: f64, longitude: f64 },
  City { name: String },
}

/// Abstraction over a weather provider.
///
/// Implementations wrap a third-party forecast API; none ships with this
/// crate.
pub trait WeatherSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The current weather at `location`.
  fn current<'a>(
    &'a self,
    location: &'a Location,
  ) -> impl Future<Output = Result<WeatherSnapshot, Self::Error>> + Send + 'a;
}
