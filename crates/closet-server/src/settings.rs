//! Server configuration, loaded from an optional TOML file layered with
//! `CLOSET_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use closet_core::recommend::RecommendPolicy;
use serde::Deserialize;

/// Top-level server configuration.
///
/// ```toml
/// host       = "127.0.0.1"
/// port       = 8080
/// store_path = "~/.local/share/closet/closet.db"
///
/// [recommend]
/// cold_below         = 10.0
/// hot_above          = 28.0
/// recent_window_days = 2
/// ```
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub recommend:  RecommendPolicy,
}

impl ServerConfig {
  /// Layer `path` (if it exists) under the environment and deserialise.
  ///
  /// Nested keys use a double underscore, e.g.
  /// `CLOSET_RECOMMEND__COLD_BELOW=8`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("CLOSET")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
