//! Error types for `closet-core`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("outfit not found: {0}")]
  OutfitNotFound(Uuid),

  /// A wear record for this outfit and date already exists.
  #[error("outfit {outfit_id} is already recorded as worn on {worn_date}")]
  AlreadyWorn {
    outfit_id: Uuid,
    worn_date: NaiveDate,
  },

  #[error("image url must not be empty")]
  EmptyImageUrl,

  #[error("unknown clothing category: {0:?}")]
  UnknownCategory(String),

  #[error("unknown season: {0:?}")]
  UnknownSeason(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
