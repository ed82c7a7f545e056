//! Error types for `starlog-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("journal entry is not a JSON object")]
  NotAnObject,

  #[error("journal entry is missing required field {0:?}")]
  MissingField(&'static str),

  #[error("invalid timestamp: {value}")]
  InvalidTimestamp { value: String },

  #[error("serialization error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
