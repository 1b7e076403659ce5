//! Error type for `pdp-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The single-active-plan index rejected an insert.
  #[error("player {0} already has an active plan")]
  ActivePlanExists(uuid::Uuid),

  #[error("unknown plan origin: {0:?}")]
  UnknownOrigin(String),

  /// A foreign key on insert pointed at a missing player or plan.
  #[error("{0} row references a player or plan that does not exist")]
  DanglingReference(&'static str),

  /// An update whose filter would match every row.
  #[error("refusing to update every row of {0}")]
  UnscopedUpdate(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
