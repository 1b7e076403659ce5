//! Error types for `pdp-core`.

use strum::{Display, IntoStaticStr};
use thiserror::Error;
use uuid::Uuid;

/// The protocol step during which a store call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
  LoadPlayer,
  LocatePlan,
  ArchivePlan,
  LinkObservations,
  CreatePlan,
  RecordObservation,
  ArchiveObservation,
  LoadHistory,
}

/// Coarse classification of [`Error`], used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
  NotFound,
  Conflict,
  Integrity,
  Store,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("player not found: {0}")]
  PlayerNotFound(Uuid),

  #[error("plan not found: {0}")]
  PlanNotFound(Uuid),

  #[error("observation not found: {0}")]
  ObservationNotFound(Uuid),

  #[error("conflict: {0}")]
  Conflict(String),

  /// More than one active plan exists for a player. Never auto-resolved.
  #[error("player {player_id} has {count} active plans", count = .active_plans.len())]
  Integrity {
    player_id:    Uuid,
    active_plans: Vec<Uuid>,
  },

  #[error("store error during {step}: {source}")]
  Store {
    step:   Step,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  /// Wrap a backend error, recording which step it interrupted.
  pub fn store<E>(step: Step, source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store { step, source: Box::new(source) }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::PlayerNotFound(_)
      | Self::PlanNotFound(_)
      | Self::ObservationNotFound(_) => ErrorKind::NotFound,
      Self::Conflict(_) => ErrorKind::Conflict,
      Self::Integrity { .. } => ErrorKind::Integrity,
      Self::Store { .. } => ErrorKind::Store,
    }
  }

  /// Only store failures are worth retrying; every lifecycle step is safe to
  /// replay from the start.
  pub fn is_retryable(&self) -> bool { self.kind() == ErrorKind::Store }

  pub fn step(&self) -> Option<Step> {
    match self {
      Self::Store { step, .. } => Some(*step),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
