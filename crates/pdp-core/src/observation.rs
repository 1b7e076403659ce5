//! Observation — a dated note about a player, tied to a plan period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dated free-text note about a player.
///
/// `plan_id` is set at creation to the plan active at the time. An unlinked
/// observation may later be attached to an archived plan whose period covers
/// it; a linked observation is never relinked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
  pub observation_id: Uuid,
  pub player_id:      Uuid,
  pub coach_id:       Uuid,
  pub content:        String,
  pub observed_on:    NaiveDate,
  pub created_at:     DateTime<Utc>,
  pub plan_id:        Option<Uuid>,
  /// Soft-archive marker; archived observations drop out of active views.
  pub archived_at:    Option<DateTime<Utc>>,
}

impl Observation {
  pub fn is_archived(&self) -> bool { self.archived_at.is_some() }
}

/// Input to [`crate::store::CoachingStore::insert_observation`].
#[derive(Debug, Clone)]
pub struct NewObservation {
  pub player_id:   Uuid,
  pub coach_id:    Uuid,
  pub content:     String,
  pub observed_on: NaiveDate,
  pub plan_id:     Option<Uuid>,
}
