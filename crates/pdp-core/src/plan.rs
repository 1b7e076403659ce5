//! Development plans (PDPs) and the read models assembled around them.
//!
//! A plan is `Active` until it is archived, and archival is terminal. A
//! player holds at most one active plan; replacing a plan always writes a new
//! record that points back at the one it replaced.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{observation::Observation, player::Player};

// ─── Origin ──────────────────────────────────────────────────────────────────

/// Which operation wrote a plan. A replay of `archive_and_replace` is only
/// recognised against plans that operation created.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanOrigin {
  /// `create_initial_plan`, or anything written outside the lifecycle.
  #[default]
  Initial,
  /// `archive_and_replace`, including its first-plan fallback.
  Replacement,
}

// ─── Plan ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentPlan {
  pub plan_id:     Uuid,
  pub player_id:   Uuid,
  pub content:     String,
  pub starts_on:   NaiveDate,
  pub created_at:  DateTime<Utc>,
  /// Set exactly once; never cleared.
  pub archived_at: Option<DateTime<Utc>>,
  pub ends_on:     Option<NaiveDate>,
  pub coach_id:    Uuid,
  pub org_id:      Option<Uuid>,
  /// The plan this one replaced, when created by archive-and-replace.
  pub replaces:    Option<Uuid>,
  pub origin:      PlanOrigin,
}

impl DevelopmentPlan {
  pub fn is_active(&self) -> bool { self.archived_at.is_none() }
}

/// The coach and organisation a plan is written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  pub coach_id: Uuid,
  #[serde(default)]
  pub org_id:   Option<Uuid>,
}

/// Input to [`crate::store::CoachingStore::insert_plan`].
/// `plan_id` and `created_at` are assigned by the store; new plans are always
/// active.
#[derive(Debug, Clone)]
pub struct NewPlan {
  pub player_id: Uuid,
  pub content:   String,
  pub starts_on: NaiveDate,
  pub coach_id:  Uuid,
  pub org_id:    Option<Uuid>,
  pub replaces:  Option<Uuid>,
  pub origin:    PlanOrigin,
}

// ─── Read models ─────────────────────────────────────────────────────────────

/// A plan bundled with the observations linked to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWithObservations {
  pub plan:         DevelopmentPlan,
  pub observations: Vec<Observation>,
}

/// Everything needed to render "current plan" plus "archived plans, each with
/// their observations" for one player. Never stored, always derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanHistory {
  pub player:   Player,
  /// The active plan with its non-archived observations.
  pub active:   Option<PlanWithObservations>,
  /// Archived plans, most recently archived first, with all observations.
  pub archived: Vec<PlanWithObservations>,
  /// Non-archived observations recorded while no plan covered them.
  pub unlinked: Vec<Observation>,
}

/// A player's derived plan state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "plan", rename_all = "snake_case")]
pub enum PlanState {
  /// The player has never had a plan.
  NoPlan,
  Active(DevelopmentPlan),
  /// Only archived plans exist, e.g. after an interrupted replacement.
  /// Carries the most recently archived plan.
  Lapsed(DevelopmentPlan),
}
