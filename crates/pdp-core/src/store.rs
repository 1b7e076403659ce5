//! The `CoachingStore` trait and supporting filter/patch types.
//!
//! The trait is implemented by storage backends (e.g. `pdp-store-sqlite`).
//! It exposes the same four logical operations per table (find one, find
//! many, insert, update) and nothing else; every business rule lives in
//! [`crate::lifecycle`].

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
  observation::{NewObservation, Observation},
  plan::{DevelopmentPlan, NewPlan},
  player::{NewPlayer, Player},
};

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Result ordering for `find_*` calls. Plans are ordered by `created_at`,
/// observations by `observed_on` then `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
  #[default]
  OldestFirst,
  NewestFirst,
}

/// Selects rows of the `pdp` table. Unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
  pub plan_id:   Option<Uuid>,
  pub player_id: Option<Uuid>,
  /// `Some(true)`: null archival timestamp only; `Some(false)`: archived only.
  pub active:    Option<bool>,
  pub order:     Order,
}

impl PlanFilter {
  pub fn by_id(plan_id: Uuid) -> Self {
    Self { plan_id: Some(plan_id), ..Self::default() }
  }

  pub fn for_player(player_id: Uuid) -> Self {
    Self { player_id: Some(player_id), ..Self::default() }
  }

  pub fn active_for(player_id: Uuid) -> Self {
    Self { player_id: Some(player_id), active: Some(true), ..Self::default() }
  }

  /// True if the filter matches every row; stores refuse such updates.
  pub fn is_unscoped(&self) -> bool {
    self.plan_id.is_none() && self.player_id.is_none()
  }
}

/// How an observation's plan link is constrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanLink {
  #[default]
  Any,
  /// `plan_id IS NULL`.
  Unlinked,
  Linked(Uuid),
}

/// Selects rows of the `observations` table. Date bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct ObservationFilter {
  pub observation_id: Option<Uuid>,
  pub player_id:      Option<Uuid>,
  pub link:           PlanLink,
  pub observed_from:  Option<NaiveDate>,
  pub observed_until: Option<NaiveDate>,
  /// Only rows whose `created_at` is at or before this instant.
  pub created_until:  Option<DateTime<Utc>>,
  /// `Some(false)` excludes archived observations.
  pub archived:       Option<bool>,
  pub order:          Order,
}

impl ObservationFilter {
  pub fn by_id(observation_id: Uuid) -> Self {
    Self { observation_id: Some(observation_id), ..Self::default() }
  }

  pub fn for_player(player_id: Uuid) -> Self {
    Self { player_id: Some(player_id), ..Self::default() }
  }

  pub fn is_unscoped(&self) -> bool {
    self.observation_id.is_none() && self.player_id.is_none()
  }
}

// ─── Patches ─────────────────────────────────────────────────────────────────

/// Fields to set on matching plans; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
  pub archived_at: Option<DateTime<Utc>>,
  pub ends_on:     Option<NaiveDate>,
}

/// Fields to set on matching observations; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ObservationPatch {
  pub plan_id:     Option<Uuid>,
  pub archived_at: Option<DateTime<Utc>>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the coaching data store.
///
/// Each `update_*` call must be a single atomic statement and report how many
/// rows it changed; the lifecycle manager relies on that count for
/// idempotent archival. No multi-statement transactions are assumed.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CoachingStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Players ───────────────────────────────────────────────────────────

  fn insert_player(
    &self,
    input: NewPlayer,
  ) -> impl Future<Output = Result<Player, Self::Error>> + Send + '_;

  /// Retrieve a player by UUID. Returns `None` if not found.
  fn get_player(
    &self,
    player_id: Uuid,
  ) -> impl Future<Output = Result<Option<Player>, Self::Error>> + Send + '_;

  /// List all players, optionally restricted to one team.
  fn list_players(
    &self,
    team_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Player>, Self::Error>> + Send + '_;

  // ── Plans ─────────────────────────────────────────────────────────────

  fn find_plans<'a>(
    &'a self,
    filter: &'a PlanFilter,
  ) -> impl Future<Output = Result<Vec<DevelopmentPlan>, Self::Error>> + Send + 'a;

  /// Retrieve a plan by UUID. Returns `None` if not found.
  fn find_plan(
    &self,
    plan_id: Uuid,
  ) -> impl Future<Output = Result<Option<DevelopmentPlan>, Self::Error>> + Send + '_
  {
    async move {
      let filter = PlanFilter::by_id(plan_id);
      Ok(self.find_plans(&filter).await?.into_iter().next())
    }
  }

  /// Persist a new, active plan.
  fn insert_plan(
    &self,
    input: NewPlan,
  ) -> impl Future<Output = Result<DevelopmentPlan, Self::Error>> + Send + '_;

  /// Apply `patch` to every plan matching `filter`; returns the row count.
  fn update_plans<'a>(
    &'a self,
    filter: &'a PlanFilter,
    patch: PlanPatch,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  // ── Observations ──────────────────────────────────────────────────────

  fn find_observations<'a>(
    &'a self,
    filter: &'a ObservationFilter,
  ) -> impl Future<Output = Result<Vec<Observation>, Self::Error>> + Send + 'a;

  /// Retrieve an observation by UUID. Returns `None` if not found.
  fn find_observation(
    &self,
    observation_id: Uuid,
  ) -> impl Future<Output = Result<Option<Observation>, Self::Error>> + Send + '_
  {
    async move {
      let filter = ObservationFilter::by_id(observation_id);
      Ok(self.find_observations(&filter).await?.into_iter().next())
    }
  }

  fn insert_observation(
    &self,
    input: NewObservation,
  ) -> impl Future<Output = Result<Observation, Self::Error>> + Send + '_;

  /// Apply `patch` to every observation matching `filter`; returns the row
  /// count.
  fn update_observations<'a>(
    &'a self,
    filter: &'a ObservationFilter,
    patch: ObservationPatch,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;
}
