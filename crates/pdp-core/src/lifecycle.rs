//! The PDP lifecycle manager.
//!
//! Every rule about creating, archiving, and replacing a player's development
//! plan lives here, written against [`CoachingStore`]. The store offers no
//! multi-statement transactions, so each step is individually idempotent and
//! a whole operation can always be retried from the start:
//!
//! - archival only touches rows that are still active, so repeating it is a
//!   no-op that never overwrites the first archival timestamp;
//! - the observation sweep only touches unlinked rows inside the archived
//!   plan's period;
//! - a replacement is only written when the player has no active plan, or
//!   when the active one was not itself produced by an identical request.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
  Error, Result, Step,
  observation::{NewObservation, Observation},
  plan::{
    Author, DevelopmentPlan, NewPlan, PlanHistory, PlanOrigin, PlanState,
    PlanWithObservations,
  },
  player::Player,
  store::{
    CoachingStore, ObservationFilter, ObservationPatch, PlanFilter, PlanLink,
    PlanPatch,
  },
  timestamp_now,
};

/// Runs the plan protocol against a borrowed store.
///
/// Holds no state of its own; construct one per request.
pub struct PlanLifecycle<'s, S> {
  store: &'s S,
}

impl<'s, S: CoachingStore> PlanLifecycle<'s, S> {
  pub fn new(store: &'s S) -> Self { Self { store } }

  // ── Operations ────────────────────────────────────────────────────────

  /// Create a player's very first plan.
  ///
  /// Fails with [`Error::Conflict`] if the player has any plan at all, active
  /// or archived. `starts_on` defaults to today (UTC).
  pub async fn create_initial_plan(
    &self,
    player_id: Uuid,
    content: impl Into<String>,
    starts_on: Option<NaiveDate>,
    author: Author,
  ) -> Result<DevelopmentPlan> {
    self.load_player(player_id).await?;

    let existing = self
      .store
      .find_plans(&PlanFilter::for_player(player_id))
      .await
      .map_err(|e| Error::store(Step::LocatePlan, e))?;
    if !existing.is_empty() {
      return Err(Error::Conflict(format!(
        "player {player_id} already has a plan; use archive_and_replace instead"
      )));
    }

    let starts_on = starts_on.unwrap_or_else(|| timestamp_now().date_naive());
    self
      .create_plan(NewPlan {
        player_id,
        content: content.into(),
        starts_on,
        coach_id: author.coach_id,
        org_id: author.org_id,
        replaces: None,
        origin: PlanOrigin::Initial,
      })
      .await
  }

  /// Archive the player's active plan, attach its orphaned observations, and
  /// open a new active plan with `new_content`.
  ///
  /// A player without an active plan still gets one. If the previous call was
  /// interrupted after archival, this finishes it. If the active plan was
  /// already produced by an identical request, it is returned unchanged.
  pub async fn archive_and_replace(
    &self,
    player_id: Uuid,
    new_content: impl Into<String>,
    author: Author,
  ) -> Result<DevelopmentPlan> {
    let new_content = new_content.into();
    self.load_player(player_id).await?;

    let predecessor = match self.active_plan(player_id).await? {
      Some(current)
        if current.origin == PlanOrigin::Replacement && current.content == new_content =>
      {
        debug!(%player_id, plan_id = %current.plan_id, "replacement already in place");
        if let Some(previous) = self.find_plan(current.replaces, Step::LocatePlan).await? {
          self.link_orphans(&previous).await?;
        }
        return Ok(current);
      }
      Some(current) => Some(self.archive(current).await?),
      None => self.latest_archived(player_id).await?,
    };

    let replaces = match predecessor {
      Some(previous) => {
        self.link_orphans(&previous).await?;
        Some(previous.plan_id)
      }
      None => None,
    };

    self
      .create_plan(NewPlan {
        player_id,
        content: new_content,
        starts_on: timestamp_now().date_naive(),
        coach_id: author.coach_id,
        org_id: author.org_id,
        replaces,
        origin: PlanOrigin::Replacement,
      })
      .await
  }

  /// Archive one plan without replacing it. Archiving an archived plan
  /// returns the stored record untouched.
  pub async fn archive_plan(&self, plan_id: Uuid) -> Result<DevelopmentPlan> {
    let plan = self
      .find_plan(Some(plan_id), Step::ArchivePlan)
      .await?
      .ok_or(Error::PlanNotFound(plan_id))?;

    let archived = if plan.is_active() { self.archive(plan).await? } else { plan };
    self.link_orphans(&archived).await?;
    Ok(archived)
  }

  /// Record an observation, linked to the player's active plan if there is
  /// one.
  pub async fn record_observation(
    &self,
    player_id: Uuid,
    content: impl Into<String>,
    observed_on: NaiveDate,
    coach_id: Uuid,
  ) -> Result<Observation> {
    self.load_player(player_id).await?;
    let active = self.active_plan(player_id).await?;

    let observation = self
      .store
      .insert_observation(NewObservation {
        player_id,
        coach_id,
        content: content.into(),
        observed_on,
        plan_id: active.map(|p| p.plan_id),
      })
      .await
      .map_err(|e| Error::store(Step::RecordObservation, e))?;

    debug!(
      %player_id,
      observation_id = %observation.observation_id,
      plan_id = ?observation.plan_id,
      "observation recorded"
    );
    Ok(observation)
  }

  /// Soft-archive an observation. Its plan link is left as is.
  pub async fn archive_observation(&self, observation_id: Uuid) -> Result<Observation> {
    let observation = self
      .find_observation(observation_id)
      .await?
      .ok_or(Error::ObservationNotFound(observation_id))?;
    if observation.is_archived() {
      return Ok(observation);
    }

    let filter = ObservationFilter {
      observation_id: Some(observation_id),
      archived: Some(false),
      ..ObservationFilter::default()
    };
    let patch = ObservationPatch { archived_at: Some(timestamp_now()), plan_id: None };
    self
      .store
      .update_observations(&filter, patch)
      .await
      .map_err(|e| Error::store(Step::ArchiveObservation, e))?;

    self
      .find_observation(observation_id)
      .await?
      .ok_or(Error::ObservationNotFound(observation_id))
  }

  /// The player's current plan and archived plans, each with their
  /// observations.
  pub async fn list_plan_history(&self, player_id: Uuid) -> Result<PlanHistory> {
    let player = self.load_player(player_id).await?;

    let plans = self
      .store
      .find_plans(&PlanFilter::for_player(player_id))
      .await
      .map_err(|e| Error::store(Step::LoadHistory, e))?;
    let observations = self
      .store
      .find_observations(&ObservationFilter::for_player(player_id))
      .await
      .map_err(|e| Error::store(Step::LoadHistory, e))?;

    let (active, mut archived): (Vec<_>, Vec<_>) =
      plans.into_iter().partition(DevelopmentPlan::is_active);
    check_single_active(player_id, &active)?;
    archived.sort_by(|a, b| b.archived_at.cmp(&a.archived_at));

    let mut by_plan: HashMap<Uuid, Vec<Observation>> = HashMap::new();
    let mut unlinked = Vec::new();
    for observation in observations {
      match observation.plan_id {
        Some(plan_id) => by_plan.entry(plan_id).or_default().push(observation),
        None if !observation.is_archived() => unlinked.push(observation),
        None => {}
      }
    }

    let active = active.into_iter().next().map(|plan| {
      let mut observations = by_plan.remove(&plan.plan_id).unwrap_or_default();
      observations.retain(|o| !o.is_archived());
      PlanWithObservations { plan, observations }
    });
    let archived = archived
      .into_iter()
      .map(|plan| {
        let observations = by_plan.remove(&plan.plan_id).unwrap_or_default();
        PlanWithObservations { plan, observations }
      })
      .collect();

    // Links to plans that no longer exist read as unlinked.
    unlinked.extend(by_plan.into_values().flatten().filter(|o| !o.is_archived()));

    Ok(PlanHistory { player, active, archived, unlinked })
  }

  /// Whether the player has never had a plan, has an active one, or only has
  /// archived ones.
  pub async fn plan_state(&self, player_id: Uuid) -> Result<PlanState> {
    self.load_player(player_id).await?;
    if let Some(plan) = self.active_plan(player_id).await? {
      return Ok(PlanState::Active(plan));
    }
    Ok(match self.latest_archived(player_id).await? {
      Some(plan) => PlanState::Lapsed(plan),
      None => PlanState::NoPlan,
    })
  }

  // ── Steps ─────────────────────────────────────────────────────────────

  async fn load_player(&self, player_id: Uuid) -> Result<Player> {
    self
      .store
      .get_player(player_id)
      .await
      .map_err(|e| Error::store(Step::LoadPlayer, e))?
      .ok_or(Error::PlayerNotFound(player_id))
  }

  async fn find_plan(&self, plan_id: Option<Uuid>, step: Step) -> Result<Option<DevelopmentPlan>> {
    let Some(plan_id) = plan_id else { return Ok(None) };
    self
      .store
      .find_plan(plan_id)
      .await
      .map_err(|e| Error::store(step, e))
  }

  async fn find_observation(&self, observation_id: Uuid) -> Result<Option<Observation>> {
    self
      .store
      .find_observation(observation_id)
      .await
      .map_err(|e| Error::store(Step::ArchiveObservation, e))
  }

  /// The player's single active plan, if any.
  async fn active_plan(&self, player_id: Uuid) -> Result<Option<DevelopmentPlan>> {
    let mut active = self
      .store
      .find_plans(&PlanFilter::active_for(player_id))
      .await
      .map_err(|e| Error::store(Step::LocatePlan, e))?;
    check_single_active(player_id, &active)?;
    Ok(active.pop())
  }

  async fn latest_archived(&self, player_id: Uuid) -> Result<Option<DevelopmentPlan>> {
    let filter = PlanFilter {
      player_id: Some(player_id),
      active: Some(false),
      ..PlanFilter::default()
    };
    let archived = self
      .store
      .find_plans(&filter)
      .await
      .map_err(|e| Error::store(Step::LocatePlan, e))?;
    Ok(archived.into_iter().max_by_key(|p| p.archived_at))
  }

  /// Close out an active plan. Returns the record as stored afterwards, which
  /// carries the first archival timestamp if someone else got there first.
  async fn archive(&self, plan: DevelopmentPlan) -> Result<DevelopmentPlan> {
    let now = timestamp_now();
    let filter = PlanFilter {
      plan_id: Some(plan.plan_id),
      active: Some(true),
      ..PlanFilter::default()
    };
    let patch = PlanPatch { archived_at: Some(now), ends_on: Some(now.date_naive()) };

    let affected = self
      .store
      .update_plans(&filter, patch)
      .await
      .map_err(|e| Error::store(Step::ArchivePlan, e))?;
    if affected == 0 {
      debug!(plan_id = %plan.plan_id, "plan already archived");
    } else {
      info!(player_id = %plan.player_id, plan_id = %plan.plan_id, "plan archived");
    }

    self
      .find_plan(Some(plan.plan_id), Step::ArchivePlan)
      .await?
      .ok_or(Error::PlanNotFound(plan.plan_id))
  }

  /// Attach unlinked observations recorded inside an archived plan's period
  /// to that plan.
  async fn link_orphans(&self, plan: &DevelopmentPlan) -> Result<u64> {
    let Some(archived_at) = plan.archived_at else { return Ok(0) };

    let filter = ObservationFilter {
      player_id: Some(plan.player_id),
      link: PlanLink::Unlinked,
      observed_from: Some(plan.starts_on),
      observed_until: Some(archived_at.date_naive()),
      created_until: Some(archived_at),
      ..ObservationFilter::default()
    };
    let patch = ObservationPatch { plan_id: Some(plan.plan_id), archived_at: None };

    let linked = self
      .store
      .update_observations(&filter, patch)
      .await
      .map_err(|e| Error::store(Step::LinkObservations, e))?;
    if linked > 0 {
      debug!(plan_id = %plan.plan_id, linked, "linked orphaned observations");
    }
    Ok(linked)
  }

  async fn create_plan(&self, input: NewPlan) -> Result<DevelopmentPlan> {
    let player_id = input.player_id;
    let plan = self.store.insert_plan(input).await.map_err(|e| {
      error!(%player_id, error = %e, "failed to create plan");
      Error::store(Step::CreatePlan, e)
    })?;
    info!(
      %player_id,
      plan_id = %plan.plan_id,
      replaces = ?plan.replaces,
      "plan created"
    );
    Ok(plan)
  }
}

fn check_single_active(player_id: Uuid, active: &[DevelopmentPlan]) -> Result<()> {
  if active.len() <= 1 {
    return Ok(());
  }
  let active_plans: Vec<Uuid> = active.iter().map(|p| p.plan_id).collect();
  error!(%player_id, ?active_plans, "multiple active plans");
  Err(Error::Integrity { player_id, active_plans })
}
