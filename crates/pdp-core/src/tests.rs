//! Lifecycle tests against an in-memory `CoachingStore`.
//!
//! The in-memory store enforces nothing beyond what the trait requires, so it
//! can hold states a real backend would reject (two active plans) and fail on
//! demand at a chosen step.

use std::sync::{
  Mutex,
  atomic::{AtomicBool, Ordering},
};

use chrono::{DateTime, Days, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
  Error, ErrorKind, PlanLifecycle, Step,
  observation::{NewObservation, Observation},
  plan::{Author, DevelopmentPlan, NewPlan, PlanOrigin, PlanState},
  player::{NewPlayer, Player},
  store::{
    CoachingStore, ObservationFilter, ObservationPatch, Order, PlanFilter,
    PlanLink, PlanPatch,
  },
  timestamp_now,
};

// ─── In-memory store ─────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("injected failure: {0}")]
struct MemoryError(&'static str);

#[derive(Default)]
struct MemoryStore {
  players:           Mutex<Vec<Player>>,
  plans:             Mutex<Vec<DevelopmentPlan>>,
  observations:      Mutex<Vec<Observation>>,
  fail_plan_insert:  AtomicBool,
  fail_plan_update:  AtomicBool,
  /// Archived at this instant by "another writer" just before the next plan
  /// update runs.
  competing_archive: Mutex<Option<DateTime<Utc>>>,
}

impl MemoryStore {
  fn plan_count(&self, player_id: Uuid) -> usize {
    self.plans.lock().unwrap().iter().filter(|p| p.player_id == player_id).count()
  }

  fn active_count(&self, player_id: Uuid) -> usize {
    self
      .plans
      .lock()
      .unwrap()
      .iter()
      .filter(|p| p.player_id == player_id && p.is_active())
      .count()
  }

  /// Insert an observation with an explicit date and link, bypassing the
  /// lifecycle.
  fn seed_observation(&self, player_id: Uuid, observed_on: NaiveDate, plan_id: Option<Uuid>) -> Observation {
    let observation = Observation {
      observation_id: Uuid::new_v4(),
      player_id,
      coach_id: Uuid::new_v4(),
      content: "seeded".into(),
      observed_on,
      created_at: timestamp_now(),
      plan_id,
      archived_at: None,
    };
    self.observations.lock().unwrap().push(observation.clone());
    observation
  }
}

fn plan_matches(plan: &DevelopmentPlan, filter: &PlanFilter) -> bool {
  filter.plan_id.is_none_or(|id| plan.plan_id == id)
    && filter.player_id.is_none_or(|id| plan.player_id == id)
    && filter.active.is_none_or(|active| plan.is_active() == active)
}

fn observation_matches(o: &Observation, filter: &ObservationFilter) -> bool {
  let link_ok = match filter.link {
    PlanLink::Any => true,
    PlanLink::Unlinked => o.plan_id.is_none(),
    PlanLink::Linked(id) => o.plan_id == Some(id),
  };
  link_ok
    && filter.observation_id.is_none_or(|id| o.observation_id == id)
    && filter.player_id.is_none_or(|id| o.player_id == id)
    && filter.observed_from.is_none_or(|d| o.observed_on >= d)
    && filter.observed_until.is_none_or(|d| o.observed_on <= d)
    && filter.created_until.is_none_or(|t| o.created_at <= t)
    && filter.archived.is_none_or(|a| o.is_archived() == a)
}

impl CoachingStore for MemoryStore {
  type Error = MemoryError;

  async fn insert_player(&self, input: NewPlayer) -> Result<Player, MemoryError> {
    let player = Player {
      player_id:  Uuid::new_v4(),
      first_name: input.first_name,
      last_name:  input.last_name,
      name:       input.name,
      team_id:    input.team_id,
      joined_at:  timestamp_now(),
    };
    self.players.lock().unwrap().push(player.clone());
    Ok(player)
  }

  async fn get_player(&self, player_id: Uuid) -> Result<Option<Player>, MemoryError> {
    Ok(self.players.lock().unwrap().iter().find(|p| p.player_id == player_id).cloned())
  }

  async fn list_players(&self, team_id: Option<Uuid>) -> Result<Vec<Player>, MemoryError> {
    Ok(
      self
        .players
        .lock()
        .unwrap()
        .iter()
        .filter(|p| team_id.is_none() || p.team_id == team_id)
        .cloned()
        .collect(),
    )
  }

  async fn find_plans(&self, filter: &PlanFilter) -> Result<Vec<DevelopmentPlan>, MemoryError> {
    let mut plans: Vec<_> = self
      .plans
      .lock()
      .unwrap()
      .iter()
      .filter(|p| plan_matches(p, filter))
      .cloned()
      .collect();
    if filter.order == Order::NewestFirst {
      plans.reverse();
    }
    Ok(plans)
  }

  async fn insert_plan(&self, input: NewPlan) -> Result<DevelopmentPlan, MemoryError> {
    if self.fail_plan_insert.load(Ordering::SeqCst) {
      return Err(MemoryError("insert_plan"));
    }
    let plan = DevelopmentPlan {
      plan_id:     Uuid::new_v4(),
      player_id:   input.player_id,
      content:     input.content,
      starts_on:   input.starts_on,
      created_at:  timestamp_now(),
      archived_at: None,
      ends_on:     None,
      coach_id:    input.coach_id,
      org_id:      input.org_id,
      replaces:    input.replaces,
      origin:      input.origin,
    };
    self.plans.lock().unwrap().push(plan.clone());
    Ok(plan)
  }

  async fn update_plans(&self, filter: &PlanFilter, patch: PlanPatch) -> Result<u64, MemoryError> {
    if self.fail_plan_update.load(Ordering::SeqCst) {
      return Err(MemoryError("update_plans"));
    }
    let mut plans = self.plans.lock().unwrap();
    if let Some(at) = self.competing_archive.lock().unwrap().take() {
      for plan in plans.iter_mut().filter(|p| filter.plan_id == Some(p.plan_id)) {
        plan.archived_at = Some(at);
        plan.ends_on = Some(at.date_naive());
      }
    }
    let mut affected = 0;
    for plan in plans.iter_mut().filter(|p| plan_matches(p, filter)) {
      if let Some(at) = patch.archived_at {
        plan.archived_at = Some(at);
      }
      if let Some(on) = patch.ends_on {
        plan.ends_on = Some(on);
      }
      affected += 1;
    }
    Ok(affected)
  }

  async fn find_observations(&self, filter: &ObservationFilter) -> Result<Vec<Observation>, MemoryError> {
    let mut observations: Vec<_> = self
      .observations
      .lock()
      .unwrap()
      .iter()
      .filter(|o| observation_matches(o, filter))
      .cloned()
      .collect();
    observations.sort_by_key(|o| (o.observed_on, o.created_at));
    if filter.order == Order::NewestFirst {
      observations.reverse();
    }
    Ok(observations)
  }

  async fn insert_observation(&self, input: NewObservation) -> Result<Observation, MemoryError> {
    let observation = Observation {
      observation_id: Uuid::new_v4(),
      player_id:      input.player_id,
      coach_id:       input.coach_id,
      content:        input.content,
      observed_on:    input.observed_on,
      created_at:     timestamp_now(),
      plan_id:        input.plan_id,
      archived_at:    None,
    };
    self.observations.lock().unwrap().push(observation.clone());
    Ok(observation)
  }

  async fn update_observations(
    &self,
    filter: &ObservationFilter,
    patch: ObservationPatch,
  ) -> Result<u64, MemoryError> {
    let mut affected = 0;
    for o in self
      .observations
      .lock()
      .unwrap()
      .iter_mut()
      .filter(|o| observation_matches(o, filter))
    {
      if let Some(plan_id) = patch.plan_id {
        o.plan_id = Some(plan_id);
      }
      if let Some(at) = patch.archived_at {
        o.archived_at = Some(at);
      }
      affected += 1;
    }
    Ok(affected)
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn author() -> Author {
  Author { coach_id: Uuid::new_v4(), org_id: Some(Uuid::new_v4()) }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

async fn setup() -> (MemoryStore, Uuid) {
  let store = MemoryStore::default();
  let alice = store.insert_player(NewPlayer::named("Alice", "Liddell")).await.unwrap();
  (store, alice.player_id)
}

// ─── create_initial_plan ─────────────────────────────────────────────────────

#[tokio::test]
async fn initial_plan_is_active_with_given_start() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);

  let plan = pdp
    .create_initial_plan(alice, "Work on footwork", Some(date(2024, 1, 1)), author())
    .await
    .unwrap();

  assert!(plan.is_active());
  assert_eq!(plan.starts_on, date(2024, 1, 1));
  assert_eq!(plan.replaces, None);
  assert_eq!(store.plan_count(alice), 1);
}

#[tokio::test]
async fn initial_plan_defaults_start_to_today() {
  let (store, alice) = setup().await;
  let plan = PlanLifecycle::new(&store)
    .create_initial_plan(alice, "Work on footwork", None, author())
    .await
    .unwrap();
  assert_eq!(plan.starts_on, timestamp_now().date_naive());
}

#[tokio::test]
async fn initial_plan_conflicts_with_active_plan() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  pdp.create_initial_plan(alice, "first", None, author()).await.unwrap();

  let err = pdp.create_initial_plan(alice, "second", None, author()).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
  assert!(!err.is_retryable());
  assert_eq!(store.plan_count(alice), 1);
}

#[tokio::test]
async fn initial_plan_conflicts_with_archived_plan() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let plan = pdp.create_initial_plan(alice, "first", None, author()).await.unwrap();
  pdp.archive_plan(plan.plan_id).await.unwrap();

  let err = pdp.create_initial_plan(alice, "again", None, author()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Conflict);
  assert_eq!(store.plan_count(alice), 1);
}

#[tokio::test]
async fn operations_on_unknown_player_are_not_found() {
  let store = MemoryStore::default();
  let pdp = PlanLifecycle::new(&store);
  let ghost = Uuid::new_v4();

  let err = pdp.create_initial_plan(ghost, "x", None, author()).await.unwrap_err();
  assert!(matches!(err, Error::PlayerNotFound(id) if id == ghost));
  let err = pdp.archive_and_replace(ghost, "x", author()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  let err = pdp.record_observation(ghost, "x", date(2024, 1, 1), Uuid::new_v4()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  let err = pdp.list_plan_history(ghost).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ─── archive_and_replace ─────────────────────────────────────────────────────

#[tokio::test]
async fn replace_archives_current_and_creates_new() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let first = pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();

  let before = timestamp_now();
  let second = pdp.archive_and_replace(alice, "passing", author()).await.unwrap();
  let after = timestamp_now();

  assert!(second.is_active());
  assert_eq!(second.content, "passing");
  assert_eq!(second.replaces, Some(first.plan_id));
  assert_eq!(second.starts_on, after.date_naive());

  let old = store.find_plan(first.plan_id).await.unwrap().unwrap();
  let archived_at = old.archived_at.unwrap();
  assert!(before <= archived_at && archived_at <= after);
  assert_eq!(old.ends_on, Some(archived_at.date_naive()));
  assert_eq!(store.active_count(alice), 1);
}

#[tokio::test]
async fn replace_without_any_plan_creates_first_plan() {
  let (store, alice) = setup().await;
  let plan = PlanLifecycle::new(&store)
    .archive_and_replace(alice, "fresh start", author())
    .await
    .unwrap();
  assert!(plan.is_active());
  assert_eq!(plan.replaces, None);
  assert_eq!(store.plan_count(alice), 1);
}

#[tokio::test]
async fn identical_replace_without_plan_yields_one_plan() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);

  let first = pdp.archive_and_replace(alice, "fresh start", author()).await.unwrap();
  let again = pdp.archive_and_replace(alice, "fresh start", author()).await.unwrap();

  assert_eq!(first.origin, PlanOrigin::Replacement);
  assert_eq!(again, first);
  assert_eq!(store.plan_count(alice), 1);
  assert_eq!(store.active_count(alice), 1);
}

#[tokio::test]
async fn replacing_initial_plan_with_same_content_still_archives_it() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let first = pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();
  assert_eq!(first.origin, PlanOrigin::Initial);

  let second = pdp.archive_and_replace(alice, "footwork", author()).await.unwrap();
  assert_eq!(second.replaces, Some(first.plan_id));
  assert_eq!(store.plan_count(alice), 2);
  assert_eq!(store.active_count(alice), 1);
}

#[tokio::test]
async fn identical_replace_twice_yields_two_plans() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();

  let p2 = pdp.archive_and_replace(alice, "passing", author()).await.unwrap();
  let again = pdp.archive_and_replace(alice, "passing", author()).await.unwrap();

  assert_eq!(again.plan_id, p2.plan_id);
  assert_eq!(store.plan_count(alice), 2);
  assert_eq!(store.active_count(alice), 1);
}

#[tokio::test]
async fn different_content_replaces_again() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();
  let p2 = pdp.archive_and_replace(alice, "passing", author()).await.unwrap();
  let p3 = pdp.archive_and_replace(alice, "shooting", author()).await.unwrap();

  assert_eq!(p3.replaces, Some(p2.plan_id));
  assert_eq!(store.plan_count(alice), 3);
  assert_eq!(store.active_count(alice), 1);
}

#[tokio::test]
async fn failed_replacement_is_reported_and_retry_completes() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let first = pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();

  store.fail_plan_insert.store(true, Ordering::SeqCst);
  let err = pdp.archive_and_replace(alice, "passing", author()).await.unwrap_err();
  assert_eq!(err.step(), Some(Step::CreatePlan));
  assert!(err.is_retryable());
  assert_eq!(store.active_count(alice), 0);

  let state = pdp.plan_state(alice).await.unwrap();
  assert!(matches!(state, PlanState::Lapsed(ref p) if p.plan_id == first.plan_id));

  store.fail_plan_insert.store(false, Ordering::SeqCst);
  let second = pdp.archive_and_replace(alice, "passing", author()).await.unwrap();
  assert_eq!(second.replaces, Some(first.plan_id));
  assert_eq!(store.plan_count(alice), 2);
  assert_eq!(store.active_count(alice), 1);
}

#[tokio::test]
async fn failed_archival_leaves_current_plan_active() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let first = pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();

  store.fail_plan_update.store(true, Ordering::SeqCst);
  let err = pdp.archive_and_replace(alice, "passing", author()).await.unwrap_err();
  assert_eq!(err.step(), Some(Step::ArchivePlan));

  let state = pdp.plan_state(alice).await.unwrap();
  assert_eq!(state, PlanState::Active(first));
  assert_eq!(store.plan_count(alice), 1);
}

#[tokio::test]
async fn multiple_active_plans_surface_integrity_error() {
  let (store, alice) = setup().await;
  for content in ["one", "two"] {
    store
      .insert_plan(NewPlan {
        player_id: alice,
        content:   content.into(),
        starts_on: date(2024, 1, 1),
        coach_id:  Uuid::new_v4(),
        org_id:    None,
        replaces:  None,
        origin:    PlanOrigin::Initial,
      })
      .await
      .unwrap();
  }
  let pdp = PlanLifecycle::new(&store);

  let err = pdp.archive_and_replace(alice, "three", author()).await.unwrap_err();
  assert!(matches!(err, Error::Integrity { ref active_plans, .. } if active_plans.len() == 2));
  assert!(!err.is_retryable());
  assert_eq!(store.plan_count(alice), 2);
  assert_eq!(store.active_count(alice), 2);

  let err = pdp.record_observation(alice, "x", date(2024, 1, 2), Uuid::new_v4()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Integrity);
  let err = pdp.list_plan_history(alice).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Integrity);
}

// ─── Archival ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn archiving_twice_keeps_first_timestamp() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let plan = pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();

  let first = pdp.archive_plan(plan.plan_id).await.unwrap();
  let second = pdp.archive_plan(plan.plan_id).await.unwrap();

  assert!(first.archived_at.is_some());
  assert_eq!(first.archived_at, second.archived_at);
  assert_eq!(first.ends_on, second.ends_on);
}

#[tokio::test]
async fn replacement_keeps_a_concurrent_archival_timestamp() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let first = pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();

  let competitor = timestamp_now() - chrono::Duration::seconds(5);
  *store.competing_archive.lock().unwrap() = Some(competitor);

  let second = pdp.archive_and_replace(alice, "passing", author()).await.unwrap();
  assert_eq!(second.replaces, Some(first.plan_id));

  let old = store.find_plan(first.plan_id).await.unwrap().unwrap();
  assert_eq!(old.archived_at, Some(competitor));
  assert_eq!(old.ends_on, Some(competitor.date_naive()));
  assert_eq!(store.plan_count(alice), 2);
  assert_eq!(store.active_count(alice), 1);
}

#[tokio::test]
async fn archiving_unknown_plan_is_not_found() {
  let store = MemoryStore::default();
  let err = PlanLifecycle::new(&store).archive_plan(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::PlanNotFound(_)));
}

// ─── Observations ────────────────────────────────────────────────────────────

#[tokio::test]
async fn observation_links_to_active_plan() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);

  let unlinked = pdp
    .record_observation(alice, "before any plan", date(2024, 1, 1), Uuid::new_v4())
    .await
    .unwrap();
  assert_eq!(unlinked.plan_id, None);

  let plan = pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();
  let linked = pdp
    .record_observation(alice, "good footwork", date(2024, 1, 5), Uuid::new_v4())
    .await
    .unwrap();
  assert_eq!(linked.plan_id, Some(plan.plan_id));
}

#[tokio::test]
async fn archival_sweeps_orphans_inside_plan_period_only() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let plan = pdp
    .create_initial_plan(alice, "footwork", Some(date(2024, 1, 1)), author())
    .await
    .unwrap();

  let inside = store.seed_observation(alice, date(2024, 1, 10), None);
  let before_start = store.seed_observation(alice, date(2023, 12, 31), None);
  let future = timestamp_now().date_naive().checked_add_days(Days::new(30)).unwrap();
  let after_end = store.seed_observation(alice, future, None);

  let other_plan = Uuid::new_v4();
  let already_linked = store.seed_observation(alice, date(2024, 1, 11), Some(other_plan));

  pdp.archive_and_replace(alice, "passing", author()).await.unwrap();

  let get = |id| {
    store
      .observations
      .lock()
      .unwrap()
      .iter()
      .find(|o: &&Observation| o.observation_id == id)
      .cloned()
      .unwrap()
  };
  assert_eq!(get(inside.observation_id).plan_id, Some(plan.plan_id));
  assert_eq!(get(before_start.observation_id).plan_id, None);
  assert_eq!(get(after_end.observation_id).plan_id, None);
  assert_eq!(get(already_linked.observation_id).plan_id, Some(other_plan));
}

#[tokio::test]
async fn archived_observation_keeps_link_and_leaves_active_view() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let plan = pdp.create_initial_plan(alice, "footwork", None, author()).await.unwrap();
  let o = pdp
    .record_observation(alice, "note", timestamp_now().date_naive(), Uuid::new_v4())
    .await
    .unwrap();

  let archived = pdp.archive_observation(o.observation_id).await.unwrap();
  assert!(archived.is_archived());
  assert_eq!(archived.plan_id, Some(plan.plan_id));

  let again = pdp.archive_observation(o.observation_id).await.unwrap();
  assert_eq!(again.archived_at, archived.archived_at);

  let history = pdp.list_plan_history(alice).await.unwrap();
  assert!(history.active.unwrap().observations.is_empty());

  // Once the plan is archived, the observation shows up in its history.
  pdp.archive_plan(plan.plan_id).await.unwrap();
  let history = pdp.list_plan_history(alice).await.unwrap();
  assert_eq!(history.archived[0].observations.len(), 1);
}

// ─── History ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn alice_footwork_then_passing() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);

  let footwork = pdp
    .create_initial_plan(alice, "Work on footwork", Some(date(2024, 1, 1)), author())
    .await
    .unwrap();
  let note = pdp
    .record_observation(alice, "Good footwork today", date(2024, 1, 5), Uuid::new_v4())
    .await
    .unwrap();
  assert_eq!(note.plan_id, Some(footwork.plan_id));

  let passing = pdp.archive_and_replace(alice, "Now focus on passing", author()).await.unwrap();
  let today = timestamp_now().date_naive();
  assert_eq!(passing.starts_on, today);

  let history = pdp.list_plan_history(alice).await.unwrap();
  assert_eq!(history.player.display_name(), "Alice Liddell");

  let active = history.active.unwrap();
  assert_eq!(active.plan.plan_id, passing.plan_id);
  assert!(active.observations.is_empty());

  assert_eq!(history.archived.len(), 1);
  let archived = &history.archived[0];
  assert_eq!(archived.plan.plan_id, footwork.plan_id);
  assert_eq!(archived.plan.ends_on, Some(today));
  assert_eq!(archived.observations.len(), 1);
  assert_eq!(archived.observations[0].observation_id, note.observation_id);
  assert_eq!(archived.observations[0].plan_id, Some(footwork.plan_id));
  assert!(history.unlinked.is_empty());
}

#[tokio::test]
async fn history_orders_archived_newest_first() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  let p1 = pdp.create_initial_plan(alice, "one", None, author()).await.unwrap();
  let p2 = pdp.archive_and_replace(alice, "two", author()).await.unwrap();
  let p3 = pdp.archive_and_replace(alice, "three", author()).await.unwrap();

  let history = pdp.list_plan_history(alice).await.unwrap();
  assert_eq!(history.active.unwrap().plan.plan_id, p3.plan_id);
  let ids: Vec<_> = history.archived.iter().map(|p| p.plan.plan_id).collect();
  assert_eq!(ids, vec![p2.plan_id, p1.plan_id]);
}

#[tokio::test]
async fn plan_state_transitions() {
  let (store, alice) = setup().await;
  let pdp = PlanLifecycle::new(&store);
  assert_eq!(pdp.plan_state(alice).await.unwrap(), PlanState::NoPlan);

  let plan = pdp.create_initial_plan(alice, "one", None, author()).await.unwrap();
  assert_eq!(pdp.plan_state(alice).await.unwrap(), PlanState::Active(plan));
}
