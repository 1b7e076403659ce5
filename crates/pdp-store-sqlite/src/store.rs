//! [`SqliteStore`] — the SQLite implementation of [`CoachingStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, ffi, params_from_iter};
use uuid::Uuid;

use pdp_core::{
  observation::{NewObservation, Observation},
  plan::{DevelopmentPlan, NewPlan},
  player::{NewPlayer, Player},
  store::{
    CoachingStore, ObservationFilter, ObservationPatch, PlanFilter, PlanPatch,
  },
  timestamp_now,
};

use crate::{
  Error, Result,
  encode::{
    OBSERVATION_COLUMNS, PLAN_COLUMNS, PLAYER_COLUMNS, RawObservation, RawPlan,
    RawPlayer, encode_date, encode_dt, encode_origin, encode_uuid,
  },
  query::{
    observation_assignments, observation_conditions, order_keyword,
    plan_assignments, plan_conditions,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A coaching store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run an `UPDATE` built from a `SET` list and a `WHERE` list; returns the
  /// number of rows changed.
  async fn execute_update(&self, sql: String, params: Vec<rusqlite::types::Value>) -> Result<u64> {
    let affected = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, params_from_iter(params.iter()))?))
      .await?;
    Ok(affected as u64)
  }
}

/// The SQLite extended result code of a failed statement, if that is what
/// `err` carries.
fn extended_code(err: &tokio_rusqlite::Error) -> Option<i32> {
  match err {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)) => {
      Some(e.extended_code)
    }
    _ => None,
  }
}

// ─── CoachingStore impl ──────────────────────────────────────────────────────

impl CoachingStore for SqliteStore {
  type Error = Error;

  // ── Players ───────────────────────────────────────────────────────────────

  async fn insert_player(&self, input: NewPlayer) -> Result<Player> {
    let player = Player {
      player_id:  Uuid::new_v4(),
      first_name: input.first_name,
      last_name:  input.last_name,
      name:       input.name,
      team_id:    input.team_id,
      joined_at:  timestamp_now(),
    };

    let id_str     = encode_uuid(player.player_id);
    let first_name = player.first_name.clone();
    let last_name  = player.last_name.clone();
    let name       = player.name.clone();
    let team_str   = player.team_id.map(encode_uuid);
    let at_str     = encode_dt(player.joined_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO players (player_id, first_name, last_name, name, team_id, joined_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, first_name, last_name, name, team_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(player)
  }

  async fn get_player(&self, player_id: Uuid) -> Result<Option<Player>> {
    let id_str = encode_uuid(player_id);

    let raw: Option<RawPlayer> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = ?1"),
              rusqlite::params![id_str],
              RawPlayer::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPlayer::into_player).transpose()
  }

  async fn list_players(&self, team_id: Option<Uuid>) -> Result<Vec<Player>> {
    let team_str = team_id.map(encode_uuid);

    let raws: Vec<RawPlayer> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(t) = team_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = ?1 ORDER BY joined_at, rowid"
          ))?;
          stmt
            .query_map(rusqlite::params![t], RawPlayer::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players ORDER BY joined_at, rowid"
          ))?;
          stmt
            .query_map([], RawPlayer::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPlayer::into_player).collect()
  }

  // ── Plans ─────────────────────────────────────────────────────────────────

  async fn find_plans(&self, filter: &PlanFilter) -> Result<Vec<DevelopmentPlan>> {
    let conds = plan_conditions(filter);
    let dir = order_keyword(filter.order);
    let sql = format!(
      "SELECT {PLAN_COLUMNS} FROM pdp {} ORDER BY created_at {dir}, rowid {dir}",
      conds.where_clause()
    );
    let params = conds.into_params();

    let raws: Vec<RawPlan> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params.iter()), RawPlan::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPlan::into_plan).collect()
  }

  async fn insert_plan(&self, input: NewPlan) -> Result<DevelopmentPlan> {
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

    let plan_id_str   = encode_uuid(plan.plan_id);
    let player_id_str = encode_uuid(plan.player_id);
    let content       = plan.content.clone();
    let starts_str    = encode_date(plan.starts_on);
    let created_str   = encode_dt(plan.created_at);
    let coach_str     = encode_uuid(plan.coach_id);
    let org_str       = plan.org_id.map(encode_uuid);
    let replaces_str  = plan.replaces.map(encode_uuid);
    let origin_str    = encode_origin(plan.origin);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO pdp (
             plan_id, player_id, content, starts_on, created_at,
             coach_id, org_id, replaces, origin
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            plan_id_str,
            player_id_str,
            content,
            starts_str,
            created_str,
            coach_str,
            org_str,
            replaces_str,
            origin_str,
          ],
        )?;
        Ok(())
      })
      .await;

    if let Err(e) = inserted {
      return Err(match extended_code(&e) {
        Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => Error::ActivePlanExists(plan.player_id),
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => Error::DanglingReference("pdp"),
        _ => Error::Database(e),
      });
    }

    Ok(plan)
  }

  async fn update_plans(&self, filter: &PlanFilter, patch: PlanPatch) -> Result<u64> {
    if filter.is_unscoped() {
      return Err(Error::UnscopedUpdate("pdp"));
    }
    let sets = plan_assignments(&patch);
    if sets.is_empty() {
      return Ok(0);
    }
    let conds = plan_conditions(filter);

    let sql = format!("UPDATE pdp SET {} {}", sets.set_clause(), conds.where_clause());
    let mut params = sets.into_params();
    params.extend(conds.into_params());

    self.execute_update(sql, params).await
  }

  // ── Observations ──────────────────────────────────────────────────────────

  async fn find_observations(&self, filter: &ObservationFilter) -> Result<Vec<Observation>> {
    let conds = observation_conditions(filter);
    let dir = order_keyword(filter.order);
    let sql = format!(
      "SELECT {OBSERVATION_COLUMNS} FROM observations {}
       ORDER BY observed_on {dir}, created_at {dir}, rowid {dir}",
      conds.where_clause()
    );
    let params = conds.into_params();

    let raws: Vec<RawObservation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params.iter()), RawObservation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawObservation::into_observation).collect()
  }

  async fn insert_observation(&self, input: NewObservation) -> Result<Observation> {
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

    let id_str        = encode_uuid(observation.observation_id);
    let player_id_str = encode_uuid(observation.player_id);
    let coach_str     = encode_uuid(observation.coach_id);
    let content       = observation.content.clone();
    let observed_str  = encode_date(observation.observed_on);
    let created_str   = encode_dt(observation.created_at);
    let plan_str      = observation.plan_id.map(encode_uuid);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO observations (
             observation_id, player_id, coach_id, content,
             observed_on, created_at, plan_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            player_id_str,
            coach_str,
            content,
            observed_str,
            created_str,
            plan_str,
          ],
        )?;
        Ok(())
      })
      .await;

    if let Err(e) = inserted {
      return Err(match extended_code(&e) {
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => Error::DanglingReference("observations"),
        _ => Error::Database(e),
      });
    }

    Ok(observation)
  }

  async fn update_observations(
    &self,
    filter: &ObservationFilter,
    patch:  ObservationPatch,
  ) -> Result<u64> {
    if filter.is_unscoped() {
      return Err(Error::UnscopedUpdate("observations"));
    }
    let sets = observation_assignments(&patch);
    if sets.is_empty() {
      return Ok(0);
    }
    let conds = observation_conditions(filter);

    let sql = format!(
      "UPDATE observations SET {} {}",
      sets.set_clause(),
      conds.where_clause()
    );
    let mut params = sets.into_params();
    params.extend(conds.into_params());

    self.execute_update(sql, params).await
  }
}
