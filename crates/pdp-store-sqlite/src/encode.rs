//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with exactly six fractional
//! digits and a `Z` suffix, so string order matches time order. Calendar
//! dates are stored as `YYYY-MM-DD`. UUIDs are stored as hyphenated lowercase
//! strings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use pdp_core::{
  observation::Observation,
  plan::{DevelopmentPlan, PlanOrigin},
  player::Player,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── PlanOrigin ───────────────────────────────────────────────────────────────

pub fn encode_origin(origin: PlanOrigin) -> &'static str { origin.into() }

pub fn decode_origin(s: &str) -> Result<PlanOrigin> {
  s.parse().map_err(|_| Error::UnknownOrigin(s.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const PLAYER_COLUMNS: &str =
  "player_id, first_name, last_name, name, team_id, joined_at";

/// Raw strings read directly from a `players` row.
pub struct RawPlayer {
  pub player_id:  String,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub name:       Option<String>,
  pub team_id:    Option<String>,
  pub joined_at:  String,
}

impl RawPlayer {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      player_id:  row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      name:       row.get(3)?,
      team_id:    row.get(4)?,
      joined_at:  row.get(5)?,
    })
  }

  pub fn into_player(self) -> Result<Player> {
    Ok(Player {
      player_id:  decode_uuid(&self.player_id)?,
      first_name: self.first_name,
      last_name:  self.last_name,
      name:       self.name,
      team_id:    decode_opt_uuid(self.team_id)?,
      joined_at:  decode_dt(&self.joined_at)?,
    })
  }
}

pub const PLAN_COLUMNS: &str = "plan_id, player_id, content, starts_on, \
  created_at, archived_at, ends_on, coach_id, org_id, replaces, origin";

/// Raw strings read directly from a `pdp` row.
pub struct RawPlan {
  pub plan_id:     String,
  pub player_id:   String,
  pub content:     String,
  pub starts_on:   String,
  pub created_at:  String,
  pub archived_at: Option<String>,
  pub ends_on:     Option<String>,
  pub coach_id:    String,
  pub org_id:      Option<String>,
  pub replaces:    Option<String>,
  pub origin:      String,
}

impl RawPlan {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      plan_id:     row.get(0)?,
      player_id:   row.get(1)?,
      content:     row.get(2)?,
      starts_on:   row.get(3)?,
      created_at:  row.get(4)?,
      archived_at: row.get(5)?,
      ends_on:     row.get(6)?,
      coach_id:    row.get(7)?,
      org_id:      row.get(8)?,
      replaces:    row.get(9)?,
      origin:      row.get(10)?,
    })
  }

  pub fn into_plan(self) -> Result<DevelopmentPlan> {
    Ok(DevelopmentPlan {
      plan_id:     decode_uuid(&self.plan_id)?,
      player_id:   decode_uuid(&self.player_id)?,
      content:     self.content,
      starts_on:   decode_date(&self.starts_on)?,
      created_at:  decode_dt(&self.created_at)?,
      archived_at: decode_opt_dt(self.archived_at)?,
      ends_on:     self.ends_on.as_deref().map(decode_date).transpose()?,
      coach_id:    decode_uuid(&self.coach_id)?,
      org_id:      decode_opt_uuid(self.org_id)?,
      replaces:    decode_opt_uuid(self.replaces)?,
      origin:      decode_origin(&self.origin)?,
    })
  }
}

pub const OBSERVATION_COLUMNS: &str = "observation_id, player_id, coach_id, \
  content, observed_on, created_at, plan_id, archived_at";

/// Raw strings read directly from an `observations` row.
pub struct RawObservation {
  pub observation_id: String,
  pub player_id:      String,
  pub coach_id:       String,
  pub content:        String,
  pub observed_on:    String,
  pub created_at:     String,
  pub plan_id:        Option<String>,
  pub archived_at:    Option<String>,
}

impl RawObservation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      observation_id: row.get(0)?,
      player_id:      row.get(1)?,
      coach_id:       row.get(2)?,
      content:        row.get(3)?,
      observed_on:    row.get(4)?,
      created_at:     row.get(5)?,
      plan_id:        row.get(6)?,
      archived_at:    row.get(7)?,
    })
  }

  pub fn into_observation(self) -> Result<Observation> {
    Ok(Observation {
      observation_id: decode_uuid(&self.observation_id)?,
      player_id:      decode_uuid(&self.player_id)?,
      coach_id:       decode_uuid(&self.coach_id)?,
      content:        self.content,
      observed_on:    decode_date(&self.observed_on)?,
      created_at:     decode_dt(&self.created_at)?,
      plan_id:        decode_opt_uuid(self.plan_id)?,
      archived_at:    decode_opt_dt(self.archived_at)?,
    })
  }
}
