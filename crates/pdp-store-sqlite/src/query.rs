//! Translation of core filters and patches into SQL fragments with
//! positional parameters.

use pdp_core::store::{
  ObservationFilter, ObservationPatch, Order, PlanFilter, PlanLink, PlanPatch,
};
use rusqlite::types::Value;

use crate::encode::{encode_date, encode_dt, encode_uuid};

/// A list of SQL fragments joined with `AND` (for `WHERE`) or `,` (for `SET`),
/// with their bound values in placeholder order.
#[derive(Default)]
pub struct Fragments {
  parts:  Vec<&'static str>,
  params: Vec<Value>,
}

impl Fragments {
  fn bind(&mut self, part: &'static str, value: String) {
    self.parts.push(part);
    self.params.push(Value::Text(value));
  }

  fn push(&mut self, part: &'static str) { self.parts.push(part); }

  pub fn is_empty(&self) -> bool { self.parts.is_empty() }

  /// `WHERE a AND b`, or nothing if there are no conditions.
  pub fn where_clause(&self) -> String {
    if self.parts.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", self.parts.join(" AND "))
    }
  }

  pub fn set_clause(&self) -> String { self.parts.join(", ") }

  pub fn into_params(self) -> Vec<Value> { self.params }
}

pub fn order_keyword(order: Order) -> &'static str {
  match order {
    Order::OldestFirst => "ASC",
    Order::NewestFirst => "DESC",
  }
}

pub fn plan_conditions(filter: &PlanFilter) -> Fragments {
  let mut f = Fragments::default();
  if let Some(id) = filter.plan_id {
    f.bind("plan_id = ?", encode_uuid(id));
  }
  if let Some(id) = filter.player_id {
    f.bind("player_id = ?", encode_uuid(id));
  }
  match filter.active {
    Some(true) => f.push("archived_at IS NULL"),
    Some(false) => f.push("archived_at IS NOT NULL"),
    None => {}
  }
  f
}

pub fn plan_assignments(patch: &PlanPatch) -> Fragments {
  let mut f = Fragments::default();
  if let Some(at) = patch.archived_at {
    f.bind("archived_at = ?", encode_dt(at));
  }
  if let Some(on) = patch.ends_on {
    f.bind("ends_on = ?", encode_date(on));
  }
  f
}

pub fn observation_conditions(filter: &ObservationFilter) -> Fragments {
  let mut f = Fragments::default();
  if let Some(id) = filter.observation_id {
    f.bind("observation_id = ?", encode_uuid(id));
  }
  if let Some(id) = filter.player_id {
    f.bind("player_id = ?", encode_uuid(id));
  }
  match filter.link {
    PlanLink::Any => {}
    PlanLink::Unlinked => f.push("plan_id IS NULL"),
    PlanLink::Linked(id) => f.bind("plan_id = ?", encode_uuid(id)),
  }
  if let Some(d) = filter.observed_from {
    f.bind("observed_on >= ?", encode_date(d));
  }
  if let Some(d) = filter.observed_until {
    f.bind("observed_on <= ?", encode_date(d));
  }
  if let Some(t) = filter.created_until {
    f.bind("created_at <= ?", encode_dt(t));
  }
  match filter.archived {
    Some(true) => f.push("archived_at IS NOT NULL"),
    Some(false) => f.push("archived_at IS NULL"),
    None => {}
  }
  f
}

pub fn observation_assignments(patch: &ObservationPatch) -> Fragments {
  let mut f = Fragments::default();
  if let Some(id) = patch.plan_id {
    f.bind("plan_id = ?", encode_uuid(id));
  }
  if let Some(at) = patch.archived_at {
    f.bind("archived_at = ?", encode_dt(at));
  }
  f
}
