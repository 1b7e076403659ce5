//! Handlers for development-plan endpoints. Each one is a thin call into
//! [`PlanLifecycle`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/players/:id/plans` | Active plan plus archived history |
//! | `POST` | `/players/:id/plans` | First plan only; 409 if any plan exists |
//! | `POST` | `/players/:id/plans/replace` | Archive current plan and open a new one |
//! | `GET`  | `/players/:id/plan-state` | `no_plan`, `active`, or `lapsed` |
//! | `POST` | `/plans/:id/archive` | Idempotent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use pdp_core::{
  PlanLifecycle,
  plan::{Author, DevelopmentPlan, PlanHistory, PlanState},
  store::CoachingStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// Plan text must contain something other than whitespace.
pub(crate) fn require_content(content: &str) -> Result<(), ApiError> {
  if content.trim().is_empty() {
    return Err(ApiError::BadRequest("content must not be empty".into()));
  }
  Ok(())
}

// ─── History ──────────────────────────────────────────────────────────────────

/// `GET /players/:id/plans`
pub async fn history<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Path(player_id): Path<Uuid>,
) -> Result<Json<PlanHistory>, ApiError> {
  let history = PlanLifecycle::new(&*store).list_plan_history(player_id).await?;
  Ok(Json(history))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreatePlanBody {
  pub content:   String,
  /// Defaults to today.
  pub starts_on: Option<NaiveDate>,
  #[serde(flatten)]
  pub author:    Author,
}

/// `POST /players/:id/plans` — returns 201 + the new plan.
pub async fn create_initial<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Path(player_id): Path<Uuid>,
  Json(body): Json<CreatePlanBody>,
) -> Result<impl IntoResponse, ApiError> {
  require_content(&body.content)?;
  let plan = PlanLifecycle::new(&*store)
    .create_initial_plan(player_id, body.content, body.starts_on, body.author)
    .await?;
  Ok((StatusCode::CREATED, Json(plan)))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReplacePlanBody {
  pub content: String,
  #[serde(flatten)]
  pub author:  Author,
}

/// `POST /players/:id/plans/replace` — returns the now-active plan.
pub async fn replace<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Path(player_id): Path<Uuid>,
  Json(body): Json<ReplacePlanBody>,
) -> Result<Json<DevelopmentPlan>, ApiError> {
  require_content(&body.content)?;
  let plan = PlanLifecycle::new(&*store)
    .archive_and_replace(player_id, body.content, body.author)
    .await?;
  Ok(Json(plan))
}

// ─── State ────────────────────────────────────────────────────────────────────

/// `GET /players/:id/plan-state`
pub async fn state<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Path(player_id): Path<Uuid>,
) -> Result<Json<PlanState>, ApiError> {
  let state = PlanLifecycle::new(&*store).plan_state(player_id).await?;
  Ok(Json(state))
}

// ─── Archive ──────────────────────────────────────────────────────────────────

/// `POST /plans/:id/archive`
pub async fn archive<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Path(plan_id): Path<Uuid>,
) -> Result<Json<DevelopmentPlan>, ApiError> {
  let plan = PlanLifecycle::new(&*store).archive_plan(plan_id).await?;
  Ok(Json(plan))
}
