//! Handlers for observation endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/players/:id/observations` | Linked to the active plan, if any |
//! | `POST` | `/observations/:id/archive` | Idempotent soft-archive |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use pdp_core::{PlanLifecycle, observation::Observation, store::CoachingStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, plans::require_content};

#[derive(Debug, Deserialize)]
pub struct RecordBody {
  pub content:     String,
  /// Defaults to today.
  pub observed_on: Option<NaiveDate>,
  pub coach_id:    Uuid,
}

/// `POST /players/:id/observations` — returns 201 + the stored observation.
pub async fn record<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Path(player_id): Path<Uuid>,
  Json(body): Json<RecordBody>,
) -> Result<impl IntoResponse, ApiError> {
  require_content(&body.content)?;
  let observed_on = body.observed_on.unwrap_or_else(|| Utc::now().date_naive());
  let observation = PlanLifecycle::new(&*store)
    .record_observation(player_id, body.content, observed_on, body.coach_id)
    .await?;
  Ok((StatusCode::CREATED, Json(observation)))
}

/// `POST /observations/:id/archive`
pub async fn archive<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Path(observation_id): Path<Uuid>,
) -> Result<Json<Observation>, ApiError> {
  let observation = PlanLifecycle::new(&*store)
    .archive_observation(observation_id)
    .await?;
  Ok(Json(observation))
}
