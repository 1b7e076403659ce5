//! Handlers for `/players` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/players` | Optional `?team_id=<uuid>` |
//! | `POST` | `/players` | Body: [`NewPlayer`]; returns 201 |
//! | `GET`  | `/players/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pdp_core::{
  player::{NewPlayer, Player},
  store::CoachingStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub team_id: Option<Uuid>,
}

/// `GET /players[?team_id=<uuid>]`
pub async fn list<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Player>>, ApiError> {
  let players = store
    .list_players(params.team_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(players))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /players` — at least one of `first_name`, `last_name`, `name`.
pub async fn create<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPlayer>,
) -> Result<impl IntoResponse, ApiError> {
  let named = [&body.first_name, &body.last_name, &body.name]
    .into_iter()
    .flatten()
    .any(|n| !n.trim().is_empty());
  if !named {
    return Err(ApiError::BadRequest("a player needs a name".into()));
  }

  let player = store.insert_player(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(player)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /players/:id`
pub async fn get_one<S: CoachingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Player>, ApiError> {
  let player = store
    .get_player(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("player {id} not found")))?;
  Ok(Json(player))
}
