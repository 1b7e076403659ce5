//! JSON REST API for player development plans.
//!
//! Exposes an axum [`Router`] backed by any [`pdp_core::store::CoachingStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pdp_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod observations;
pub mod plans;
pub mod players;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use pdp_core::store::CoachingStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CoachingStore + 'static,
{
  Router::new()
    // Players
    .route("/players", get(players::list::<S>).post(players::create::<S>))
    .route("/players/{id}", get(players::get_one::<S>))
    // Plans
    .route(
      "/players/{id}/plans",
      get(plans::history::<S>).post(plans::create_initial::<S>),
    )
    .route("/players/{id}/plans/replace", post(plans::replace::<S>))
    .route("/players/{id}/plan-state", get(plans::state::<S>))
    .route("/plans/{id}/archive", post(plans::archive::<S>))
    // Observations
    .route("/players/{id}/observations", post(observations::record::<S>))
    .route("/observations/{id}/archive", post(observations::archive::<S>))
    .with_state(store)
}
