//! Core types and trait definitions for the coaching PDP service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the typed records, the [`store::CoachingStore`] abstraction, and the
//! [`lifecycle::PlanLifecycle`] manager that every caller goes through when
//! creating, archiving, or replacing a player's development plan.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod lifecycle;
pub mod observation;
pub mod plan;
pub mod player;
pub mod store;

pub use error::{Error, ErrorKind, Result, Step};
pub use lifecycle::PlanLifecycle;

use chrono::{DateTime, SubsecRound, Utc};

/// The current instant, truncated to the microsecond precision that storage
/// backends persist. Timestamps compared across a round trip must come from
/// here.
pub fn timestamp_now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

#[cfg(test)]
mod tests;
