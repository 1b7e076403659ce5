//! Player — the root entity that plans and observations hang off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A coached individual. The core only ever reads players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
  pub player_id:  Uuid,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  /// Legacy single-field name, used when first/last are absent.
  pub name:       Option<String>,
  pub team_id:    Option<Uuid>,
  pub joined_at:  DateTime<Utc>,
}

impl Player {
  /// "First Last" when either part is present, otherwise the legacy name.
  pub fn display_name(&self) -> String {
    let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
      .into_iter()
      .flatten()
      .map(str::trim)
      .filter(|p| !p.is_empty())
      .collect();

    if !parts.is_empty() {
      return parts.join(" ");
    }

    match self.name.as_deref().map(str::trim) {
      Some(name) if !name.is_empty() => name.to_owned(),
      _ => "Unnamed player".to_owned(),
    }
  }
}

/// Input to [`crate::store::CoachingStore::insert_player`].
/// `player_id` and `joined_at` are assigned by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlayer {
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name:  Option<String>,
  #[serde(default)]
  pub name:       Option<String>,
  #[serde(default)]
  pub team_id:    Option<Uuid>,
}

impl NewPlayer {
  pub fn named(first: &str, last: &str) -> Self {
    Self {
      first_name: Some(first.to_owned()),
      last_name: Some(last.to_owned()),
      ..Self::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn player(first: Option<&str>, last: Option<&str>, name: Option<&str>) -> Player {
    Player {
      player_id:  Uuid::new_v4(),
      first_name: first.map(str::to_owned),
      last_name:  last.map(str::to_owned),
      name:       name.map(str::to_owned),
      team_id:    None,
      joined_at:  Utc::now(),
    }
  }

  #[test]
  fn display_name_prefers_first_and_last() {
    let p = player(Some("Alice"), Some("Liddell"), Some("Ally"));
    assert_eq!(p.display_name(), "Alice Liddell");
  }

  #[test]
  fn display_name_uses_single_part() {
    assert_eq!(player(Some("Alice"), None, None).display_name(), "Alice");
    assert_eq!(player(None, Some(" Liddell "), None).display_name(), "Liddell");
  }

  #[test]
  fn display_name_falls_back_to_legacy_name() {
    let p = player(Some("  "), None, Some("Ally"));
    assert_eq!(p.display_name(), "Ally");
    assert_eq!(player(None, None, None).display_name(), "Unnamed player");
  }
}
