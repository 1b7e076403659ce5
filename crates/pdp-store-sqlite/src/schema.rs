//! SQL schema for the PDP SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS players (
    player_id   TEXT PRIMARY KEY,
    first_name  TEXT,
    last_name   TEXT,
    name        TEXT,            -- legacy single-field name
    team_id     TEXT,
    joined_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pdp (
    plan_id     TEXT PRIMARY KEY,
    player_id   TEXT NOT NULL REFERENCES players(player_id),
    content     TEXT NOT NULL,
    starts_on   TEXT NOT NULL,   -- YYYY-MM-DD
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, microseconds; server-assigned
    archived_at TEXT,            -- NULL while active
    ends_on     TEXT,
    coach_id    TEXT NOT NULL,
    org_id      TEXT,
    replaces    TEXT REFERENCES pdp(plan_id),
    origin      TEXT NOT NULL DEFAULT 'initial'
                CHECK (origin IN ('initial', 'replacement'))
);

-- At most one active plan per player.
CREATE UNIQUE INDEX IF NOT EXISTS pdp_one_active_idx
    ON pdp(player_id) WHERE archived_at IS NULL;
CREATE INDEX IF NOT EXISTS pdp_player_idx ON pdp(player_id);

-- Archival is terminal.
CREATE TRIGGER IF NOT EXISTS pdp_archive_once
BEFORE UPDATE OF archived_at ON pdp
WHEN OLD.archived_at IS NOT NULL
BEGIN
    SELECT RAISE(ABORT, 'plan is already archived');
END;

CREATE TABLE IF NOT EXISTS observations (
    observation_id TEXT PRIMARY KEY,
    player_id      TEXT NOT NULL REFERENCES players(player_id),
    coach_id       TEXT NOT NULL,
    content        TEXT NOT NULL,
    observed_on    TEXT NOT NULL,   -- YYYY-MM-DD
    created_at     TEXT NOT NULL,
    plan_id        TEXT REFERENCES pdp(plan_id),
    archived_at    TEXT
);

CREATE INDEX IF NOT EXISTS observations_player_idx ON observations(player_id);
CREATE INDEX IF NOT EXISTS observations_plan_idx   ON observations(plan_id);

-- A plan link, once set, never changes.
CREATE TRIGGER IF NOT EXISTS observations_link_once
BEFORE UPDATE OF plan_id ON observations
WHEN OLD.plan_id IS NOT NULL AND NEW.plan_id IS NOT OLD.plan_id
BEGIN
    SELECT RAISE(ABORT, 'observation is already linked to a plan');
END;

PRAGMA user_version = 1;
";
