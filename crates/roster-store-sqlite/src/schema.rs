//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Reference data; only ever joined from the API.
CREATE TABLE IF NOT EXISTS person_type (
    person_type_id INTEGER PRIMARY KEY,
    type_name      TEXT NOT NULL,
    person_type    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS person (
    person_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    dni               TEXT    NOT NULL,           -- not unique
    birthdate         TEXT    NOT NULL,           -- YYYY-MM-DD
    names             TEXT    NOT NULL,
    last_names        TEXT    NOT NULL,
    complete_name     TEXT    NOT NULL,
    details           TEXT,
    bio               TEXT,
    image             TEXT,
    is_active         INTEGER NOT NULL DEFAULT 1,
    registered_date   TEXT    NOT NULL,           -- RFC 3339 UTC
    unregistered_date TEXT,                       -- RFC 3339 UTC or NULL
    votes             INTEGER NOT NULL DEFAULT 0,
    person_type_id    INTEGER NOT NULL REFERENCES person_type(person_type_id)
);

CREATE TABLE IF NOT EXISTS role (
    role_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    role_name         TEXT    NOT NULL,
    description       TEXT,
    is_active         INTEGER NOT NULL DEFAULT 1,
    registered_date   TEXT    NOT NULL,
    unregistered_date TEXT
);

CREATE INDEX IF NOT EXISTS person_active_idx ON person(is_active);
CREATE INDEX IF NOT EXISTS person_type_idx   ON person(person_type_id);
CREATE INDEX IF NOT EXISTS role_active_idx   ON role(is_active);

PRAGMA user_version = 1;
";
