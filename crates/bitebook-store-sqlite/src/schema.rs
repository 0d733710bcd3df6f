//! SQL schema for the Bitebook SQLite store.
//!
//! Executed once at startup on the first pooled connection. Future
//! migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never deleted; `status` carries the soft-delete state.
CREATE TABLE IF NOT EXISTS contacts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    created_time  TEXT    NOT NULL,   -- RFC 3339 UTC; set once at insert
    updated_time  TEXT    NOT NULL,   -- RFC 3339 UTC; refreshed on every write
    status        TEXT    NOT NULL DEFAULT 'ENABLED'
                  CHECK (status IN ('ENABLED', 'DISABLED', 'DELETED')),
    first_name    TEXT    NOT NULL,
    last_name     TEXT    NOT NULL,
    email         TEXT    NOT NULL,
    phone         TEXT    NOT NULL,
    notes         TEXT,
    verified      INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS restaurants (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    created_time  TEXT    NOT NULL,
    updated_time  TEXT    NOT NULL,
    status        TEXT    NOT NULL DEFAULT 'ENABLED'
                  CHECK (status IN ('ENABLED', 'DISABLED', 'DELETED')),
    name          TEXT    NOT NULL,
    address       TEXT,
    coordinates   TEXT,               -- JSON {\"lng\":..,\"lat\":..} or NULL
    phone         TEXT,
    website       TEXT,
    description   TEXT,
    rating        INTEGER CHECK (rating BETWEEN 1 AND 5),
    review        TEXT
);

CREATE INDEX IF NOT EXISTS contacts_status_idx    ON contacts(status);
CREATE INDEX IF NOT EXISTS restaurants_status_idx ON restaurants(status);

PRAGMA user_version = 1;
";
