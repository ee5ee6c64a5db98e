//! SQL schema for the RSVP SQLite store.
//!
//! Applied at connection startup when the database's `PRAGMA user_version`
//! is below [`SCHEMA_VERSION`].

/// Version stamped into `user_version` by [`SCHEMA`].
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Records are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS rsvps (
    record_key   TEXT PRIMARY KEY,  -- '<namespace>:<email>:<token>'
    namespace    TEXT NOT NULL,     -- discriminator; 'rsvp' for every RSVP
    name         TEXT NOT NULL,
    email        TEXT NOT NULL,
    guests       TEXT NOT NULL,
    attending    TEXT NOT NULL,
    dietary      TEXT NOT NULL DEFAULT '',
    message      TEXT NOT NULL DEFAULT '',
    submitted_at TEXT NOT NULL      -- RFC 3339 UTC, microseconds; server-assigned
);

CREATE INDEX IF NOT EXISTS rsvps_namespace_idx ON rsvps(namespace);

PRAGMA user_version = 1;
";
