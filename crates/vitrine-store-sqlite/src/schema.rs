//! SQL schema for the vitrine SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    contact_id  TEXT PRIMARY KEY,
    full_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL,
    subject     TEXT NOT NULL,
    message     TEXT NOT NULL,
    status      TEXT NOT NULL DEFAULT 'new',   -- 'new' | 'read' | 'replied'
    created_at  TEXT NOT NULL                  -- ISO 8601 UTC; server-assigned
);

-- The portfolio is a singleton document. The CHECK pins the only row to
-- a fixed id, so concurrent get-or-create cannot produce duplicates.
CREATE TABLE IF NOT EXISTS portfolio (
    portfolio_id  INTEGER PRIMARY KEY CHECK (portfolio_id = 1),
    name          TEXT NOT NULL,
    title         TEXT NOT NULL,
    bio           TEXT NOT NULL,
    email         TEXT NOT NULL,
    phone         TEXT,
    location      TEXT,
    profile_image TEXT,
    skills        TEXT NOT NULL DEFAULT '[]',  -- JSON array of {name, proficiency}
    experience    TEXT NOT NULL DEFAULT '[]',  -- JSON array
    education     TEXT NOT NULL DEFAULT '[]',  -- JSON array
    social_links  TEXT NOT NULL DEFAULT '{}',  -- JSON object, platform -> URL
    updated_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_created_idx ON contacts(created_at);

PRAGMA user_version = 1;
";
