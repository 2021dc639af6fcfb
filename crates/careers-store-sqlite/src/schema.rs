//! SQL schema for the careers SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every timestamp column holds epoch milliseconds so ordering and the
/// freshness filter are plain integer comparisons.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS jobs (
    job_id           TEXT PRIMARY KEY,
    title            TEXT NOT NULL,
    company          TEXT NOT NULL,
    location         TEXT NOT NULL,
    description      TEXT NOT NULL,
    responsibilities TEXT NOT NULL DEFAULT '[]',   -- JSON array
    must_have_skills TEXT NOT NULL DEFAULT '[]',   -- JSON array
    industry_type    TEXT NOT NULL,
    department       TEXT NOT NULL,
    employment_type  TEXT NOT NULL,
    role_category    TEXT NOT NULL,
    education        TEXT NOT NULL,
    tags             TEXT NOT NULL DEFAULT '[]',   -- JSON array, display order
    skills           TEXT NOT NULL DEFAULT '[]',   -- JSON array, AI-derived
    application_type TEXT NOT NULL,                -- 'link' | 'form'
    apply_link       TEXT,
    created_at       INTEGER NOT NULL,             -- epoch millis; immutable
    created_by       TEXT NOT NULL,                -- immutable
    CHECK ((application_type = 'link') = (apply_link IS NOT NULL))
);

-- job_id is deliberately not a foreign key: applicants outlive deleted jobs.
CREATE TABLE IF NOT EXISTS applicants (
    applicant_id TEXT PRIMARY KEY,
    job_id       TEXT NOT NULL,
    name         TEXT NOT NULL,
    email        TEXT NOT NULL,
    resume       TEXT NOT NULL,                    -- filename only
    cover_letter TEXT,
    applied_at   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS subscribers (
    subscriber_id TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
    subscribed_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    uid            TEXT PRIMARY KEY,
    email          TEXT NOT NULL,
    role           TEXT NOT NULL,                  -- 'ADMIN' | 'SUPER_ADMIN'
    is_placeholder INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS identities (
    uid           TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,
    created_at    INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    token_hash TEXT PRIMARY KEY,                   -- SHA-256 hex of the token
    uid        TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    expires_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS jobs_created_idx       ON jobs(created_at);
CREATE INDEX IF NOT EXISTS applicants_applied_idx ON applicants(applied_at);
CREATE INDEX IF NOT EXISTS users_email_idx        ON users(email);
CREATE INDEX IF NOT EXISTS sessions_expires_idx   ON sessions(expires_at);

PRAGMA user_version = 1;
";
