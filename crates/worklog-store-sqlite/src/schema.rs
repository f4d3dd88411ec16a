//! SQL schema for the worklog SQLite store.
//!
//! Executed once at connection startup. There is no migration mechanism; the
//! statements are idempotent thanks to `CREATE TABLE IF NOT EXISTS`.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted rows from ever being handed out again.
CREATE TABLE IF NOT EXISTS work (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    date         TEXT NOT NULL,   -- YYYY-MM-DD
    tag          TEXT NOT NULL,
    todo         TEXT NOT NULL,
    done         TEXT NOT NULL,
    date_created TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS task (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    date_created TEXT NOT NULL,
    last_update  TEXT NOT NULL,
    name         TEXT NOT NULL,
    link         TEXT,
    kind         TEXT,
    done         TEXT,
    todo         TEXT
);

CREATE INDEX IF NOT EXISTS work_created_idx ON work(date_created);
CREATE INDEX IF NOT EXISTS task_created_idx ON task(date_created);
";
