use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS accounts (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per account, written by the profile bootstrap at
        -- registration time. Later mutation (usage accounting, plan changes)
        -- belongs to external collaborators.
        CREATE TABLE IF NOT EXISTS profiles (
            user_id              TEXT PRIMARY KEY REFERENCES accounts(id),
            email                TEXT NOT NULL,
            created_at           TEXT NOT NULL,
            terms_accepted_at    TEXT,
            privacy_accepted_at  TEXT,
            ethics_accepted_at   TEXT,
            tone                 TEXT NOT NULL,
            theme                TEXT NOT NULL,
            start_page           TEXT NOT NULL,
            tokens_lifetime      INTEGER NOT NULL DEFAULT 0,
            tokens_month         INTEGER NOT NULL DEFAULT 0,
            voice_chars_lifetime INTEGER NOT NULL DEFAULT 0,
            voice_chars_month    INTEGER NOT NULL DEFAULT 0,
            tier                 TEXT NOT NULL DEFAULT 'free',
            plan_activated_at    TEXT,
            plan_expires_at      TEXT,
            memory_enabled       INTEGER NOT NULL DEFAULT 0,
            tts_enabled          INTEGER NOT NULL DEFAULT 0,
            stt_enabled          INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS journal_entries (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL REFERENCES accounts(id),
            kind        TEXT NOT NULL CHECK (kind IN ('plain', 'encrypted')),
            payload     TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_journal_user_created
            ON journal_entries(user_id, created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
