use crate::Database;
use crate::models::{AccountRow, JournalEntryRow, ProfileRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Accounts --

    pub fn create_account(&self, id: &str, email: &str, password_hash: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO accounts (id, email, password) VALUES (?1, ?2, ?3)",
                (id, email, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_account_by_email(&self, email: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| query_account_by_email(conn, email))
    }

    // -- Profiles --

    /// Write the caller's profile row wholesale. `INSERT OR REPLACE` keyed on
    /// `user_id`: invoking the bootstrap twice for one account leaves exactly
    /// one row, the second write's values winning. No merge.
    pub fn upsert_profile(&self, profile: &ProfileRow) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO profiles (
                    user_id, email, created_at,
                    terms_accepted_at, privacy_accepted_at, ethics_accepted_at,
                    tone, theme, start_page,
                    tokens_lifetime, tokens_month,
                    voice_chars_lifetime, voice_chars_month,
                    tier, plan_activated_at, plan_expires_at,
                    memory_enabled, tts_enabled, stt_enabled
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
                rusqlite::params![
                    profile.user_id,
                    profile.email,
                    profile.created_at,
                    profile.terms_accepted_at,
                    profile.privacy_accepted_at,
                    profile.ethics_accepted_at,
                    profile.tone,
                    profile.theme,
                    profile.start_page,
                    profile.tokens_lifetime,
                    profile.tokens_month,
                    profile.voice_chars_lifetime,
                    profile.voice_chars_month,
                    profile.tier,
                    profile.plan_activated_at,
                    profile.plan_expires_at,
                    profile.memory_enabled,
                    profile.tts_enabled,
                    profile.stt_enabled,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRow>> {
        self.with_conn(|conn| query_profile(conn, user_id))
    }

    // -- Journal entries --

    pub fn insert_journal_entry(
        &self,
        id: &str,
        user_id: &str,
        kind: &str,
        payload: &str,
        created_at: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO journal_entries (id, user_id, kind, payload, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, user_id, kind, payload, created_at],
            )?;
            Ok(())
        })
    }

    /// The caller's full collection, newest first. Id is the tiebreak so two
    /// entries sharing a timestamp load in a stable order.
    pub fn get_journal_entries(&self, user_id: &str) -> Result<Vec<JournalEntryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, kind, payload, created_at
                 FROM journal_entries
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )?;

            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(JournalEntryRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        kind: row.get(2)?,
                        payload: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Delete one entry, scoped to its owner. Returns false when no row
    /// matched — an unknown id or another user's entry look the same.
    pub fn delete_journal_entry(&self, user_id: &str, entry_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let affected = conn.execute(
                "DELETE FROM journal_entries WHERE id = ?1 AND user_id = ?2",
                (entry_id, user_id),
            )?;
            Ok(affected > 0)
        })
    }
}

fn query_account_by_email(conn: &Connection, email: &str) -> Result<Option<AccountRow>> {
    let mut stmt =
        conn.prepare("SELECT id, email, password, created_at FROM accounts WHERE email = ?1")?;

    let row = stmt
        .query_row([email], |row| {
            Ok(AccountRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_profile(conn: &Connection, user_id: &str) -> Result<Option<ProfileRow>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, email, created_at,
                terms_accepted_at, privacy_accepted_at, ethics_accepted_at,
                tone, theme, start_page,
                tokens_lifetime, tokens_month,
                voice_chars_lifetime, voice_chars_month,
                tier, plan_activated_at, plan_expires_at,
                memory_enabled, tts_enabled, stt_enabled
         FROM profiles WHERE user_id = ?1",
    )?;

    let row = stmt
        .query_row([user_id], |row| {
            Ok(ProfileRow {
                user_id: row.get(0)?,
                email: row.get(1)?,
                created_at: row.get(2)?,
                terms_accepted_at: row.get(3)?,
                privacy_accepted_at: row.get(4)?,
                ethics_accepted_at: row.get(5)?,
                tone: row.get(6)?,
                theme: row.get(7)?,
                start_page: row.get(8)?,
                tokens_lifetime: row.get(9)?,
                tokens_month: row.get(10)?,
                voice_chars_lifetime: row.get(11)?,
                voice_chars_month: row.get(12)?,
                tier: row.get(13)?,
                plan_activated_at: row.get(14)?,
                plan_expires_at: row.get(15)?,
                memory_enabled: row.get(16)?,
                tts_enabled: row.get(17)?,
                stt_enabled: row.get(18)?,
            })
        })
        .optional()?;

    Ok(row)
}
