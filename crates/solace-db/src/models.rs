/// Database row types — these map directly to SQLite rows.
/// Distinct from solace-types API models to keep the DB layer independent.

pub struct AccountRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

/// The full default attribute set lives in `ProfileRow::bootstrap_defaults`;
/// the bootstrap writes the whole row in one statement, last write wins.
pub struct ProfileRow {
    pub user_id: String,
    pub email: String,
    pub created_at: String,
    pub terms_accepted_at: Option<String>,
    pub privacy_accepted_at: Option<String>,
    pub ethics_accepted_at: Option<String>,
    pub tone: String,
    pub theme: String,
    pub start_page: String,
    pub tokens_lifetime: i64,
    pub tokens_month: i64,
    pub voice_chars_lifetime: i64,
    pub voice_chars_month: i64,
    pub tier: String,
    pub plan_activated_at: Option<String>,
    pub plan_expires_at: Option<String>,
    pub memory_enabled: bool,
    pub tts_enabled: bool,
    pub stt_enabled: bool,
}

impl ProfileRow {
    /// Defaults written for a newly created account. Consent timestamps are
    /// the registration instant: signup is gated on accepting all three
    /// policies, so the account's creation time is the acceptance time.
    pub fn bootstrap_defaults(user_id: &str, email: &str, now: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            created_at: now.to_string(),
            terms_accepted_at: Some(now.to_string()),
            privacy_accepted_at: Some(now.to_string()),
            ethics_accepted_at: Some(now.to_string()),
            tone: "warm".to_string(),
            theme: "system".to_string(),
            start_page: "chat".to_string(),
            tokens_lifetime: 0,
            tokens_month: 0,
            voice_chars_lifetime: 0,
            voice_chars_month: 0,
            tier: "free".to_string(),
            plan_activated_at: None,
            plan_expires_at: None,
            memory_enabled: false,
            tts_enabled: false,
            stt_enabled: false,
        }
    }
}

pub struct JournalEntryRow {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub payload: String,
    pub created_at: String,
}
