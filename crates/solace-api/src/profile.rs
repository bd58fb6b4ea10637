use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use solace_db::Database;
use solace_db::models::ProfileRow;

/// Write the default profile row for a newly created account: consent
/// timestamps, preference set, zeroed usage counters, free-tier subscription
/// record, feature flags off. Idempotent in effect — invoked twice for the
/// same id, the second write overwrites the first. Nothing in scope mutates
/// the row afterwards.
pub fn bootstrap(db: &Database, user_id: Uuid, email: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let row = ProfileRow::bootstrap_defaults(&user_id.to_string(), email, &now);
    db.upsert_profile(&row)
}
