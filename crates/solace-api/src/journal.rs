use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{error, warn};
use uuid::Uuid;

use solace_types::api::{
    Claims, JournalEntryRecord, LoadEntriesResponse, SaveEncryptedRequest, SaveEntryRequest,
    SaveResponse,
};

use crate::auth::AppState;
use crate::error::ApiError;

const KIND_PLAIN: &str = "plain";
const KIND_ENCRYPTED: &str = "encrypted";

/// Timestamps are stored as fixed-width RFC 3339 so the TEXT column's
/// lexicographic order is chronological order.
fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub async fn save_entry(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SaveEntryRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    // Payload validation happens before any store access: absent, null, or
    // non-object entryData is rejected outright.
    let fields = match req.entry_data {
        Some(Value::Object(map)) => map,
        _ => return Err(ApiError::InvalidRequest),
    };

    let payload = Value::Object(fields).to_string();
    let entry_id = Uuid::new_v4();
    let created_at = now_rfc3339();

    // Run blocking DB insert off the async runtime
    let db = state.clone();
    let uid = claims.sub.to_string();
    tokio::task::spawn_blocking(move || {
        db.db
            .insert_journal_entry(&entry_id.to_string(), &uid, KIND_PLAIN, &payload, &created_at)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Store("Failed to save journal")
    })?
    .map_err(|e| {
        error!("Journal write failed for {}: {}", claims.sub, e);
        ApiError::Store("Failed to save journal")
    })?;

    Ok(Json(SaveResponse { success: true }))
}

/// Same shape as the plaintext save, but the payload is a single opaque
/// string encrypted on the client. It is stored verbatim; the service never
/// sees plaintext. App-integrity attestation for this path is enforced by the
/// hosting platform in front of the handler, not here.
pub async fn save_encrypted(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SaveEncryptedRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    let entry_id = Uuid::new_v4();
    let created_at = now_rfc3339();

    let db = state.clone();
    let uid = claims.sub.to_string();
    tokio::task::spawn_blocking(move || {
        db.db.insert_journal_entry(
            &entry_id.to_string(),
            &uid,
            KIND_ENCRYPTED,
            &req.encrypted_data,
            &created_at,
        )
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Store("Failed to save journal")
    })?
    .map_err(|e| {
        error!("Encrypted journal write failed for {}: {}", claims.sub, e);
        ApiError::Store("Failed to save journal")
    })?;

    Ok(Json(SaveResponse { success: true }))
}

/// The caller's entire collection, creation time descending. No pagination —
/// either the full ordered set comes back or the call fails.
pub async fn load_entries(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<LoadEntriesResponse>, ApiError> {
    let db = state.clone();
    let uid = claims.sub.to_string();
    let rows = tokio::task::spawn_blocking(move || db.db.get_journal_entries(&uid))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Store("Failed to load journal entries")
        })?
        .map_err(|e| {
            error!("Journal read failed for {}: {}", claims.sub, e);
            ApiError::Store("Failed to load journal entries")
        })?;

    let entries = rows
        .into_iter()
        .map(|row| {
            let mut fields = if row.kind == KIND_ENCRYPTED {
                let mut map = serde_json::Map::new();
                map.insert("encryptedData".to_string(), Value::String(row.payload));
                map
            } else {
                match serde_json::from_str::<Value>(&row.payload) {
                    Ok(Value::Object(map)) => map,
                    _ => {
                        warn!("Corrupt journal payload on entry '{}'", row.id);
                        serde_json::Map::new()
                    }
                }
            };

            // Server-observed creation time; wins over any caller-supplied key.
            fields.insert("createdAt".to_string(), Value::String(row.created_at));

            JournalEntryRecord {
                id: row.id.parse().unwrap_or_else(|e| {
                    warn!("Corrupt entry id '{}': {}", row.id, e);
                    Uuid::default()
                }),
                fields,
            }
        })
        .collect();

    Ok(Json(LoadEntriesResponse {
        success: true,
        entries,
    }))
}

/// Backs the journal's trash flow. Owner-scoped: an unknown id and another
/// user's id are indistinguishable, both report not-found.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<SaveResponse>, ApiError> {
    let db = state.clone();
    let uid = claims.sub.to_string();
    let deleted =
        tokio::task::spawn_blocking(move || db.db.delete_journal_entry(&uid, &entry_id.to_string()))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                ApiError::Store("Failed to delete journal entry")
            })?
            .map_err(|e| {
                error!("Journal delete failed for {}: {}", claims.sub, e);
                ApiError::Store("Failed to delete journal entry")
            })?;

    if !deleted {
        return Err(ApiError::EntryNotFound);
    }

    Ok(Json(SaveResponse { success: true }))
}
