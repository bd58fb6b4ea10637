use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// -- JWT Claims --

/// JWT claims shared between solace-api (token issuance in the auth handlers)
/// and the require_auth middleware. Canonical definition lives here in
/// solace-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

// -- Journal --

/// Body of a plaintext journal save. `entryData` stays an open JSON value so
/// the handler itself can distinguish "absent / null / not an object" and
/// reject each with the same validation error the clients already expect.
#[derive(Debug, Deserialize)]
pub struct SaveEntryRequest {
    #[serde(rename = "entryData", default)]
    pub entry_data: Option<Value>,
}

/// Body of an encrypted journal save. The payload is ciphertext produced on
/// the client; the service stores it opaquely and never sees plaintext.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveEncryptedRequest {
    #[serde(rename = "encryptedData")]
    pub encrypted_data: String,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
}

/// One stored entry as returned by the load handler: the storage id plus the
/// entry's own fields flattened beside it. For plaintext entries the fields
/// are the caller's original bag; for encrypted entries a single
/// `encryptedData` field. The server-observed `createdAt` is merged into the
/// map before serialization and wins over any caller-supplied key.
#[derive(Debug, Serialize)]
pub struct JournalEntryRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct LoadEntriesResponse {
    pub success: bool,
    pub entries: Vec<JournalEntryRecord>,
}
