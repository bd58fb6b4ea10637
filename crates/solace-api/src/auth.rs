use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::error;
use uuid::Uuid;

use solace_db::Database;
use solace_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::error::ApiError;
use crate::profile;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate input
    if !req.email.contains('@') || req.email.len() > 254 {
        return Err(ApiError::InvalidRequest);
    }
    if req.password.len() < 8 {
        return Err(ApiError::InvalidRequest);
    }

    // Check if the email is taken
    if state
        .db
        .get_account_by_email(&req.email)
        .map_err(|e| {
            error!("Account lookup failed: {}", e);
            ApiError::Store("Failed to create account")
        })?
        .is_some()
    {
        return Err(ApiError::EmailTaken);
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Password hash failed: {}", e);
            ApiError::Store("Failed to create account")
        })?
        .to_string();

    let user_id = Uuid::new_v4();

    state
        .db
        .create_account(&user_id.to_string(), &req.email, &password_hash)
        .map_err(|e| {
            error!("Account write failed: {}", e);
            ApiError::Store("Failed to create account")
        })?;

    // Profile bootstrap fires exactly once per new account, supplied the new
    // id and declared email. A write failure surfaces as this call's failure.
    profile::bootstrap(&state.db, user_id, &req.email).map_err(|e| {
        error!("Profile bootstrap failed for {}: {}", user_id, e);
        ApiError::Store("Failed to create account")
    })?;

    let token = create_token(&state.jwt_secret, user_id, &req.email).map_err(|e| {
        error!("Token issuance failed: {}", e);
        ApiError::Store("Failed to create account")
    })?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .db
        .get_account_by_email(&req.email)
        .map_err(|e| {
            error!("Account lookup failed: {}", e);
            ApiError::Store("Failed to log in")
        })?
        .ok_or(ApiError::Unauthorized)?;

    // Verify password
    let parsed_hash = PasswordHash::new(&account.password).map_err(|e| {
        error!("Corrupt password hash for {}: {}", account.id, e);
        ApiError::Store("Failed to log in")
    })?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthorized)?;

    let user_id: Uuid = account.id.parse().map_err(|e| {
        error!("Corrupt account id '{}': {}", account.id, e);
        ApiError::Store("Failed to log in")
    })?;

    let token = create_token(&state.jwt_secret, user_id, &account.email).map_err(|e| {
        error!("Token issuance failed: {}", e);
        ApiError::Store("Failed to log in")
    })?;

    Ok(Json(LoginResponse {
        user_id,
        email: account.email,
        token,
    }))
}

fn create_token(secret: &str, user_id: Uuid, email: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
