pub mod auth;
pub mod error;
pub mod journal;
pub mod middleware;
pub mod profile;
pub mod tiers;

use axum::Router;
use axum::routing::{delete, get, post};

pub use auth::{AppState, AppStateInner};

/// Assemble the full route table. Public: auth + the static tier catalog.
/// Protected: journal routes behind the JWT middleware.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/tiers", get(tiers::list_tiers))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/journal/entries",
            get(journal::load_entries).post(journal::save_entry),
        )
        .route("/journal/encrypted", post(journal::save_encrypted))
        .route("/journal/entries/{entry_id}", delete(journal::delete_entry))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    use solace_db::Database;

    fn test_state() -> AppState {
        Arc::new(AppStateInner {
            db: Database::open_in_memory().unwrap(),
            jwt_secret: "test-secret".to_string(),
        })
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_req(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn register(app: &Router, email: &str) -> (Uuid, String) {
        let (status, body) = call(
            app,
            post_json(
                "/auth/register",
                None,
                json!({ "email": email, "password": "correct horse" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = body["userId"].as_str().unwrap().parse().unwrap();
        let token = body["token"].as_str().unwrap().to_string();
        (user_id, token)
    }

    fn entry_count(state: &AppState) -> i64 {
        state
            .db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM journal_entries", [], |row| {
                    row.get(0)
                })?)
            })
            .unwrap()
    }

    #[tokio::test]
    async fn journal_routes_reject_missing_or_bad_tokens_without_touching_the_store() {
        let state = test_state();
        let app = router(state.clone());

        let entry = json!({ "entryData": { "mood": "calm" } });
        for req in [
            get_req("/journal/entries", None),
            get_req("/journal/entries", Some("not-a-jwt")),
            post_json("/journal/entries", None, entry.clone()),
            post_json("/journal/encrypted", None, json!({ "encryptedData": "x" })),
        ] {
            let (status, body) = call(&app, req).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["error"], "Unauthorized");
        }

        assert_eq!(entry_count(&state), 0);
    }

    #[tokio::test]
    async fn save_rejects_absent_null_and_non_object_entry_data() {
        let state = test_state();
        let app = router(state.clone());
        let (_uid, token) = register(&app, "ada@example.com").await;

        for body in [
            json!({}),
            json!({ "entryData": null }),
            json!({ "entryData": "just a string" }),
            json!({ "entryData": [1, 2, 3] }),
        ] {
            let (status, res) =
                call(&app, post_json("/journal/entries", Some(&token), body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(res["error"], "Invalid request");
        }

        assert_eq!(entry_count(&state), 0);
    }

    #[tokio::test]
    async fn saved_entry_loads_back_with_server_assigned_timestamp() {
        let state = test_state();
        let app = router(state);
        let (_uid, token) = register(&app, "ada@example.com").await;

        let (status, body) = call(
            &app,
            post_json(
                "/journal/entries",
                Some(&token),
                json!({ "entryData": { "mood": "calm", "note": "slept well" } }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = call(&app, get_req("/journal/entries", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["mood"], "calm");
        assert_eq!(entries[0]["note"], "slept well");
        assert!(entries[0]["id"].as_str().unwrap().parse::<Uuid>().is_ok());
        // server-assigned, not caller-supplied
        assert!(entries[0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn encrypted_entries_come_back_opaque() {
        let state = test_state();
        let app = router(state);
        let (_uid, token) = register(&app, "ada@example.com").await;

        let (status, body) = call(
            &app,
            post_json(
                "/journal/encrypted",
                Some(&token),
                json!({ "encryptedData": "b64:0123abcd" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, body) = call(&app, get_req("/journal/entries", Some(&token))).await;
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["encryptedData"], "b64:0123abcd");
        assert!(entries[0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn load_returns_the_full_set_newest_first() {
        let state = test_state();
        let app = router(state.clone());
        let (uid, token) = register(&app, "ada@example.com").await;

        // Seed with explicit timestamps so the expected order is exact.
        for (ts, note) in [
            ("2026-08-07T10:00:00.000000Z", "first"),
            ("2026-08-07T11:00:00.000000Z", "second"),
            ("2026-08-07T12:00:00.000000Z", "third"),
        ] {
            state
                .db
                .insert_journal_entry(
                    &Uuid::new_v4().to_string(),
                    &uid.to_string(),
                    "plain",
                    &json!({ "note": note }).to_string(),
                    ts,
                )
                .unwrap();
        }

        let (_, body) = call(&app, get_req("/journal/entries", Some(&token))).await;
        let notes: Vec<&str> = body["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["note"].as_str().unwrap())
            .collect();
        assert_eq!(notes, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn delete_is_scoped_to_the_owner() {
        let state = test_state();
        let app = router(state.clone());
        let (_ada, ada_token) = register(&app, "ada@example.com").await;
        let (_ben, ben_token) = register(&app, "ben@example.com").await;

        call(
            &app,
            post_json(
                "/journal/entries",
                Some(&ada_token),
                json!({ "entryData": { "note": "mine" } }),
            ),
        )
        .await;

        let (_, body) = call(&app, get_req("/journal/entries", Some(&ada_token))).await;
        let entry_id = body["entries"][0]["id"].as_str().unwrap().to_string();

        // Ben sees not-found, Ada's entry is untouched
        let (status, body) = call(
            &app,
            Request::builder()
                .method("DELETE")
                .uri(format!("/journal/entries/{}", entry_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", ben_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Entry not found");
        assert_eq!(entry_count(&state), 1);

        let (status, body) = call(
            &app,
            Request::builder()
                .method("DELETE")
                .uri(format!("/journal/entries/{}", entry_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", ada_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(entry_count(&state), 0);
    }

    #[tokio::test]
    async fn register_bootstraps_the_profile_once() {
        let state = test_state();
        let app = router(state.clone());
        let (uid, _token) = register(&app, "ada@example.com").await;

        let profile = state.db.get_profile(&uid.to_string()).unwrap().unwrap();
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.tier, "free");
        assert_eq!(profile.tokens_lifetime, 0);
        assert!(profile.terms_accepted_at.is_some());
        assert!(!profile.tts_enabled);

        // Same email again is a conflict, not a second profile
        let (status, body) = call(
            &app,
            post_json(
                "/auth/register",
                None,
                json!({ "email": "ada@example.com", "password": "correct horse" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn tier_catalog_is_public() {
        let app = router(test_state());
        let (status, body) = call(&app, get_req("/tiers", None)).await;
        assert_eq!(status, StatusCode::OK);
        let tiers = body.as_array().unwrap();
        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0]["id"], "free");
    }

    #[tokio::test]
    async fn login_round_trips_registered_credentials() {
        let app = router(test_state());
        register(&app, "ada@example.com").await;

        let (status, body) = call(
            &app,
            post_json(
                "/auth/login",
                None,
                json!({ "email": "ada@example.com", "password": "correct horse" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());

        let (status, body) = call(
            &app,
            post_json(
                "/auth/login",
                None,
                json!({ "email": "ada@example.com", "password": "wrong horse!" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }
}
