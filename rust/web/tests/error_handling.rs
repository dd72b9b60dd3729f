//! Status codes and body shape for every error path of the game API.
use blackjack_web::server::{AppContext, ServerConfig, WebServer};
use blackjack_web::{ErrorResponse, IntoErrorResponse, MemoryStore, SessionError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use warp::http::StatusCode;

async fn post_action(ctx: &AppContext, id: &str, body: Value) -> (StatusCode, ErrorResponse) {
    let response = warp::test::request()
        .method("POST")
        .path(&format!("/api/game/{id}/action"))
        .header("content-type", "application/json")
        .body(body.to_string())
        .reply(&WebServer::routes(ctx))
        .await;
    let status = response.status();
    let error = serde_json::from_slice(response.body()).expect("error body");
    (status, error)
}

#[tokio::test]
async fn unknown_session_is_404() {
    let ctx = AppContext::new_for_tests();
    let (status, error) = post_action(&ctx, "no-such-id", json!({ "action": "deal" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error.error, "session_not_found");
    assert_eq!(error.details, Some(json!({ "session_id": "no-such-id" })));
}

#[tokio::test]
async fn unknown_action_is_400() {
    let ctx = AppContext::new_for_tests();
    let id = ctx.sessions().create_session().expect("create").session_id;
    let (status, error) = post_action(&ctx, &id, json!({ "action": "split" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_action");
    assert_eq!(error.message, "Invalid action: split");
    assert_eq!(error.details.as_ref().map(|d| &d["action"]), Some(&json!("split")));
}

#[tokio::test]
async fn missing_action_field_is_400() {
    let ctx = AppContext::new_for_tests();
    let id = ctx.sessions().create_session().expect("create").session_id;
    let (status, error) = post_action(&ctx, &id, json!({ "move": "hit" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_request");
}

#[tokio::test]
async fn hit_and_stand_without_a_round_are_409_and_do_not_persist() {
    let ctx = AppContext::new_for_tests();
    let sessions = ctx.sessions();
    let id = sessions.create_session().expect("create").session_id;
    let before = sessions.state(&id).expect("state");

    for action in ["hit", "stand"] {
        let (status, error) = post_action(&ctx, &id, json!({ "action": action })).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error.error, "inactive_round");
    }

    assert_eq!(sessions.state(&id).expect("state"), before);
}

#[tokio::test]
async fn expired_session_is_410() {
    let store = Arc::new(MemoryStore::new());
    let config = ServerConfig::for_tests().with_session_ttl(Duration::from_secs(60));
    let ctx = AppContext::with_store(config, store.clone());
    let id = ctx.sessions().create_session().expect("create").session_id;
    assert!(store.backdate(&id, Duration::from_secs(3600)));

    let (status, error) = post_action(&ctx, &id, json!({ "action": "deal" })).await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(error.error, "session_expired");
    assert!(store.is_empty());
}

#[test]
fn error_codes_are_stable() {
    let cases = [
        (SessionError::NotFound("a".into()), "session_not_found"),
        (SessionError::Expired("a".into()), "session_expired"),
        (SessionError::InvalidAction("a".into()), "invalid_action"),
        (SessionError::InactiveRound, "inactive_round"),
        (SessionError::Engine("a".into()), "engine_error"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code);
        assert_eq!(err.to_error_response().error, code);
    }
}
