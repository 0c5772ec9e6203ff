use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use troophq::api::router::ApiRoutes;
use troophq::app_state::AppState;
use troophq::settings::config::Settings;

async fn create_test_server() -> TestServer {
    // cost 4 keeps the test fast; production hashes use the default cost
    let hash = bcrypt::hash("correct horse", 4).unwrap();

    let yaml = format!(
        r#"
debug: false
api:
  bind_address: 127.0.0.1:0
  session_ttl_minutes: 60
  users:
    leader@example.com:
      password_hash: "{hash}"
      name: Leslie Leader
      roles: [troop_leader]
    parent@example.com:
      password_hash: "{hash}"
      name: Pat Parent
      roles: [parent]
lockout:
  threshold: 5
  window_minutes: 15
rate_limiting:
  enabled: false
privileges_file: config/privileges.yaml
"#
    );

    let settings: Settings = serde_norway::from_str(&yaml).unwrap();
    let state = AppState::from_settings(settings).await.unwrap();
    TestServer::new(ApiRoutes::create(state)).unwrap()
}

async fn login(server: &TestServer, email: &str, password: &str) -> (StatusCode, Value) {
    let response = server
        .post("/api/v1/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    let status = response.status_code();
    (status, response.json::<Value>())
}

#[tokio::test]
async fn test_health_and_info_are_public() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get("/api/v1/info").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_happy_path() {
    let server = create_test_server().await;

    let (status, body) = login(&server, "leader@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Leslie Leader");
    assert_eq!(body["roles"][0], "troop_leader");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_lockout_after_repeated_failures() {
    let server = create_test_server().await;

    // four misses are tolerated
    for _ in 0..4 {
        let (status, _) = login(&server, "leader@example.com", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // the fifth miss arms the lockout
    let (status, _) = login(&server, "leader@example.com", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // even the correct password is refused while locked out
    let (status, body) = login(&server, "leader@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], true);

    // lockout is per identifier, other accounts are unaffected
    let (status, _) = login(&server, "parent@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_successful_login_resets_failure_count() {
    let server = create_test_server().await;

    for _ in 0..4 {
        let (status, _) = login(&server, "parent@example.com", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, _) = login(&server, "parent@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::OK);

    // the counter restarted, so four more misses still do not lock
    for _ in 0..4 {
        let (status, _) = login(&server, "parent@example.com", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    let (status, _) = login(&server, "parent@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_accounts_are_tracked_too() {
    let server = create_test_server().await;

    for _ in 0..5 {
        let (status, _) = login(&server, "ghost@example.com", "whatever").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, _) = login(&server, "ghost@example.com", "whatever").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_authenticated_routes_need_a_session() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/authenticated/scopes").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/v1/authenticated/scopes")
        .authorization_bearer("not-a-session")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_scopes_reflect_the_privilege_matrix() {
    let server = create_test_server().await;

    let (_, body) = login(&server, "parent@example.com", "correct horse").await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = server
        .get("/api/v1/authenticated/scopes")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["email"], "parent@example.com");

    let scopes = body["scopes"].as_array().unwrap();
    let scope_of = |capability: &str| {
        scopes
            .iter()
            .find(|s| s["capability"] == capability)
            .map(|s| s["scope"].clone())
            .unwrap()
    };

    assert_eq!(scope_of("view_roster"), "household");
    assert_eq!(scope_of("view_events"), "troop");
    assert_eq!(scope_of("manage_troop"), "none");
}

#[tokio::test]
async fn test_capability_catalog_is_complete() {
    let server = create_test_server().await;

    let (_, body) = login(&server, "parent@example.com", "correct horse").await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = server
        .get("/api/v1/authenticated/capabilities")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["capabilities"].as_array().unwrap().len(), 27);
}

#[tokio::test]
async fn test_role_administration_needs_manage_settings() {
    let server = create_test_server().await;

    // a parent has no manage_settings scope
    let (_, body) = login(&server, "parent@example.com", "correct horse").await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = server
        .get("/api/v1/authenticated/roles")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // the troop leader does
    let (_, body) = login(&server, "leader@example.com", "correct horse").await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = server
        .get("/api/v1/authenticated/roles")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert!(!body["roles"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_invalidates_the_session() {
    let server = create_test_server().await;

    let (_, body) = login(&server, "leader@example.com", "correct horse").await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = server
        .post("/api/v1/authenticated/logout")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get("/api/v1/authenticated/scopes")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
