//! Guild endpoints through the router

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{assert_invariants, json_body, token, TestApp};

const CREATE_RAVENS: &str = r#"{"name":"Ravens","characterName":"Thorin"}"#;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body.get("version").is_some());
}

#[tokio::test]
async fn test_mutations_require_authentication() {
    let app = TestApp::new();

    let response = app.post_json("/api/guilds", CREATE_RAVENS, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["code"], 10003);

    let response = app
        .post_json("/api/guilds", CREATE_RAVENS, Some("not-a-token"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/api/guilds/invites", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(app.store.snapshot().guilds.is_empty());
}

#[tokio::test]
async fn test_create_guild_returns_created() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/guilds", CREATE_RAVENS, Some(&token(1)))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["name"], "Ravens");
    assert!(body["id"].as_i64().is_some());

    let response = app
        .post_json(
            "/api/guilds",
            r#"{"name":"RAVENS","characterName":"Gloin"}"#,
            Some(&token(4)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_guild_validation_errors() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/guilds",
            r#"{"name":"Ravens","characterName":""}"#,
            Some(&token(1)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_json(
            "/api/guilds",
            r#"{"name":"R@vens","characterName":"Thorin"}"#,
            Some(&token(1)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 10007);

    let response = app
        .post_json(
            "/api/guilds",
            r#"{"name":"Ravens","characterName":"Kili"}"#,
            Some(&token(3)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_guild_list_is_public() {
    let app = TestApp::new();
    app.post_json("/api/guilds", CREATE_RAVENS, Some(&token(1))).await;

    let response = app.get("/api/guilds?page=1&limit=10&search=rav", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["guilds"][0]["name"], "Ravens");
    assert_eq!(body["guilds"][0]["ownerName"], "Thorin");
    assert_eq!(body["guilds"][0]["memberCount"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_details_flags_only_for_valid_token() {
    let app = TestApp::new();
    app.post_json("/api/guilds", CREATE_RAVENS, Some(&token(1))).await;

    let body = json_body(app.get("/api/guilds/ravens", None).await).await;
    assert_eq!(body["name"], "Ravens");
    assert_eq!(body["ownerName"], "Thorin");
    assert_eq!(body["members"][0]["rank"], "Leader");
    assert_eq!(body["members"][0]["status"], "online");
    assert!(body.get("isMember").is_none());

    let body = json_body(app.get("/api/guilds/Ravens", Some("garbage")).await).await;
    assert!(body.get("isMember").is_none());

    let body = json_body(app.get("/api/guilds/Ravens", Some(&token(1))).await).await;
    assert_eq!(body["isMember"], true);
    assert_eq!(body["canInvite"], true);
    assert_eq!(body["hasPendingInvite"], false);

    let response = app.get("/api/guilds/Nowhere", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invite_accept_kick_flow() {
    let app = TestApp::new();
    let thorin = token(1);
    let balin = token(2);

    let response = app.post_json("/api/guilds", CREATE_RAVENS, Some(&thorin)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .post_json("/api/guilds/Ravens/invite", r#"{"playerName":"Balin"}"#, Some(&thorin))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let pending = json_body(app.get("/api/guilds/invites", Some(&balin)).await).await;
    assert_eq!(pending[0]["guildName"], "Ravens");
    assert_eq!(pending[0]["playerName"], "Balin");

    let body = json_body(app.get("/api/guilds/Ravens", Some(&balin)).await).await;
    assert_eq!(body["hasPendingInvite"], true);
    assert_eq!(body["pendingInvites"][0]["playerName"], "Balin");

    let response = app
        .post_json("/api/guilds/Ravens/accept-invite", "{}", Some(&balin))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(app.get("/api/guilds/Ravens", None).await).await;
    assert_eq!(body["memberCount"], 2);
    assert_invariants(&app.store.snapshot());

    let response = app
        .post_json("/api/guilds/Ravens/kick", r#"{"playerName":"Thorin"}"#, Some(&thorin))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post_json("/api/guilds/Ravens/kick", r#"{"playerName":"Balin"}"#, Some(&thorin))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(app.get("/api/guilds/Ravens", None).await).await;
    assert_eq!(body["memberCount"], 1);
    assert_invariants(&app.store.snapshot());
}

#[tokio::test]
async fn test_leave_endpoint() {
    let app = TestApp::new();
    let thorin = token(1);
    let balin = token(2);

    app.post_json("/api/guilds", CREATE_RAVENS, Some(&thorin)).await;
    app.post_json("/api/guilds/Ravens/invite", r#"{"playerName":"Balin"}"#, Some(&thorin))
        .await;
    app.post_json("/api/guilds/Ravens/accept-invite", "{}", Some(&balin))
        .await;

    let response = app
        .post_json("/api/guilds/Ravens/leave", "{}", Some(&thorin))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post_json("/api/guilds/Ravens/leave", r#"{"characterName":"Balin"}"#, Some(&balin))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.store.snapshot().membership_of("Balin").is_none());
}

#[tokio::test]
async fn test_accept_and_leave_without_body() {
    let app = TestApp::new();
    let thorin = token(1);
    let gloin = token(4);

    app.post_json("/api/guilds", CREATE_RAVENS, Some(&thorin)).await;
    app.post_json("/api/guilds/Ravens/invite", r#"{"playerName":"Gloin"}"#, Some(&thorin))
        .await;

    let response = app.post_empty("/api/guilds/Ravens/accept-invite", Some(&gloin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.store.snapshot().membership_of("Gloin").is_some());
    assert_invariants(&app.store.snapshot());

    let response = app.post_empty("/api/guilds/Ravens/leave", Some(&gloin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.store.snapshot().membership_of("Gloin").is_none());

    let response = app.post_empty("/api/guilds/Ravens/leave", Some(&thorin)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invite_requires_player_name() {
    let app = TestApp::new();
    let thorin = token(1);
    app.post_json("/api/guilds", CREATE_RAVENS, Some(&thorin)).await;

    let response = app
        .post_json("/api/guilds/Ravens/invite", r#"{"playerName":""}"#, Some(&thorin))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_counters() {
    let app = TestApp::new();
    app.get("/health", None).await;
    app.get("/api/guilds", None).await;

    let response = app.get("/metrics", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("guild_server_http_requests_total"));
    assert!(text.contains("guild_server_guild_operations_total"));
}
