//! Integration tests for the Manage Users tab across fetch outcomes.

mod common;

use std::time::Duration;

use kittest::Queryable;
use quizdesk_business::USERS_FETCH_FAILED;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::TestCtx;

/// Click into Manage Users, wait for the fetch, settle the frames.
async fn enter_manage_users(ctx: &mut TestCtx<'_>) {
    let harness = ctx.harness_mut();
    harness.step();

    harness.get_by_label("Manage Users").click();
    harness.step();

    tokio::time::sleep(Duration::from_millis(200)).await;
    for _ in 0..10 {
        harness.step();
    }
}

#[tokio::test]
async fn test_loaded_directory_renders_the_table() {
    let mut ctx = TestCtx::new_app(json!([
        {"id": 2, "nome": "Anna", "cognome": "Bianchi", "email": "a@x.it", "ruolo": true},
        {"id": 3, "nome": "Luca", "cognome": "Verdi", "email": "luca@example.com", "ruolo": false}
    ]))
    .await;
    enter_manage_users(&mut ctx).await;
    let harness = ctx.harness_mut();

    assert!(harness.query_by_label("Anna Bianchi").is_some());
    assert!(harness.query_by_label("a@x.it").is_some());
    assert!(harness.query_by_label("Admin").is_some());
    assert!(harness.query_by_label("Luca Verdi").is_some());
    assert!(harness.query_by_label("User").is_some());
    assert!(harness.query_by_label("Loading users...").is_none());
    assert!(
        harness.query_by_label_contains("Last updated").is_some(),
        "a loaded list carries its fetch timestamp"
    );
}

#[tokio::test]
async fn test_empty_directory_shows_the_placeholder() {
    let mut ctx = TestCtx::new_app(json!([])).await;
    enter_manage_users(&mut ctx).await;
    let harness = ctx.harness_mut();

    assert!(harness.query_by_label("No users found.").is_some());
    assert!(
        harness.query_by_label(USERS_FETCH_FAILED).is_none(),
        "an empty directory is a success, not an error"
    );
    assert!(harness.query_by_label("Loading users...").is_none());
}

#[tokio::test]
async fn test_server_error_shows_the_fixed_message() {
    let mut ctx = TestCtx::new_app_with_status(500).await;
    enter_manage_users(&mut ctx).await;
    let harness = ctx.harness_mut();

    assert!(harness.query_by_label(USERS_FETCH_FAILED).is_some());
    assert!(harness.query_by_label("No users found.").is_none());
    assert!(harness.query_by_label("Loading users...").is_none());
}

#[tokio::test]
async fn test_loading_indicator_shows_while_in_flight() {
    let mock_server = MockServer::start().await;

    // Delay the answer so the loading branch stays observable.
    Mock::given(method("GET"))
        .and(path("/api/utenti"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(1)),
        )
        .mount(&mock_server)
        .await;

    let mut ctx = TestCtx::over(mock_server);
    let harness = ctx.harness_mut();
    harness.step();

    harness.get_by_label("Manage Users").click();
    harness.step();

    tokio::time::sleep(Duration::from_millis(50)).await;
    harness.step();

    assert!(harness.query_by_label("Loading users...").is_some());
    assert!(harness.query_by_label("No users found.").is_none());
    assert!(
        harness.query_by_label(USERS_FETCH_FAILED).is_none(),
        "no error is observable while a fetch is in flight"
    );
}
