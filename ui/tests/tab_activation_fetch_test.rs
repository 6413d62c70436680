//! Integration tests for the fetch-on-activation contract of the
//! Manage Users tab.
//!
//! Every test counts directory calls with wiremock expectations, which the
//! mock server verifies when it drops at the end of the test.

mod common;

use std::time::Duration;

use kittest::Queryable;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::TestCtx;

fn directory_json() -> serde_json::Value {
    json!([
        {"id": 2, "nome": "Anna", "cognome": "Bianchi", "email": "a@x.it", "ruolo": true}
    ])
}

/// App harness whose directory endpoint must be called exactly
/// `expected_calls` times.
async fn counted_ctx<'a>(expected_calls: u64) -> TestCtx<'a> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/utenti"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directory_json()))
        .expect(expected_calls)
        .mount(&mock_server)
        .await;

    TestCtx::over(mock_server)
}

#[tokio::test]
async fn test_profile_tab_never_touches_the_directory() {
    let mut ctx = counted_ctx(0).await;
    let harness = ctx.harness_mut();

    for _ in 0..5 {
        harness.step();
    }
    // Give a wrongly-dispatched fetch time to reach the server.
    tokio::time::sleep(Duration::from_millis(150)).await;
    harness.step();

    // Dropping the mock server verifies the endpoint was never called.
}

#[tokio::test]
async fn test_entering_manage_users_fetches_exactly_once() {
    let mut ctx = counted_ctx(1).await;
    let harness = ctx.harness_mut();
    harness.step();

    harness.get_by_label("Manage Users").click();
    harness.step();

    tokio::time::sleep(Duration::from_millis(200)).await;
    for _ in 0..10 {
        harness.step();
    }

    assert!(
        harness.query_by_label("Anna Bianchi").is_some(),
        "the fetched directory should render"
    );
}

#[tokio::test]
async fn test_clicking_the_active_tab_does_not_refetch() {
    let mut ctx = counted_ctx(1).await;
    let harness = ctx.harness_mut();
    harness.step();

    harness.get_by_label("Manage Users").click();
    harness.step();
    tokio::time::sleep(Duration::from_millis(200)).await;
    for _ in 0..5 {
        harness.step();
    }

    // The tab is already active; this click is not an activation.
    harness.get_by_label("Manage Users").click();
    harness.step();
    tokio::time::sleep(Duration::from_millis(200)).await;
    harness.step();

    assert!(harness.query_by_label("Anna Bianchi").is_some());
}

#[tokio::test]
async fn test_every_activation_fetches_again() {
    let mut ctx = counted_ctx(2).await;
    let harness = ctx.harness_mut();
    harness.step();

    harness.get_by_label("Manage Users").click();
    harness.step();
    tokio::time::sleep(Duration::from_millis(200)).await;
    for _ in 0..5 {
        harness.step();
    }

    harness.get_by_label("Profile").click();
    harness.step();

    harness.get_by_label("Manage Users").click();
    harness.step();
    tokio::time::sleep(Duration::from_millis(200)).await;
    for _ in 0..5 {
        harness.step();
    }

    assert!(harness.query_by_label("Anna Bianchi").is_some());
}

#[tokio::test]
async fn test_refresh_button_fetches_again() {
    let mut ctx = counted_ctx(2).await;
    let harness = ctx.harness_mut();
    harness.step();

    harness.get_by_label("Manage Users").click();
    harness.step();
    tokio::time::sleep(Duration::from_millis(200)).await;
    for _ in 0..5 {
        harness.step();
    }

    harness.get_by_label("Refresh").click();
    harness.step();
    tokio::time::sleep(Duration::from_millis(200)).await;
    for _ in 0..5 {
        harness.step();
    }

    assert!(harness.query_by_label("Anna Bianchi").is_some());
}
