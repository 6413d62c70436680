//! A superseded directory fetch must never paint over the newest one.

mod common;

use std::time::Duration;

use kittest::Queryable;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::TestCtx;

#[tokio::test]
async fn test_rows_from_a_superseded_fetch_never_render() {
    let mock_server = MockServer::start().await;

    // Slow first answer, fast second answer with different content.
    Mock::given(method("GET"))
        .and(path("/api/utenti"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([
                    {"id": 9, "nome": "Slow", "cognome": "Stale", "email": "old@example.com", "ruolo": false}
                ]))
                .set_delay(Duration::from_millis(400)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/utenti"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "nome": "Anna", "cognome": "Bianchi", "email": "a@x.it", "ruolo": true}
        ])))
        .mount(&mock_server)
        .await;

    let mut ctx = TestCtx::over(mock_server);
    let harness = ctx.harness_mut();
    harness.step();

    // First activation starts the slow fetch.
    harness.get_by_label("Manage Users").click();
    harness.step();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Leaving and re-entering supersedes it with the fast fetch.
    harness.get_by_label("Profile").click();
    harness.step();
    harness.get_by_label("Manage Users").click();
    harness.step();

    // Wait until both answers are due, then let the frames settle.
    tokio::time::sleep(Duration::from_millis(600)).await;
    for _ in 0..10 {
        harness.step();
    }

    assert!(
        harness.query_by_label("Anna Bianchi").is_some(),
        "the newest fetch should render"
    );
    assert!(
        harness.query_by_label("Slow Stale").is_none(),
        "the superseded fetch must be discarded"
    );
}
