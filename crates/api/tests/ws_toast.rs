//! End-to-end tests for the review toast WebSocket.
//!
//! Each test serves the real router on a local port and connects with a
//! WebSocket client. Change events are published straight onto the bus, so
//! no database is needed.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{approval, change, spawn_server, wait_for_subscribers};
use futures::{SinkExt, StreamExt};
use revuoo_core::review::ReviewStatus;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(addr: std::net::SocketAddr) -> Client {
    let (client, _) = connect_async(format!("ws://{addr}/api/v1/ws"))
        .await
        .expect("WebSocket handshake");
    client
}

/// Next JSON text frame, skipping control frames.
async fn next_json(client: &mut Client) -> Value {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match client.next().await {
                Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
                Some(Ok(_)) => continue,
                other => panic!("connection ended: {other:?}"),
            }
        }
    })
    .await
    .expect("timed out waiting for a message")
}

/// Assert nothing arrives for a short while.
async fn assert_silent(client: &mut Client) {
    let next = tokio::time::timeout(Duration::from_millis(300), client.next()).await;
    assert!(next.is_err(), "unexpected message: {next:?}");
}

#[tokio::test]
async fn approval_is_pushed_as_toast() {
    let app = common::build_test_app();
    let bus = Arc::clone(&app.change_bus);
    let addr = spawn_server(app.router).await;

    let mut client = connect(addr).await;
    wait_for_subscribers(&bus, 1).await;

    bus.publish(approval(42, 7));

    assert_eq!(
        next_json(&mut client).await,
        json!({
            "type": "review_toast",
            "review_id": 42,
            "heading": "New Review for Acme Cleaning",
            "title": "Great service",
            "business_name": "Acme Cleaning",
            "link": "/business/acme-cleaning",
        })
    );
}

#[tokio::test]
async fn non_qualifying_and_unknown_business_changes_are_silent() {
    let app = common::build_test_app();
    let bus = Arc::clone(&app.change_bus);
    let addr = spawn_server(app.router).await;

    let mut client = connect(addr).await;
    wait_for_subscribers(&bus, 1).await;

    bus.publish(change(1, ReviewStatus::Approved, ReviewStatus::Approved, 7));
    bus.publish(change(2, ReviewStatus::Pending, ReviewStatus::Rejected, 7));
    bus.publish(approval(3, 999));

    assert_silent(&mut client).await;
}

#[tokio::test]
async fn dismiss_hides_toast() {
    let app = common::build_test_app();
    let bus = Arc::clone(&app.change_bus);
    let addr = spawn_server(app.router).await;

    let mut client = connect(addr).await;
    wait_for_subscribers(&bus, 1).await;

    bus.publish(approval(42, 7));
    assert_eq!(next_json(&mut client).await["type"], "review_toast");

    client
        .send(Message::Text(r#"{"type":"dismiss"}"#.to_string()))
        .await
        .unwrap();

    assert_eq!(
        next_json(&mut client).await,
        json!({ "type": "review_toast_hidden" })
    );
}

#[tokio::test]
async fn toast_hides_after_configured_duration() {
    let config = revuoo_api::config::ServerConfig {
        toast_duration_secs: 1,
        ..common::test_config()
    };
    let app = common::build_test_app_with(
        common::unreachable_pool(),
        config,
        Arc::new(common::acme_lookup()),
    );
    let bus = Arc::clone(&app.change_bus);
    let addr = spawn_server(app.router).await;

    let mut client = connect(addr).await;
    wait_for_subscribers(&bus, 1).await;

    bus.publish(approval(42, 7));
    assert_eq!(next_json(&mut client).await["type"], "review_toast");

    let shown = tokio::time::Instant::now();
    assert_eq!(next_json(&mut client).await["type"], "review_toast_hidden");
    assert!(shown.elapsed() >= Duration::from_millis(900));
}

#[tokio::test]
async fn each_connection_has_its_own_toast() {
    let app = common::build_test_app();
    let bus = Arc::clone(&app.change_bus);
    let addr = spawn_server(app.router).await;

    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    wait_for_subscribers(&bus, 2).await;

    bus.publish(approval(42, 7));
    assert_eq!(next_json(&mut a).await["type"], "review_toast");
    assert_eq!(next_json(&mut b).await["type"], "review_toast");

    a.send(Message::Text(r#"{"type":"dismiss"}"#.to_string()))
        .await
        .unwrap();
    assert_eq!(next_json(&mut a).await["type"], "review_toast_hidden");
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn disconnect_releases_subscription_and_connection() {
    let app = common::build_test_app();
    let bus = Arc::clone(&app.change_bus);
    let ws_manager = Arc::clone(&app.ws_manager);
    let addr = spawn_server(app.router).await;

    let mut client = connect(addr).await;
    wait_for_subscribers(&bus, 1).await;
    assert_eq!(ws_manager.connection_count().await, 1);

    client.close(None).await.unwrap();
    drop(client);

    wait_for_subscribers(&bus, 0).await;
    tokio::time::timeout(Duration::from_secs(5), async {
        while ws_manager.connection_count().await != 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("connection should be removed");
}
