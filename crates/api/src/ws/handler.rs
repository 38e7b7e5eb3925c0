use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use revuoo_core::notification::EnrichedNotification;
use revuoo_events::NotificationSession;
use tokio::sync::watch;

use crate::state::AppState;
use crate::ws::manager::WsManager;
use crate::ws::messages::{ClientMessage, ServerMessage};

/// HTTP handler that upgrades the connection to WebSocket.
///
/// Each upgraded connection gets its own [`NotificationSession`], so toasts
/// and dismissals are per connection.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Manage a single WebSocket connection after upgrade.
///
///   1. Registers the connection with `WsManager` and opens a session.
///   2. Spawns a sender task that forwards manager messages to the sink.
///   3. Spawns a task turning presenter changes into toast messages.
///   4. Handles inbound `dismiss` messages on the current task.
///   5. Closes the session and cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    let mut rx = state.ws_manager.add(conn_id.clone()).await;
    let session = NotificationSession::open(
        &state.change_bus,
        Arc::clone(&state.business_lookup),
        state.config.session_config(),
    );

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    let toast_task = tokio::spawn(forward_toasts(
        conn_id.clone(),
        session.watch(),
        Arc::clone(&state.ws_manager),
    ));

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Dismiss) => session.dismiss(),
                Err(e) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring unknown client message");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: stop toasts, release the subscription, then the sender.
    toast_task.abort();
    let connected_at = state.ws_manager.remove(&conn_id).await;
    session.close().await;
    send_task.abort();

    let connected_secs = connected_at.map(|at| (chrono::Utc::now() - at).num_seconds());
    tracing::info!(conn_id = %conn_id, ?connected_secs, "WebSocket disconnected");
}

/// Push a toast message every time the visible notification changes.
///
/// Ends when the session stops or the connection is gone.
async fn forward_toasts(
    conn_id: String,
    mut visible: watch::Receiver<Option<EnrichedNotification>>,
    ws_manager: Arc<WsManager>,
) {
    while visible.changed().await.is_ok() {
        let message = ServerMessage::from_visible(visible.borrow_and_update().as_ref());
        let ws_message = match message.to_ws() {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(conn_id = %conn_id, error = %e, "Failed to encode toast message");
                continue;
            }
        };
        if !ws_manager.send_to(&conn_id, ws_message).await {
            break;
        }
    }
}
