//! JSON messages exchanged over the toast WebSocket.

use axum::extract::ws::Message;
use revuoo_core::notification::EnrichedNotification;
use revuoo_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Show (or replace) the toast.
    ReviewToast {
        review_id: DbId,
        heading: String,
        title: String,
        business_name: String,
        link: String,
    },
    /// Hide the toast, after the timer or a dismiss.
    ReviewToastHidden,
}

impl ServerMessage {
    /// Message for the presenter's current visible notification.
    pub fn from_visible(visible: Option<&EnrichedNotification>) -> Self {
        match visible {
            Some(n) => ServerMessage::ReviewToast {
                review_id: n.review_id,
                heading: n.heading(),
                title: n.review_title.clone(),
                business_name: n.business_name.clone(),
                link: n.link(),
            },
            None => ServerMessage::ReviewToastHidden,
        }
    }

    pub fn to_ws(&self) -> Result<Message, serde_json::Error> {
        let text = serde_json::to_string(self)?;
        Ok(Message::Text(text.into()))
    }
}

/// Client to server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The user closed the toast.
    Dismiss,
}
