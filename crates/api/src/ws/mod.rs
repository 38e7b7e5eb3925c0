//! WebSocket infrastructure for the live review toast feed.
//!
//! Provides connection management, heartbeat monitoring, the wire message
//! types, and the HTTP upgrade handler used by Axum routes. Every
//! connection is one client session with its own toast.

mod handler;
mod heartbeat;
pub mod manager;
pub mod messages;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use messages::{ClientMessage, ServerMessage};
