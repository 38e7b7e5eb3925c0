use std::sync::Arc;

use revuoo_events::{BusinessLookup, ChangeBus};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: revuoo_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager.
    pub ws_manager: Arc<WsManager>,
    /// Review change fan-out; each WebSocket session subscribes once.
    pub change_bus: Arc<ChangeBus>,
    /// Business lookup used to enrich approval notifications.
    pub business_lookup: Arc<dyn BusinessLookup>,
}
