use std::sync::Arc;

use stock_core::store::ArticleStore;
use stock_events::EventBus;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The article collection. Mutations hold the write lock for their whole
    /// read-modify-write so user actions apply one at a time.
    pub store: Arc<RwLock<ArticleStore>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Store change notifications.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Fresh state; the store is seeded unless `config.seed_articles` is off.
    pub fn new(config: ServerConfig) -> Self {
        let store = if config.seed_articles {
            ArticleStore::seeded()
        } else {
            ArticleStore::new()
        };

        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
            ws_manager: Arc::new(WsManager::new()),
            event_bus: Arc::new(EventBus::default()),
        }
    }
}
