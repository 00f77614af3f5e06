use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, RwLock};

/// Outbound queue of one list page's socket.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// A list page holding the live-update socket open.
pub struct LiveClient {
    pub sender: WsSender,
    pub connected_at: DateTime<Utc>,
}

/// The set of list pages to notify when the stock changes.
///
/// Frames are queued per client; each socket task drains its own queue, so
/// a slow browser never holds up the others. Shared as `Arc<WsManager>`.
pub struct WsManager {
    clients: RwLock<HashMap<String, LiveClient>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Track a newly upgraded socket under `conn_id`.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (sender, queue) = mpsc::unbounded_channel();
        let client = LiveClient {
            sender,
            connected_at: Utc::now(),
        };
        self.clients.write().await.insert(conn_id, client);
        queue
    }

    pub async fn remove(&self, conn_id: &str) {
        let Some(client) = self.clients.write().await.remove(conn_id) else {
            return;
        };
        let connected_secs = (Utc::now() - client.connected_at).num_seconds();
        tracing::debug!(conn_id, connected_secs, "Live-update client dropped");
    }

    /// Queue `message` for every tracked page. A page whose socket task has
    /// already ended is skipped; it unregisters itself on the way out.
    pub async fn broadcast(&self, message: Message) {
        self.send_each(|| message.clone()).await;
    }

    pub async fn ping_all(&self) {
        self.send_each(|| Message::Ping(Bytes::new())).await;
    }

    pub async fn connection_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Queue a Close frame for every page and stop tracking them.
    pub async fn shutdown_all(&self) {
        let mut clients = self.clients.write().await;
        let count = clients.len();
        for (_, client) in clients.drain() {
            let _ = client.sender.send(Message::Close(None));
        }
        tracing::info!(count, "Closed all live-update connections");
    }

    async fn send_each(&self, frame: impl Fn() -> Message) {
        for client in self.clients.read().await.values() {
            let _ = client.sender.send(frame());
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
