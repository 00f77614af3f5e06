//! Event-to-browser forwarding.
//!
//! [`LiveUpdateRouter`] subscribes to the event bus and relays every
//! [`StockEvent`] to all live-update WebSocket clients as a JSON text frame.
//! The page script reloads on any message unless the editor modal is open.

use std::sync::Arc;

use axum::extract::ws::Message;
use stock_events::StockEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

pub struct LiveUpdateRouter {
    ws_manager: Arc<WsManager>,
}

impl LiveUpdateRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Forward events until the [`EventBus`](stock_events::EventBus) is
    /// dropped. Returns the number of events forwarded.
    pub async fn run(self, mut receiver: broadcast::Receiver<StockEvent>) -> u64 {
        let mut forwarded = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => match self.forward(&event).await {
                    Ok(()) => forwarded += 1,
                    Err(e) => tracing::error!(
                        error = %e,
                        event_type = %event.event_type,
                        "Failed to forward event"
                    ),
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Live-update router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, live-update router shutting down");
                    break;
                }
            }
        }
        forwarded
    }

    async fn forward(&self, event: &StockEvent) -> Result<(), serde_json::Error> {
        let msg = serde_json::json!({
            "type": "stock_changed",
            "event_type": event.event_type,
            "article_id": event.article_id,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let text = serde_json::to_string(&msg)?;
        self.ws_manager.broadcast(Message::Text(text.into())).await;
        Ok(())
    }
}
