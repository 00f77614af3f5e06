//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`StockEvent`]s. It is
//! shared via `Arc<EventBus>`; the API publishes after each successful store
//! mutation and the live-update router and the journal subscribe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stock_core::article::Article;
use stock_core::types::ArticleId;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

pub const ARTICLE_CREATED: &str = "article.created";
pub const ARTICLE_UPDATED: &str = "article.updated";
pub const ARTICLE_QUANTITY_CHANGED: &str = "article.quantity_changed";
pub const ARTICLE_DELETED: &str = "article.deleted";

// ---------------------------------------------------------------------------
// StockEvent
// ---------------------------------------------------------------------------

/// A change to the article collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEvent {
    /// Dot-separated event name, one of the `ARTICLE_*` constants.
    pub event_type: String,

    /// Article the event is about.
    pub article_id: Option<ArticleId>,

    /// Event-specific data (a snapshot of the article for most events).
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl StockEvent {
    /// Create a new event with only the `event_type` set.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            article_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Event carrying the serialized `article` as its payload.
    pub fn for_article(event_type: impl Into<String>, article: &Article) -> Self {
        let event = Self::new(event_type).with_article(article.id);
        match serde_json::to_value(article) {
            Ok(snapshot) => event.with_payload(snapshot),
            Err(e) => {
                tracing::warn!(article_id = article.id, error = %e, "Article snapshot failed");
                event
            }
        }
    }

    pub fn with_article(mut self, article_id: ArticleId) -> Self {
        self.article_id = Some(article_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use stock_events::bus::{EventBus, StockEvent, ARTICLE_DELETED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(StockEvent::new(ARTICLE_DELETED).with_article(2));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<StockEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: StockEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StockEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
