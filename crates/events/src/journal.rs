//! Event journal.
//!
//! [`EventJournal`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! writes every received [`StockEvent`] to the log. Events are not stored:
//! the article collection has no durability across restarts.

use tokio::sync::broadcast;

use crate::bus::StockEvent;

/// Background service that logs stock events.
pub struct EventJournal;

impl EventJournal {
    /// Run the journal loop.
    ///
    /// Returns the number of events logged once the channel is closed (i.e.
    /// the [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(mut receiver: broadcast::Receiver<StockEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::record(&event);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event journal lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(logged, "Event bus closed, journal shutting down");
                    break;
                }
            }
        }
        logged
    }

    fn record(event: &StockEvent) {
        tracing::info!(
            event_type = %event.event_type,
            article_id = ?event.article_id,
            payload = %event.payload,
            timestamp = %event.timestamp,
            "Stock event",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventBus, ARTICLE_CREATED, ARTICLE_DELETED};

    #[tokio::test]
    async fn journal_drains_until_bus_is_dropped() {
        let bus = EventBus::default();
        let handle = tokio::spawn(EventJournal::run(bus.subscribe()));

        bus.publish(StockEvent::new(ARTICLE_CREATED).with_article(3));
        bus.publish(StockEvent::new(ARTICLE_DELETED).with_article(3));
        drop(bus);

        let logged = handle.await.expect("journal task should not panic");
        assert_eq!(logged, 2);
    }

    #[tokio::test]
    async fn journal_stops_on_closed_bus_without_events() {
        let bus = EventBus::default();
        let receiver = bus.subscribe();
        drop(bus);

        assert_eq!(EventJournal::run(receiver).await, 0);
    }
}
