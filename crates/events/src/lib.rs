//! Stock event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`StockEvent`]: the envelope published after every store mutation.
//! - [`EventJournal`]: background subscriber that logs every event.

pub mod bus;
pub mod journal;

pub use bus::{EventBus, StockEvent};
pub use journal::EventJournal;
