//! Pushes store change events to the open list pages.

pub mod router;

pub use router::LiveUpdateRouter;
