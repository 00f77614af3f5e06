//! Live-update channel between the server and open list pages.
//!
//! [`ws_handler`] upgrades `/ws`, [`WsManager`] tracks the open sockets and
//! [`start_heartbeat`] pings them.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
