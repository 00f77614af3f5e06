use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Keeps idle sockets from being cut by proxies.
const PING_EVERY: Duration = Duration::from_secs(30);

/// Ping every open list page on a fixed period. `main` aborts the returned
/// task once the server has stopped.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(PING_EVERY);
        loop {
            ticks.tick().await;
            match ws_manager.connection_count().await {
                0 => {}
                clients => {
                    tracing::debug!(clients, "Pinging live-update clients");
                    ws_manager.ping_all().await;
                }
            }
        }
    })
}
