pub mod articles;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the browser-facing route tree.
///
/// ```text
/// /                               list page (?q=&editor=)
/// /articles                       create (POST)
/// /articles/{id}                  update (POST)
/// /articles/{id}/quantity         +/- one (POST)
/// /articles/{id}/delete           delete (POST)
/// /ws                             live-update WebSocket
/// ```
///
/// `/health` is mounted separately by [`health::router`].
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .merge(articles::router())
        .route("/ws", get(ws::ws_handler))
}
