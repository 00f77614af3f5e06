use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// GET /ws -- upgrade to a live-update connection.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_client(socket, state.ws_manager))
}

/// Lifetime of one list page's socket: register, relay queued frames in a
/// spawned task, watch the inbound side for the close, unregister.
async fn serve_client(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Live-update client connected");

    let queue = ws_manager.add(conn_id.clone()).await;
    let (sink, stream) = socket.split();

    let relay = tokio::spawn(relay_queue(queue, sink, conn_id.clone()));
    wait_for_close(stream, &conn_id).await;

    ws_manager.remove(&conn_id).await;
    relay.abort();
    tracing::info!(conn_id = %conn_id, "Live-update client disconnected");
}

/// Write queued frames to the socket. Ends after a Close frame or once the
/// socket refuses a write.
async fn relay_queue(
    mut queue: mpsc::UnboundedReceiver<Message>,
    mut sink: SplitSink<WebSocket, Message>,
    conn_id: String,
) {
    while let Some(frame) = queue.recv().await {
        let closing = matches!(frame, Message::Close(_));
        if sink.send(frame).await.is_err() || closing {
            tracing::debug!(conn_id = %conn_id, closing, "Live-update relay finished");
            break;
        }
    }
}

/// The page never sends anything we act on; inbound traffic only tells us
/// whether the socket is still there.
async fn wait_for_close(mut stream: SplitStream<WebSocket>, conn_id: &str) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => tracing::trace!(conn_id, "Pong received"),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id, error = %e, "Live-update socket read failed");
                break;
            }
        }
    }
}
