use std::sync::Arc;

use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;

use crate::config::Config;
use crate::connection::ConnectionActor;
use crate::game::actor::SessionActor;

/// Every WebSocket gets its own session; the session ends when the socket goes away.
pub async fn connect_to_websocket(
    State(config): State<Arc<Config>>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade.on_upgrade(move |websocket| async move {
        log::info!("Opening a new session.");
        let session = SessionActor::spawn(config.game.clone());
        ConnectionActor::create(session, websocket, config.websocket.ping_timeout()).await
    })
}
