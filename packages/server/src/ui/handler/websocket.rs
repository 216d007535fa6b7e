//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PusherChannel, RelayEvent},
    infrastructure::dto::websocket::{ClientEvent, ErrorPayload, ServerEvent},
    ui::state::AppState,
};

/// Error text sent back for frames that are not a known client event
const MALFORMED_EVENT: &str = "Malformed event";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Encodes a server event into a text frame payload.
fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to encode server event: {}", e);
            None
        }
    }
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// Everything the relay sends to this connection after the initial history
/// (broadcasts, notices, errors) flows through this task.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectClientUseCase to register the connection
    // (register_client is called inside the UseCase)
    let connection_id = match state.connect_client_usecase.execute(tx.clone()).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    };
    tracing::info!("Connection '{}' opened", connection_id);

    // Send the chat history before anything queued on the pusher channel
    let history = match state.get_history_usecase.execute().await {
        Ok(messages) => RelayEvent::History(messages),
        Err(e) => {
            tracing::warn!("History unavailable for '{}': {}", connection_id, e);
            RelayEvent::Error(e.to_string())
        }
    };
    // Domain Model から DTO への変換
    let history_event: ServerEvent = history.into();
    if let Some(json) = encode(&history_event)
        && let Err(e) = sender.send(Message::Text(json.into())).await
    {
        tracing::warn!("Failed to send history to '{}': {}", connection_id, e);
        disconnect(&state, &connection_id).await;
        return;
    }

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", connection_id_clone, text.as_str());
                    handle_client_frame(&state_clone, &connection_id_clone, &tx, text.as_str())
                        .await;
                }
                Message::Binary(_) => {
                    tracing::debug!("Binary frame from '{}' ignored", connection_id_clone);
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push frames from the relay to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    disconnect(&state, &connection_id).await;
}

/// Dispatches one decoded client event to the matching use case.
async fn handle_client_frame(
    state: &AppState,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    text: &str,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Malformed frame from '{}': {}", connection_id, e);
            send_error(tx, MALFORMED_EVENT);
            return;
        }
    };

    match event {
        ClientEvent::Join(name) => {
            if let Ok(name) = state.join_chat_usecase.execute(connection_id, name).await {
                tracing::debug!("Connection '{}' joined as '{}'", connection_id, name.as_str());
            }
        }
        ClientEvent::Message(envelope) => {
            // DTO から UseCase Command への変換
            if let Ok(message) = state
                .send_message_usecase
                .execute(connection_id, envelope.into())
                .await
            {
                tracing::debug!(
                    "Relayed message '{}' from '{}'",
                    message.id.as_str(),
                    connection_id
                );
            }
        }
    }
}

/// Queues an error event for this connection only.
fn send_error(tx: &PusherChannel, message: &str) {
    let event = ServerEvent::Error(ErrorPayload {
        message: message.to_string(),
    });
    if let Some(json) = encode(&event)
        && tx.send(json).is_err()
    {
        tracing::debug!("Connection closed before error could be sent");
    }
}

async fn disconnect(state: &AppState, connection_id: &ConnectionId) {
    // Use DisconnectClientUseCase to handle disconnection
    match state.disconnect_client_usecase.execute(connection_id).await {
        Ok(Some(name)) => tracing::info!(
            "Connection '{}' ({}) closed and removed from registry",
            connection_id,
            name.as_str()
        ),
        Ok(None) => tracing::info!(
            "Connection '{}' closed before joining and removed from registry",
            connection_id
        ),
        Err(e) => tracing::warn!("Failed to disconnect '{}': {}", connection_id, e),
    }
}
