//! WebSocket client session management.

use futures_util::{Sink, SinkExt, StreamExt};
use lounge_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{domain::ChatSession, error::ClientError};

use super::{
    formatter::MessageFormatter,
    ui::{print_above_prompt, prompt_for},
};

/// How an established session ended
#[derive(Debug)]
pub enum SessionEnd {
    /// The user closed the input (Ctrl+C / Ctrl+D)
    UserExit,
    /// The connection dropped after it was established
    Disconnected(ClientError),
}

/// Run one WebSocket session against the relay
///
/// The chat session and the input channel outlive the connection, so a
/// reconnect continues where the previous session left off.
///
/// # Returns
///
/// * `Ok(SessionEnd)` - The connection was established and has now ended
/// * `Err(ClientError)` - The connection could not be established
pub async fn run_client_session(
    url: &str,
    session: &mut ChatSession,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    prompt_tx: &watch::Sender<String>,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(e) => ClientError::InvalidUrl(e.to_string()),
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to chat relay!");

    let (mut write, mut read) = ws_stream.split();

    // Replay join if a name was chosen before (re)connecting
    if let Some(join) = session.on_connected()
        && let Err(e) = send_event(&mut write, &join).await
    {
        return Ok(SessionEnd::Disconnected(e));
    }
    print_above_prompt(
        &MessageFormatter::format_connected(session.display_name()),
        &prompt_tx.borrow(),
    );

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(output) = apply_server_frame(session, text.as_str()) {
                        print_above_prompt(&output, &prompt_tx.borrow());
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Relay closed the connection");
                    return Ok(SessionEnd::Disconnected(ClientError::ConnectionError(
                        "Connection closed by relay".to_string(),
                    )));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Ok(SessionEnd::Disconnected(ClientError::ConnectionError(
                        e.to_string(),
                    )));
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Input closed, leave the chat
                    let _ = write.close().await;
                    return Ok(SessionEnd::UserExit);
                };

                match apply_input(session, &line) {
                    Ok(event) => {
                        if let Err(e) = send_event(&mut write, &event).await {
                            tracing::warn!("Failed to send event: {}", e);
                            return Ok(SessionEnd::Disconnected(e));
                        }
                    }
                    Err(e) => {
                        print_above_prompt(
                            &MessageFormatter::format_banner(&e.to_string()),
                            &prompt_tx.borrow(),
                        );
                    }
                }
                prompt_tx.send_replace(prompt_for(session.display_name()));
            }
        }
    }
}

/// Apply one text frame from the relay and return what to print, if anything
fn apply_server_frame(session: &mut ChatSession, text: &str) -> Option<String> {
    let event = match serde_json::from_str::<ServerEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Failed to parse server event: {}", e);
            return Some(MessageFormatter::format_raw_message(text));
        }
    };

    match event {
        ServerEvent::ChatHistory(records) => {
            let fresh = session.on_history(records);
            let mut output = MessageFormatter::format_history(&fresh, session.display_name());
            if !session.is_active() {
                output.push_str(&MessageFormatter::format_name_request());
            }
            Some(output)
        }
        ServerEvent::Message(record) => {
            let line = MessageFormatter::format_record(&record, session.display_name());
            session.on_broadcast(record).then_some(line)
        }
        ServerEvent::Error(payload) => {
            Some(MessageFormatter::format_banner(session.on_error(payload.message)))
        }
    }
}

/// Turn one line of user input into the event to send.
///
/// Before a name is chosen the line is the name; afterwards it is a message.
fn apply_input(session: &mut ChatSession, line: &str) -> Result<ClientEvent, ClientError> {
    if session.is_active() {
        session.send_message(line)
    } else {
        session.choose_name(line)
    }
}

async fn send_event<S>(write: &mut S, event: &ClientEvent) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let json = serde_json::to_string(event).map_err(|e| ClientError::Encode(e.to_string()))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
