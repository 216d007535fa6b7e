//! Client execution logic with reconnection support.

use std::time::Duration;

use tokio::sync::watch;

use crate::{
    domain::{ChatSession, should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
};

use super::{
    formatter::MessageFormatter,
    session::{SessionEnd, run_client_session},
    ui::{print_above_prompt, prompt_for, spawn_readline},
};

/// Client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket URL of the relay
    pub url: String,
    /// Display name chosen up front (otherwise asked for interactively)
    pub name: Option<String>,
    /// Consecutive failed connection attempts before giving up
    pub max_reconnects: u32,
    /// Delay between connection attempts
    pub reconnect_interval: Duration,
}

/// Run the chat client with reconnection logic
///
/// The failure counter resets whenever a session was established, so only
/// consecutive failed attempts count towards `max_reconnects`.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let mut session = ChatSession::new();
    if let Some(name) = &config.name {
        // The join itself is sent once the connection is up
        session.choose_name(name)?;
    }

    let (prompt_tx, prompt_rx) = watch::channel(prompt_for(session.display_name()));
    let mut input_rx = spawn_readline(prompt_rx);
    let mut failed_attempts = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            config.url,
            failed_attempts + 1,
            config.max_reconnects
        );

        let error = match run_client_session(&config.url, &mut session, &mut input_rx, &prompt_tx)
            .await
        {
            Ok(SessionEnd::UserExit) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Ok(SessionEnd::Disconnected(e)) => {
                failed_attempts = 0;
                e
            }
            Err(e) => {
                failed_attempts += 1;
                e
            }
        };

        if should_exit_immediately(&error) {
            tracing::error!("Cannot connect to {}: {}", config.url, error);
            return Err(error);
        }

        tracing::warn!("Connection lost: {}", error);

        if !should_attempt_reconnect(&error, failed_attempts, config.max_reconnects) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                failed_attempts
            );
            return Err(error);
        }

        print_above_prompt(
            &MessageFormatter::format_banner(session.on_disconnect()),
            &prompt_tx.borrow(),
        );
        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            config.reconnect_interval.as_secs(),
            failed_attempts + 1,
            config.max_reconnects
        );

        tokio::time::sleep(config.reconnect_interval).await;
    }
}
