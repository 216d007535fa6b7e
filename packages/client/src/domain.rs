//! Domain logic for client-side operations.
//!
//! `ChatSession` is the client's view of the shared conversation. It performs
//! no I/O: callers feed it server events and user input, and send whatever
//! client events it hands back.

use std::{collections::HashSet, sync::Arc};

use lounge_server::{
    domain::{DisplayName, MessageText},
    infrastructure::dto::websocket::{ChatRecord, ClientEvent, MessageEnvelope},
};
use lounge_shared::time::{Clock, SystemClock};
use uuid::Uuid;

use crate::error::ClientError;

/// Banner shown while the connection is down
pub const DISCONNECTED_BANNER: &str = "Connection lost. Reconnecting...";

/// Session state of one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No name chosen yet; message submission is disabled
    Unnamed,
    /// Name chosen; the chat is usable
    Active { name: String },
}

/// Client session state machine
pub struct ChatSession {
    state: SessionState,
    /// Rendered history in arrival order
    history: Vec<ChatRecord>,
    /// Ids already rendered in this session
    seen_ids: HashSet<String>,
    /// Non-fatal status line (connection lost, relay errors)
    banner: Option<String>,
    clock: Arc<dyn Clock>,
}

impl ChatSession {
    /// Create an unnamed session stamped by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an unnamed session with a custom clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: SessionState::Unnamed,
            history: Vec::new(),
            seen_ids: HashSet::new(),
            banner: None,
            clock,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The chosen display name, if any
    pub fn display_name(&self) -> Option<&str> {
        match &self.state {
            SessionState::Unnamed => None,
            SessionState::Active { name } => Some(name),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    pub fn history(&self) -> &[ChatRecord] {
        &self.history
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Whether a message id has already been rendered
    pub fn has_seen(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    /// Replace the local history with the relay's history.
    ///
    /// The dedup set is reseeded with exactly the returned ids. Returns the
    /// records that had not been rendered before, so a reconnect does not
    /// render the same message twice.
    pub fn on_history(&mut self, records: Vec<ChatRecord>) -> Vec<ChatRecord> {
        let previously_seen = std::mem::take(&mut self.seen_ids);
        self.history.clear();

        let mut fresh = Vec::new();
        for record in records {
            if !self.seen_ids.insert(record.id.clone()) {
                continue;
            }
            if !previously_seen.contains(&record.id) {
                fresh.push(record.clone());
            }
            self.history.push(record);
        }
        fresh
    }

    /// Choose the display name and build the `join` event.
    ///
    /// The name is validated with the same rules the relay applies.
    pub fn choose_name(&mut self, name: &str) -> Result<ClientEvent, ClientError> {
        if let SessionState::Active { name } = &self.state {
            return Err(ClientError::AlreadyJoined(name.clone()));
        }

        let name = DisplayName::new(name.to_string())
            .map_err(|e| ClientError::InvalidName(e.to_string()))?
            .into_string();

        self.state = SessionState::Active { name: name.clone() };
        Ok(ClientEvent::Join(name))
    }

    /// Build a `message` event with a fresh local id.
    ///
    /// The message is not added to the history; it appears once the relay
    /// broadcasts the persisted record.
    pub fn send_message(&self, text: &str) -> Result<ClientEvent, ClientError> {
        let SessionState::Active { name } = &self.state else {
            return Err(ClientError::NotJoined);
        };

        let text = MessageText::new(text.to_string())
            .map_err(|e| ClientError::InvalidMessage(e.to_string()))?;

        Ok(ClientEvent::Message(MessageEnvelope {
            id: Some(Uuid::new_v4().to_string()),
            message: text.into_string(),
            alt_name: name.clone(),
            timestamp: self.clock.now_iso8601(),
        }))
    }

    /// Merge one broadcast record. Returns `false` if its id was already seen.
    pub fn on_broadcast(&mut self, record: ChatRecord) -> bool {
        if !self.seen_ids.insert(record.id.clone()) {
            return false;
        }
        self.history.push(record);
        true
    }

    /// Record a relay error as the current banner
    pub fn on_error(&mut self, message: String) -> &str {
        self.banner.insert(message)
    }

    /// Record a lost connection as the current banner
    pub fn on_disconnect(&mut self) -> &str {
        self.banner.insert(DISCONNECTED_BANNER.to_string())
    }

    /// Clear the banner after (re)connecting.
    ///
    /// Returns the `join` replay when a name was already chosen.
    pub fn on_connected(&mut self) -> Option<ClientEvent> {
        self.banner = None;
        self.display_name()
            .map(|name| ClientEvent::Join(name.to_string()))
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// A bad URL will not get better by retrying.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `failed_attempts` - Consecutive failed connection attempts so far
/// * `max_attempts` - The maximum number of consecutive failures allowed
pub fn should_attempt_reconnect(error: &ClientError, failed_attempts: u32, max_attempts: u32) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    failed_attempts < max_attempts
}
