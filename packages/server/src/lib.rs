//! Lounge chat relay library.
//!
//! Accepts WebSocket connections, lets each connection pick a display name,
//! persists chat messages to a document store and fans every message out to
//! all connected clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
