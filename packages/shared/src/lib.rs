//! Utilities shared by the Lounge relay and client.

pub mod logger;
pub mod time;
