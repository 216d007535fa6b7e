//! Terminal chat client for the Lounge relay.
//!
//! Connects to the relay, shows the chat history, asks for a display name
//! and then sends every line typed as a chat message.
//! Automatically reconnects on disconnection and rejoins under the same name.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lounge-client
//! cargo run --bin lounge-client -- --name Alice
//! cargo run --bin lounge-client -- -u ws://127.0.0.1:3001/ws -n Bob
//! ```

use std::time::Duration;

use clap::Parser;

use lounge_client::{ClientConfig, run_client};
use lounge_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "lounge-client")]
#[command(about = "Terminal chat client with history and automatic reconnect", long_about = None)]
struct Args {
    /// Display name to join with (asked for interactively when omitted)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3001/ws")]
    url: String,

    /// Consecutive failed connection attempts before giving up
    #[arg(long, default_value = "5")]
    max_reconnects: u32,

    /// Seconds to wait between connection attempts
    #[arg(long, default_value = "5")]
    reconnect_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = ClientConfig {
        url: args.url,
        name: args.name,
        max_reconnects: args.max_reconnects,
        reconnect_interval: Duration::from_secs(args.reconnect_interval_secs),
    };

    // Run the client
    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
