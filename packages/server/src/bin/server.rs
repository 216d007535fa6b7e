//! Chat relay server.
//!
//! Accepts WebSocket clients, persists their chat messages and broadcasts
//! them to every connected client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lounge-server
//! cargo run --bin lounge-server -- --host 0.0.0.0 --port 3001
//! cargo run --bin lounge-server -- --store appwrite --appwrite-project <id> ...
//! ```

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use lounge_server::{
    domain::{MessageStore, StoreError},
    infrastructure::store::{AppwriteConfig, AppwriteMessageStore, InMemoryMessageStore},
    ui::Server,
};
use lounge_shared::{logger::setup_logger, time::SystemClock};

/// Where chat messages are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// Process memory (history is lost on restart)
    Memory,
    /// Appwrite document collection over its REST API
    Appwrite,
}

#[derive(Parser, Debug)]
#[command(name = "lounge-server")]
#[command(about = "Chat relay with persisted history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "LOUNGE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "LOUNGE_PORT", default_value = "3001")]
    port: u16,

    /// Message store backend
    #[arg(long, env = "LOUNGE_STORE", value_enum, default_value = "memory")]
    store: StoreKind,

    /// Maximum number of messages kept by the memory store
    #[arg(long, env = "LOUNGE_HISTORY_CAPACITY")]
    history_capacity: Option<usize>,

    /// Appwrite API endpoint
    #[arg(
        long,
        env = "APPWRITE_ENDPOINT",
        default_value = "https://cloud.appwrite.io/v1"
    )]
    appwrite_endpoint: String,

    /// Appwrite project ID
    #[arg(long, env = "APPWRITE_PROJECT_ID")]
    appwrite_project: Option<String>,

    /// Appwrite server API key
    #[arg(long, env = "APPWRITE_API_KEY", hide_env_values = true)]
    appwrite_api_key: Option<String>,

    /// Appwrite database ID
    #[arg(long, env = "APPWRITE_DATABASE_ID")]
    appwrite_database: Option<String>,

    /// Appwrite collection ID holding chat messages
    #[arg(long, env = "APPWRITE_COLLECTION_CHAT_ID")]
    appwrite_collection: Option<String>,
}

/// Build the message store selected on the command line
fn build_store(args: &Args) -> Result<Arc<dyn MessageStore>, String> {
    match args.store {
        StoreKind::Memory => {
            let store = match args.history_capacity {
                Some(capacity) => InMemoryMessageStore::with_capacity(capacity),
                None => InMemoryMessageStore::new(),
            };
            Ok(Arc::new(store))
        }
        StoreKind::Appwrite => {
            let required = |value: &Option<String>, flag: &str| {
                value
                    .clone()
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| format!("--{} is required for the appwrite store", flag))
            };
            let config = AppwriteConfig {
                endpoint: args.appwrite_endpoint.clone(),
                project_id: required(&args.appwrite_project, "appwrite-project")?,
                api_key: args.appwrite_api_key.clone(),
                database_id: required(&args.appwrite_database, "appwrite-database")?,
                collection_id: required(&args.appwrite_collection, "appwrite-collection")?,
            };
            let store = AppwriteMessageStore::new(config).map_err(|e: StoreError| e.to_string())?;
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env.local first, then fall back to .env
    if dotenvy::from_filename(".env.local").is_err() {
        dotenvy::dotenv().ok();
    }

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let message_store = match build_store(&args) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to set up message store: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Using {:?} message store", args.store);

    let server = Server::with_store(message_store, Arc::new(SystemClock));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
