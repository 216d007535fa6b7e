//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use lounge_shared::time::Clock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::MessageStore,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryConnectionRepository,
    },
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetConnectionsUseCase, GetHistoryUseCase,
        JoinChatUseCase, SendMessageUseCase,
    },
};

use super::{
    handler::{get_connections, get_messages, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::with_store(Arc::new(InMemoryMessageStore::new()), Arc::new(SystemClock));
/// server.run("127.0.0.1".to_string(), 3001).await?;
/// ```
pub struct Server {
    /// ConnectClientUseCase（接続のユースケース）
    connect_client_usecase: Arc<ConnectClientUseCase>,
    /// JoinChatUseCase（入室のユースケース）
    join_chat_usecase: Arc<JoinChatUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetHistoryUseCase（履歴取得のユースケース）
    get_history_usecase: Arc<GetHistoryUseCase>,
    /// GetConnectionsUseCase（接続状況取得のユースケース）
    get_connections_usecase: Arc<GetConnectionsUseCase>,
}

impl Server {
    /// Create a new Server instance from already wired use cases
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        join_chat_usecase: Arc<JoinChatUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        get_history_usecase: Arc<GetHistoryUseCase>,
        get_connections_usecase: Arc<GetConnectionsUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            join_chat_usecase,
            send_message_usecase,
            disconnect_client_usecase,
            get_history_usecase,
            get_connections_usecase,
        }
    }

    /// Wire an in-memory connection registry and the WebSocket pusher around a message store
    ///
    /// # Arguments
    ///
    /// * `message_store` - Where chat messages are persisted
    /// * `clock` - Source of relay timestamps
    pub fn with_store(message_store: Arc<dyn MessageStore>, clock: Arc<dyn Clock>) -> Self {
        // Initialize dependencies in order:
        // 1. Repository
        // 2. MessagePusher
        // 3. UseCases

        // 1. Create Repository (in-memory connection registry)
        let repository = Arc::new(InMemoryConnectionRepository::new());

        // 2. Create MessagePusher (WebSocket implementation)
        let message_pusher = Arc::new(WebSocketMessagePusher::new());

        // 3. Create UseCases
        let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));
        let join_chat_usecase = Arc::new(JoinChatUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));
        let send_message_usecase = Arc::new(SendMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            message_store.clone(),
            clock.clone(),
        ));
        let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
            repository.clone(),
            message_pusher,
            clock,
        ));
        let get_history_usecase = Arc::new(GetHistoryUseCase::new(message_store));
        let get_connections_usecase = Arc::new(GetConnectionsUseCase::new(repository));

        Self::new(
            connect_client_usecase,
            join_chat_usecase,
            send_message_usecase,
            disconnect_client_usecase,
            get_history_usecase,
            get_connections_usecase,
        )
    }

    /// Build the axum router with every endpoint of the relay
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            join_chat_usecase: self.join_chat_usecase,
            send_message_usecase: self.send_message_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            get_history_usecase: self.get_history_usecase,
            get_connections_usecase: self.get_connections_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/messages", get(get_messages))
            .route("/api/connections", get(get_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }

    /// Run the WebSocket chat relay
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3001)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
