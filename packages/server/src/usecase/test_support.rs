//! UseCase テスト用のフィクスチャ

use std::sync::Arc;

use lounge_shared::time::{Clock, FixedClock};
use tokio::sync::mpsc;

use crate::{
    domain::{
        Connection, ConnectionId, ConnectionRepository, DisplayName, MessagePusher, MessageStore,
        Timestamp,
    },
    infrastructure::{
        dto::websocket::{ChatRecord, ServerEvent},
        message_pusher::WebSocketMessagePusher,
        repository::InMemoryConnectionRepository,
        store::InMemoryMessageStore,
    },
};

/// 2024-01-01T00:00:00.000Z
pub const FIXED_MILLIS: i64 = 1_704_067_200_000;

pub struct Fixture {
    pub repository: Arc<InMemoryConnectionRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub store: Arc<dyn MessageStore>,
    pub clock: Arc<dyn Clock>,
}

/// テスト用に登録した接続と、その接続に届いたフレームの受信側
pub struct TestClient {
    pub id: ConnectionId,
    pub rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// 届いているフレームを全て取り出してデコードする
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            events.push(serde_json::from_str(&frame).expect("frame should be a server event"));
        }
        events
    }

    /// 届いている message イベントのレコードだけを取り出す
    pub fn drain_messages(&mut self) -> Vec<ChatRecord> {
        self.drain()
            .into_iter()
            .filter_map(|event| match event {
                ServerEvent::Message(record) => Some(record),
                _ => None,
            })
            .collect()
    }
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryMessageStore::new()))
    }

    pub fn with_store(store: Arc<dyn MessageStore>) -> Self {
        Self {
            repository: Arc::new(InMemoryConnectionRepository::new()),
            pusher: Arc::new(WebSocketMessagePusher::new()),
            store,
            clock: Arc::new(FixedClock::from_millis(FIXED_MILLIS)),
        }
    }

    /// 接続を登録する（名前は未設定）
    pub async fn connect(&self, id: &str) -> TestClient {
        let id = ConnectionId::new(id.to_string()).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        self.repository
            .add_connection(Connection::new(
                id.clone(),
                Timestamp::from_datetime(self.clock.now()),
            ))
            .await
            .unwrap();
        self.pusher.register_client(id.clone(), tx).await;
        TestClient { id, rx }
    }

    /// 接続を登録し、表示名を設定する
    pub async fn connect_named(&self, id: &str, name: &str) -> TestClient {
        let client = self.connect(id).await;
        self.repository
            .assign_display_name(&client.id, DisplayName::new(name.to_string()).unwrap())
            .await
            .unwrap();
        client
    }
}
