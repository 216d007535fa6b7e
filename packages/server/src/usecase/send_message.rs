//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 永続化したレコード（ストアの ID）が送信者を含む全接続にブロードキャストされること
//! - 永続化に失敗した場合、送信者にだけエラーが届き、ブロードキャストされないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：入室前の送信、空の本文、ストア障害
//! - エッジケース：不正なタイムスタンプ、名前の食い違い

use std::sync::Arc;

use lounge_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, ConnectionRepository, MessagePusher, MessageStore, MessageText,
    NewChatMessage, RelayEvent, Timestamp,
};

use super::error::SendMessageError;

/// クライアントが送ってきたメッセージ（未検証）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendMessageCommand {
    /// クライアントが生成した仮の ID（ストアの ID で置き換えられる）
    pub client_message_id: Option<String>,
    pub text: String,
    /// クライアントが名乗った表示名
    pub display_name: String,
    /// クライアントが送信時に付与した ISO-8601 のタイムスタンプ
    pub timestamp: String,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（接続レジストリの抽象化）
    repository: Arc<dyn ConnectionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// MessageStore（外部ドキュメントストアの抽象化）
    message_store: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        message_store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            message_store,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// 失敗した場合は、そのエラーを `error` イベントとして送信者にだけ送る。
    /// 永続化に失敗したメッセージは再送されない。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信者の接続
    /// * `command` - クライアントが送ってきたメッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 永続化されブロードキャストされたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        command: SendMessageCommand,
    ) -> Result<ChatMessage, SendMessageError> {
        match self.send(connection_id, command).await {
            Ok(message) => Ok(message),
            Err(e) => {
                self.report(connection_id, &e).await;
                Err(e)
            }
        }
    }

    async fn send(
        &self,
        connection_id: &ConnectionId,
        command: SendMessageCommand,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. 送信者が入室済みであることを確認
        let connection = self
            .repository
            .get_connection(connection_id)
            .await
            .ok_or(SendMessageError::ConnectionNotFound)?;
        let display_name = connection
            .display_name
            .ok_or(SendMessageError::NotJoined)?;

        if command.display_name.trim() != display_name.as_str() {
            tracing::warn!(
                "Connection '{}' sent altName '{}' but joined as '{}', using the joined name",
                connection_id,
                command.display_name,
                display_name.as_str()
            );
        }

        // 2. 本文とタイムスタンプを検証
        let text = MessageText::new(command.text)?;
        let timestamp = Timestamp::new(command.timestamp).unwrap_or_else(|e| {
            tracing::debug!("{}, stamping with relay clock", e);
            Timestamp::from_datetime(self.clock.now())
        });

        // 3. 外部ストアに永続化（ここで他の接続のイベントと並行して待つ）
        let draft = NewChatMessage::new(display_name, text, timestamp);
        let persisted = self
            .message_store
            .append(draft)
            .await
            .map_err(|e| {
                tracing::error!("Failed to persist message from '{}': {}", connection_id, e);
                SendMessageError::PersistFailed(e)
            })?;
        tracing::info!(
            "Message '{}' (client id {:?}) persisted from '{}'",
            persisted.id.as_str(),
            command.client_message_id,
            connection_id
        );

        // 4. 送信者を含む全ての接続にブロードキャスト
        let targets = self.repository.get_all_connection_ids().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &RelayEvent::Message(persisted.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast message: {}", e);
        }

        Ok(persisted)
    }

    async fn report(&self, connection_id: &ConnectionId, error: &SendMessageError) {
        tracing::warn!("Message rejected for '{}': {}", connection_id, error);
        let event = RelayEvent::Error(error.to_string());
        if let Err(e) = self.message_pusher.push_to(connection_id, &event).await {
            tracing::warn!("Failed to report send error to '{}': {}", connection_id, e);
        }
    }
}
