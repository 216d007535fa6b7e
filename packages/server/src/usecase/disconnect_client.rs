//! UseCase: 切断処理（→ Closed）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 名前を持つ接続が切断されたとき、残りの全接続に退室通知が 1 回だけ届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：入室済みの接続の切断（退室通知あり）
//! - 正常系：名前未設定の接続の切断（通知なし）
//! - 異常系：存在しない接続の切断

use std::sync::Arc;

use lounge_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, ConnectionRepository, DisplayName, MessageIdFactory,
    MessagePusher, RelayEvent, Timestamp,
};

use super::error::DisconnectError;

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    /// Repository（接続レジストリの抽象化）
    repository: Arc<dyn ConnectionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(DisplayName))` - 入室済みの接続が切断された（退室通知を送信済み）
    /// * `Ok(None)` - 名前未設定の接続が切断された
    /// * `Err(DisconnectError)` - 接続が見つからない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<DisplayName>, DisconnectError> {
        // 1. MessagePusher から送信チャンネルを削除
        self.message_pusher.unregister_client(connection_id).await;

        // 2. Repository から接続を削除
        let connection = self
            .repository
            .remove_connection(connection_id)
            .await
            .ok_or_else(|| DisconnectError::ConnectionNotFound(connection_id.to_string()))?;

        let Some(name) = connection.display_name else {
            return Ok(None);
        };

        // 3. 残りの全ての接続に退室通知をブロードキャスト
        let targets = self.repository.get_all_connection_ids().await;
        let left = ChatMessage::left(
            MessageIdFactory::generate(),
            &name,
            Timestamp::from_datetime(self.clock.now()),
        );
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &RelayEvent::Message(left))
            .await
        {
            tracing::warn!("Failed to broadcast leave notice: {}", e);
        }

        Ok(Some(name))
    }
}
