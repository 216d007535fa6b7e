//! UseCase: 入室処理（Connected → Named）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - 本人への歓迎メッセージと、他の接続への入室通知
//!
//! ### なぜこのテストが必要か
//! - 入室通知は本人以外の全接続にちょうど 1 回だけ届く必要がある
//! - 表示名は接続ごとに一度しか設定できない
//!
//! ### どのような状況を想定しているか
//! - 正常系：入室（歓迎メッセージ・入室通知）
//! - 異常系：空の名前、予約名、2 回目の入室
//! - エッジケース：名前未設定の接続にも入室通知が届く

use std::sync::Arc;

use lounge_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, ConnectionRepository, DisplayName, MessageIdFactory,
    MessagePusher, RelayEvent, RepositoryError, Timestamp,
};

use super::error::JoinError;

/// 入室のユースケース
pub struct JoinChatUseCase {
    /// Repository（接続レジストリの抽象化）
    repository: Arc<dyn ConnectionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
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

    /// 入室を実行
    ///
    /// 失敗した場合は、そのエラーを `error` イベントとして本人にだけ送る。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 入室する接続
    /// * `name` - クライアントが選んだ表示名（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(DisplayName)` - 設定された表示名
    /// * `Err(JoinError)` - 入室失敗（接続の状態は変わらない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        name: String,
    ) -> Result<DisplayName, JoinError> {
        match self.join(connection_id, name).await {
            Ok(name) => Ok(name),
            Err(e) => {
                self.report(connection_id, &e).await;
                Err(e)
            }
        }
    }

    async fn join(&self, connection_id: &ConnectionId, name: String) -> Result<DisplayName, JoinError> {
        // 1. 表示名を検証
        let name = DisplayName::new(name)?;

        // 2. 接続に表示名を設定（一度だけ）
        self.repository
            .assign_display_name(connection_id, name.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyNamed(_) => JoinError::AlreadyJoined,
                _ => JoinError::ConnectionNotFound,
            })?;
        tracing::info!("Connection '{}' joined as '{}'", connection_id, name.as_str());

        let timestamp = Timestamp::from_datetime(self.clock.now());

        // 3. 本人に歓迎メッセージを送る
        let welcome = ChatMessage::welcome(MessageIdFactory::generate(), &name, timestamp.clone());
        if let Err(e) = self
            .message_pusher
            .push_to(connection_id, &RelayEvent::Message(welcome))
            .await
        {
            tracing::warn!("Failed to send welcome to '{}': {}", connection_id, e);
        }

        // 4. 本人以外の全ての接続に入室通知をブロードキャスト
        let targets: Vec<ConnectionId> = self
            .repository
            .get_all_connection_ids()
            .await
            .into_iter()
            .filter(|id| id != connection_id)
            .collect();
        let joined = ChatMessage::joined(MessageIdFactory::generate(), &name, timestamp);
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &RelayEvent::Message(joined))
            .await
        {
            tracing::warn!("Failed to broadcast join notice: {}", e);
        }

        Ok(name)
    }

    async fn report(&self, connection_id: &ConnectionId, error: &JoinError) {
        tracing::warn!("Join rejected for '{}': {}", connection_id, error);
        let event = RelayEvent::Error(error.to_string());
        if let Err(e) = self.message_pusher.push_to(connection_id, &event).await {
            tracing::warn!("Failed to report join error to '{}': {}", connection_id, e);
        }
    }
}
