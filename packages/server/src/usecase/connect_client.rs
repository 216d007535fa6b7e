//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続レジストリと MessagePusher の両方に登録されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続（名前は未設定の Connected 状態）
//! - 正常系：複数接続がそれぞれ別の接続 ID を持つ

use std::sync::Arc;

use lounge_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionId, ConnectionIdFactory, ConnectionRepository, MessagePusher,
    PusherChannel, RepositoryError, Timestamp,
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（接続レジストリの抽象化）
    repository: Arc<dyn ConnectionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
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

    /// 接続を登録する
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのフレーム送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 割り当てた接続 ID
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<ConnectionId, ConnectError> {
        let connection_id = ConnectionIdFactory::generate();
        let connected_at = Timestamp::from_datetime(self.clock.now());

        // 1. Repository に接続を追加（名前は未設定）
        self.repository
            .add_connection(Connection::new(connection_id.clone(), connected_at))
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateConnection(id) => ConnectError::DuplicateConnection(id),
                other => ConnectError::Registry(other),
            })?;

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        Ok(connection_id)
    }
}
