//! 外部ドキュメントストアへのインターフェース
//!
//! チャット履歴の保存先は外部サービスであり、リレーは以下の 2 操作だけを使う。
//!
//! - メッセージの追加（ID はストアが割り当てる）
//! - 作成順に並んだメッセージ一覧の取得

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{ChatMessage, NewChatMessage, StoreError};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// メッセージを追加し、ストアが割り当てた ID を含むレコードを返す
    async fn append(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError>;

    /// 作成順に並んだ全メッセージを取得
    async fn list(&self) -> Result<Vec<ChatMessage>, StoreError>;
}
