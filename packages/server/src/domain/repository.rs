//! Repository trait 定義
//!
//! 接続レジストリ（接続 ID → 表示名）へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{Connection, ConnectionId, DisplayName, RepositoryError};

/// Connection Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// 接続を登録
    async fn add_connection(&self, connection: Connection) -> Result<(), RepositoryError>;

    /// 接続に表示名を設定（一度だけ）
    async fn assign_display_name(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
    ) -> Result<(), RepositoryError>;

    /// 接続を削除し、削除した接続を返す
    async fn remove_connection(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// 接続を取得
    async fn get_connection(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// 接続中の全ての接続 ID を取得
    async fn get_all_connection_ids(&self) -> Vec<ConnectionId>;

    /// 接続中の全ての接続を取得
    async fn get_connections(&self) -> Vec<Connection>;

    /// 接続数を取得
    async fn count_connections(&self) -> usize;
}
