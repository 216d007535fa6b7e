//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! HashMap を接続レジストリとして使用します。
//!
//! 接続レジストリはリレープロセスの中だけに存在し、永続化されません。
//! 接続・切断のイベントに合わせて登録・削除されます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRepository, DisplayName, RepositoryError};

/// インメモリ Connection Repository 実装
pub struct InMemoryConnectionRepository {
    /// 接続 ID → 接続
    connections: Arc<Mutex<HashMap<ConnectionId, Connection>>>,
}

impl InMemoryConnectionRepository {
    /// 新しい InMemoryConnectionRepository を作成
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConnectionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn add_connection(&self, connection: Connection) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&connection.id) {
            return Err(RepositoryError::DuplicateConnection(
                connection.id.as_str().to_string(),
            ));
        }
        connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    async fn assign_display_name(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
    ) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        let connection = connections
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.as_str().to_string()))?;
        connection.assign_name(name)
    }

    async fn remove_connection(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id)
    }

    async fn get_connection(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let connections = self.connections.lock().await;
        connections.get(connection_id).cloned()
    }

    async fn get_all_connection_ids(&self) -> Vec<ConnectionId> {
        let connections = self.connections.lock().await;
        connections.keys().cloned().collect()
    }

    async fn get_connections(&self) -> Vec<Connection> {
        let connections = self.connections.lock().await;
        connections.values().cloned().collect()
    }

    async fn count_connections(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryConnectionRepository の登録・名前設定・削除
    //
    // 【なぜこのテストが必要か】
    // - 接続レジストリは入退室通知とブロードキャスト対象の選定に使われる
    // - 表示名が接続ごとに一度しか設定できないことを保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. 接続の登録と重複登録
    // 2. 表示名の設定（初回・2 回目・存在しない接続）
    // 3. 接続の削除（存在する・存在しない）
    // ========================================

    fn connection(id: &str) -> Connection {
        Connection::new(
            ConnectionId::new(id.to_string()).unwrap(),
            Timestamp::new("2024-01-01T00:00:00Z".to_string()).unwrap(),
        )
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_add_connection_success() {
        // テスト項目: 接続を登録すると件数に反映される
        // given (前提条件):
        let repo = InMemoryConnectionRepository::new();

        // when (操作):
        let result = repo.add_connection(connection("conn-1")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(repo.count_connections().await, 1);
    }

    #[tokio::test]
    async fn test_add_duplicate_connection() {
        // テスト項目: 同じ接続 ID の二重登録はエラーになる
        // given (前提条件):
        let repo = InMemoryConnectionRepository::new();
        repo.add_connection(connection("conn-1")).await.unwrap();

        // when (操作):
        let result = repo.add_connection(connection("conn-1")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::DuplicateConnection("conn-1".to_string()))
        );
        assert_eq!(repo.count_connections().await, 1);
    }

    #[tokio::test]
    async fn test_assign_display_name_once() {
        // テスト項目: 表示名は一度だけ設定でき、2 回目はエラーになる
        // given (前提条件):
        let repo = InMemoryConnectionRepository::new();
        let conn = connection("conn-1");
        let id = conn.id.clone();
        repo.add_connection(conn).await.unwrap();

        // when (操作):
        let first = repo.assign_display_name(&id, name("Alice")).await;
        let second = repo.assign_display_name(&id, name("Bob")).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert_eq!(
            second,
            Err(RepositoryError::AlreadyNamed("conn-1".to_string()))
        );
        let stored = repo.get_connection(&id).await.unwrap();
        assert_eq!(stored.display_name, Some(name("Alice")));
    }

    #[tokio::test]
    async fn test_assign_display_name_to_unknown_connection() {
        // テスト項目: 存在しない接続への名前設定はエラーになる
        // given (前提条件):
        let repo = InMemoryConnectionRepository::new();
        let id = ConnectionId::new("ghost".to_string()).unwrap();

        // when (操作):
        let result = repo.assign_display_name(&id, name("Alice")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::ConnectionNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_remove_connection_returns_removed() {
        // テスト項目: 削除した接続が表示名付きで返される
        // given (前提条件):
        let repo = InMemoryConnectionRepository::new();
        let conn = connection("conn-1");
        let id = conn.id.clone();
        repo.add_connection(conn).await.unwrap();
        repo.assign_display_name(&id, name("Alice")).await.unwrap();

        // when (操作):
        let removed = repo.remove_connection(&id).await;

        // then (期待する結果):
        assert_eq!(removed.unwrap().display_name, Some(name("Alice")));
        assert_eq!(repo.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_connection() {
        // テスト項目: 存在しない接続を削除しても問題なく処理される（冪等性）
        // given (前提条件):
        let repo = InMemoryConnectionRepository::new();
        let id = ConnectionId::new("ghost".to_string()).unwrap();

        // when (操作):
        let removed = repo.remove_connection(&id).await;

        // then (期待する結果):
        assert!(removed.is_none());
    }

    #[tokio::test]
    async fn test_get_all_connection_ids() {
        // テスト項目: 接続中の全ての接続 ID を取得できる
        // given (前提条件):
        let repo = InMemoryConnectionRepository::new();
        repo.add_connection(connection("conn-1")).await.unwrap();
        repo.add_connection(connection("conn-2")).await.unwrap();

        // when (操作):
        let mut ids = repo.get_all_connection_ids().await;
        ids.sort();

        // then (期待する結果):
        let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["conn-1", "conn-2"]);
    }
}
