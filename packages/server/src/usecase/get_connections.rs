//! UseCase: 接続状況の取得

use std::sync::Arc;

use crate::domain::{ConnectionRepository, DisplayName};

/// 接続状況
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionsSummary {
    /// 接続数（名前未設定を含む）
    pub count: usize,
    /// 入室済みの接続の表示名（ソート済み）
    pub names: Vec<DisplayName>,
}

/// 接続状況取得のユースケース
pub struct GetConnectionsUseCase {
    repository: Arc<dyn ConnectionRepository>,
}

impl GetConnectionsUseCase {
    /// 新しい GetConnectionsUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> ConnectionsSummary {
        let connections = self.repository.get_connections().await;
        let count = connections.len();

        let mut names: Vec<DisplayName> = connections
            .into_iter()
            .filter_map(|connection| connection.display_name)
            .collect();
        // Sort by name for consistent ordering
        names.sort();

        ConnectionsSummary { count, names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::Fixture;

    #[tokio::test]
    async fn test_get_connections_with_no_clients() {
        // テスト項目: 接続が無い場合は 0 件になる
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = GetConnectionsUseCase::new(fixture.repository.clone());

        // when (操作):
        let summary = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(summary.count, 0);
        assert!(summary.names.is_empty());
    }

    #[tokio::test]
    async fn test_get_connections_lists_named_only() {
        // テスト項目: 接続数は全接続、表示名は入室済みの接続だけがソートされて返る
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = GetConnectionsUseCase::new(fixture.repository.clone());
        let _charlie = fixture.connect_named("c", "Charlie").await;
        let _anonymous = fixture.connect("x").await;
        let _alice = fixture.connect_named("a", "Alice").await;

        // when (操作):
        let summary = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(summary.count, 3);
        let names: Vec<&str> = summary.names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Charlie"]);
    }
}
