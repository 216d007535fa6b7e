//! UseCase: チャット履歴の取得
//!
//! 接続直後に本人へ送る履歴と、HTTP API の履歴の両方で使われます。

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageStore};

use super::error::HistoryError;

/// チャット履歴取得のユースケース
pub struct GetHistoryUseCase {
    message_store: Arc<dyn MessageStore>,
}

impl GetHistoryUseCase {
    /// 新しい GetHistoryUseCase を作成
    pub fn new(message_store: Arc<dyn MessageStore>) -> Self {
        Self { message_store }
    }

    /// 作成順に並んだ履歴を取得
    pub async fn execute(&self) -> Result<Vec<ChatMessage>, HistoryError> {
        self.message_store.list().await.map_err(|e| {
            tracing::error!("Failed to fetch chat history: {}", e);
            HistoryError::StoreUnavailable(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            DisplayName, MessageText, NewChatMessage, StoreError, Timestamp,
            message_store::MockMessageStore,
        },
        infrastructure::store::InMemoryMessageStore,
    };

    #[tokio::test]
    async fn test_get_history_returns_stored_messages() {
        // テスト項目: ストアに保存されたメッセージが作成順で返される
        // given (前提条件):
        let store = Arc::new(InMemoryMessageStore::new());
        for text in ["first", "second"] {
            store
                .append(NewChatMessage::new(
                    DisplayName::new("Alice".to_string()).unwrap(),
                    MessageText::new(text.to_string()).unwrap(),
                    Timestamp::new("2024-01-01T00:00:00Z".to_string()).unwrap(),
                ))
                .await
                .unwrap();
        }
        let usecase = GetHistoryUseCase::new(store);

        // when (操作):
        let history = usecase.execute().await.unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_get_history_store_failure() {
        // テスト項目: ストアの障害は HistoryError になる
        // given (前提条件):
        let mut store = MockMessageStore::new();
        store
            .expect_list()
            .times(1)
            .returning(|| Err(StoreError::Unavailable("timeout".to_string())));
        let usecase = GetHistoryUseCase::new(Arc::new(store));

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(HistoryError::StoreUnavailable(StoreError::Unavailable(
                "timeout".to_string()
            )))
        );
    }
}
