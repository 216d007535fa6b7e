//! InMemory MessageStore 実装
//!
//! 作成順の Vec をチャット履歴として保持します。プロセスが終了すると履歴は失われます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageIdFactory, MessageStore, NewChatMessage, StoreError};

/// インメモリ MessageStore 実装
pub struct InMemoryMessageStore {
    /// 作成順のメッセージ
    messages: Mutex<Vec<ChatMessage>>,
    /// 保持できるメッセージ数の上限（None は無制限）
    capacity: Option<usize>,
}

impl InMemoryMessageStore {
    /// 上限なしのストアを作成
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            capacity: None,
        }
    }

    /// 上限付きのストアを作成
    ///
    /// 上限に達した後の追加は `StoreError::CapacityExceeded` になる。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let mut messages = self.messages.lock().await;
        if let Some(capacity) = self.capacity
            && messages.len() >= capacity
        {
            return Err(StoreError::CapacityExceeded(capacity));
        }

        let persisted = ChatMessage::persisted(MessageIdFactory::generate(), message);
        messages.push(persisted.clone());
        Ok(persisted)
    }

    async fn list(&self) -> Result<Vec<ChatMessage>, StoreError> {
        let messages = self.messages.lock().await;
        Ok(messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MessageText, Timestamp};

    fn draft(text: &str) -> NewChatMessage {
        NewChatMessage::new(
            DisplayName::new("Bob".to_string()).unwrap(),
            MessageText::new(text.to_string()).unwrap(),
            Timestamp::new("2024-01-01T00:00:00Z".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_append_assigns_store_id() {
        // テスト項目: 追加したメッセージにストアの ID が割り当てられる
        // given (前提条件):
        let store = InMemoryMessageStore::new();

        // when (操作):
        let first = store.append(draft("hi")).await.unwrap();
        let second = store.append(draft("hi")).await.unwrap();

        // then (期待する結果):
        assert_ne!(first.id, second.id);
        assert_eq!(first.text.as_str(), "hi");
    }

    #[tokio::test]
    async fn test_list_returns_creation_order() {
        // テスト項目: 一覧は作成順に並ぶ
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        for text in ["one", "two", "three"] {
            store.append(draft(text)).await.unwrap();
        }

        // when (操作):
        let messages = store.list().await.unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_append_capacity_exceeded() {
        // テスト項目: 上限を超える追加はエラーになり、履歴は変わらない
        // given (前提条件):
        let store = InMemoryMessageStore::with_capacity(1);
        store.append(draft("one")).await.unwrap();

        // when (操作):
        let result = store.append(draft("two")).await;

        // then (期待する結果):
        assert_eq!(result, Err(StoreError::CapacityExceeded(1)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_capacity_rejects_everything() {
        // テスト項目: 上限 0 のストアは全ての追加を拒否する
        // given (前提条件):
        let store = InMemoryMessageStore::with_capacity(0);

        // when (操作):
        let result = store.append(draft("one")).await;

        // then (期待する結果):
        assert_eq!(result, Err(StoreError::CapacityExceeded(0)));
    }
}
