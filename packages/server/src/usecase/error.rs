//! UseCase 層のエラー定義
//!
//! `JoinError` と `SendMessageError` の表示文字列は、そのまま `error` イベントとして
//! クライアントに送られます。

use thiserror::Error;

use crate::domain::{RepositoryError, StoreError, ValueObjectError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("Failed to register connection: {0}")]
    Registry(RepositoryError),
}

/// 入室処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be at most {0} characters")]
    NameTooLong(usize),

    #[error("The name '{0}' is reserved")]
    NameReserved(String),

    #[error("You have already joined the chat")]
    AlreadyJoined,

    #[error("Connection not found")]
    ConnectionNotFound,
}

impl From<ValueObjectError> for JoinError {
    fn from(error: ValueObjectError) -> Self {
        match error {
            ValueObjectError::DisplayNameTooLong { max, .. } => Self::NameTooLong(max),
            ValueObjectError::DisplayNameReserved(name) => Self::NameReserved(name),
            _ => Self::NameRequired,
        }
    }
}

/// メッセージ送信処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Join the chat before sending messages")]
    NotJoined,

    #[error("Message is required")]
    MessageRequired,

    #[error("Message must be at most {0} characters")]
    MessageTooLong(usize),

    #[error("Failed to send message")]
    PersistFailed(StoreError),

    #[error("Connection not found")]
    ConnectionNotFound,
}

impl From<ValueObjectError> for SendMessageError {
    fn from(error: ValueObjectError) -> Self {
        match error {
            ValueObjectError::MessageTextTooLong { max, .. } => Self::MessageTooLong(max),
            _ => Self::MessageRequired,
        }
    }
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),
}

/// 履歴取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Failed to load chat history")]
    StoreUnavailable(#[source] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_error_from_value_object_error() {
        // テスト項目: 表示名の検証エラーがクライアント向けのエラーに変換される
        // given (前提条件):
        let errors = [
            ValueObjectError::DisplayNameEmpty,
            ValueObjectError::DisplayNameTooLong { max: 50, actual: 51 },
            ValueObjectError::DisplayNameReserved("System".to_string()),
        ];

        // when (操作):
        let messages: Vec<String> = errors
            .into_iter()
            .map(|e| JoinError::from(e).to_string())
            .collect();

        // then (期待する結果):
        assert_eq!(
            messages,
            vec![
                "Name is required",
                "Name must be at most 50 characters",
                "The name 'System' is reserved",
            ]
        );
    }

    #[test]
    fn test_persist_failure_message_hides_store_details() {
        // テスト項目: 永続化失敗のメッセージにストアの詳細は含まれない
        // given (前提条件):
        let error = SendMessageError::PersistFailed(StoreError::Unavailable(
            "connection refused".to_string(),
        ));

        // when (操作):
        let message = error.to_string();

        // then (期待する結果):
        assert_eq!(message, "Failed to send message");
    }
}
