//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクトの生成時に発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Message id must not be empty")]
    MessageIdEmpty,

    #[error("Connection id must not be empty")]
    ConnectionIdEmpty,

    #[error("Display name must not be empty")]
    DisplayNameEmpty,

    #[error("Display name is too long (max {max} characters, got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    #[error("Display name '{0}' is reserved")]
    DisplayNameReserved(String),

    #[error("Message text must not be empty")]
    MessageTextEmpty,

    #[error("Message text is too long (max {max} characters, got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),
}

/// 外部ドキュメントストアの操作で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Message store is full (capacity {0})")]
    CapacityExceeded(usize),

    #[error("Message store is unavailable: {0}")]
    Unavailable(String),

    #[error("Message store rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Message store returned an unexpected response: {0}")]
    InvalidResponse(String),
}

/// 接続レジストリの操作で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("Connection '{0}' has already chosen a display name")]
    AlreadyNamed(String),
}

/// クライアントへのメッセージ送信で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}
