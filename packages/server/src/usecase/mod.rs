//! UseCase 層
//!
//! リレーが受け付けるイベント（接続・入室・メッセージ送信・切断）ごとの処理を定義します。
//! 外部 I/O を待つのは履歴取得とメッセージ永続化の 2 箇所だけです。

mod connect_client;
mod disconnect_client;
mod error;
mod get_connections;
mod get_history;
mod join_chat;
mod send_message;

#[cfg(test)]
mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, DisconnectError, HistoryError, JoinError, SendMessageError};
pub use get_connections::{ConnectionsSummary, GetConnectionsUseCase};
pub use get_history::GetHistoryUseCase;
pub use join_chat::JoinChatUseCase;
pub use send_message::{SendMessageCommand, SendMessageUseCase};
