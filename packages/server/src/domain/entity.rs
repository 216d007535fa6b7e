//! エンティティ

use super::{
    error::RepositoryError,
    value_object::{ConnectionId, DisplayName, MessageId, MessageText, Timestamp},
};

/// リレーが生成する通知メッセージの送信者名
pub const SYSTEM_DISPLAY_NAME: &str = "System";

/// 永続化前のチャットメッセージ（ID はストアが割り当てる）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub display_name: DisplayName,
    pub text: MessageText,
    pub timestamp: Timestamp,
}

impl NewChatMessage {
    pub fn new(display_name: DisplayName, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            display_name,
            text,
            timestamp,
        }
    }
}

/// チャットメッセージ
///
/// 一度作成されたメッセージは変更・削除されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub display_name: DisplayName,
    pub text: MessageText,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        display_name: DisplayName,
        text: MessageText,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            display_name,
            text,
            timestamp,
        }
    }

    /// ストアが割り当てた ID で永続化前のメッセージを確定させる
    pub fn persisted(id: MessageId, draft: NewChatMessage) -> Self {
        Self::new(id, draft.display_name, draft.text, draft.timestamp)
    }

    /// 参加した本人に送る歓迎メッセージ
    pub fn welcome(id: MessageId, name: &DisplayName, timestamp: Timestamp) -> Self {
        Self::system_notice(
            id,
            format!("Welcome to the chat, {}!", name.as_str()),
            timestamp,
        )
    }

    /// 他の参加者に送る入室通知
    pub fn joined(id: MessageId, name: &DisplayName, timestamp: Timestamp) -> Self {
        Self::system_notice(id, format!("{} joined the chat", name.as_str()), timestamp)
    }

    /// 残っている参加者に送る退室通知
    pub fn left(id: MessageId, name: &DisplayName, timestamp: Timestamp) -> Self {
        Self::system_notice(id, format!("{} left the chat", name.as_str()), timestamp)
    }

    fn system_notice(id: MessageId, text: String, timestamp: Timestamp) -> Self {
        Self::new(id, DisplayName::system(), MessageText::notice(text), timestamp)
    }

    pub fn is_system(&self) -> bool {
        self.display_name.is_system()
    }
}

/// リレーに接続中のクライアント
///
/// 表示名は接続ごとに一度だけ設定できる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub display_name: Option<DisplayName>,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            display_name: None,
            connected_at,
        }
    }

    /// 表示名を設定する（Connected → Named）
    pub fn assign_name(&mut self, name: DisplayName) -> Result<(), RepositoryError> {
        if self.display_name.is_some() {
            return Err(RepositoryError::AlreadyNamed(self.id.as_str().to_string()));
        }
        self.display_name = Some(name);
        Ok(())
    }

    pub fn is_named(&self) -> bool {
        self.display_name.is_some()
    }
}
