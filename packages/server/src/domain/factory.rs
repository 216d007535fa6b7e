//! ID の生成

use uuid::Uuid;

use super::value_object::{ConnectionId, MessageId};

/// メッセージ ID を生成する
pub struct MessageIdFactory;

impl MessageIdFactory {
    pub fn generate() -> MessageId {
        MessageId::from(Uuid::new_v4())
    }
}

/// 接続 ID を生成する
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::from(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_message_ids_are_unique() {
        // テスト項目: 生成されるメッセージ ID は毎回異なる
        // given (前提条件) / when (操作):
        let first = MessageIdFactory::generate();
        let second = MessageIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 36);
    }

    #[test]
    fn test_generated_connection_ids_are_unique() {
        // テスト項目: 生成される接続 ID は毎回異なる
        // given (前提条件) / when (操作):
        let first = ConnectionIdFactory::generate();
        let second = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
