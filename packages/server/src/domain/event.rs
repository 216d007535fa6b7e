//! リレーからクライアントへ送るイベント

use super::entity::ChatMessage;

/// リレーがクライアントに届けるイベント
///
/// ワイヤ形式への変換は Infrastructure 層が担当する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// 接続直後に本人だけへ送る履歴
    History(Vec<ChatMessage>),
    /// 永続化済みのメッセージ、またはシステム通知
    Message(ChatMessage),
    /// 影響を受けた接続だけに送るエラー
    Error(String),
}
