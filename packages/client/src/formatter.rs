//! Message formatting utilities for client display.

use lounge_server::{domain::SYSTEM_DISPLAY_NAME, infrastructure::dto::websocket::ChatRecord};
use lounge_shared::time::format_local_time;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the history received on (re)connect
    ///
    /// # Arguments
    ///
    /// * `records` - Records to show, oldest first
    /// * `own_name` - The current display name (to mark own messages)
    pub fn format_history(records: &[ChatRecord], own_name: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));

        if records.is_empty() {
            output.push_str("(No new messages)\n");
        } else {
            for record in records {
                output.push_str(&Self::format_record(record, own_name));
                output.push('\n');
            }
        }

        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format one chat record
    ///
    /// System notices render as `* text`; chat messages as
    /// `[HH:MM:SS] name: text`, with `(me)` after the current user's name.
    pub fn format_record(record: &ChatRecord, own_name: Option<&str>) -> String {
        if record.alt_name == SYSTEM_DISPLAY_NAME {
            return format!("* {}", record.message);
        }

        let is_me = own_name.is_some_and(|name| name == record.alt_name);
        let me_suffix = if is_me { " (me)" } else { "" };
        format!(
            "[{}] {}{}: {}",
            format_local_time(&record.timestamp),
            record.alt_name,
            me_suffix,
            record.message
        )
    }

    /// Format a status banner (relay error, lost connection)
    pub fn format_banner(text: &str) -> String {
        format!("! {}", text)
    }

    /// Format the request to choose a display name
    pub fn format_name_request() -> String {
        "Enter a display name to join the chat.".to_string()
    }

    /// Format the greeting shown once a connection is up
    pub fn format_connected(own_name: Option<&str>) -> String {
        match own_name {
            Some(name) => format!(
                "Connected as '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.",
                name
            ),
            None => "Connected. Press Ctrl+C to exit.".to_string(),
        }
    }

    /// Format a raw text frame that could not be decoded
    pub fn format_raw_message(text: &str) -> String {
        format!("← Received: {}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, text: &str) -> ChatRecord {
        ChatRecord {
            id: "id-1".to_string(),
            message: text.to_string(),
            alt_name: name.to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_format_record_for_other_participant() {
        // テスト項目: 他の参加者のメッセージが時刻・名前・本文の形式でフォーマットされる
        // given (前提条件):
        let record = record("Bob", "hi");

        // when (操作):
        let result = MessageFormatter::format_record(&record, Some("Alice"));

        // then (期待する結果):
        let expected_time = format_local_time("2024-01-01T00:00:00.000Z");
        assert_eq!(result, format!("[{}] Bob: hi", expected_time));
    }

    #[test]
    fn test_format_record_marks_own_message() {
        // テスト項目: 自分のメッセージには (me) が付く
        // given (前提条件):
        let record = record("Alice", "hello");

        // when (操作):
        let result = MessageFormatter::format_record(&record, Some("Alice"));

        // then (期待する結果):
        assert!(result.contains("Alice (me): hello"));
    }

    #[test]
    fn test_format_record_without_name_never_marks_me() {
        // テスト項目: 名前未設定の場合は (me) が付かない
        // given (前提条件):
        let record = record("Alice", "hello");

        // when (操作):
        let result = MessageFormatter::format_record(&record, None);

        // then (期待する結果):
        assert!(!result.contains("(me)"));
    }

    #[test]
    fn test_format_record_for_system_notice() {
        // テスト項目: システム通知は * で始まる一行になる
        // given (前提条件):
        let record = record("System", "Bob joined the chat");

        // when (操作):
        let result = MessageFormatter::format_record(&record, Some("Alice"));

        // then (期待する結果):
        assert_eq!(result, "* Bob joined the chat");
    }

    #[test]
    fn test_format_record_keeps_unparseable_timestamp() {
        // テスト項目: 解釈できない時刻はそのまま表示される
        // given (前提条件):
        let mut record = record("Bob", "hi");
        record.timestamp = "yesterday".to_string();

        // when (操作):
        let result = MessageFormatter::format_record(&record, None);

        // then (期待する結果):
        assert_eq!(result, "[yesterday] Bob: hi");
    }

    #[test]
    fn test_format_history_with_empty_records() {
        // テスト項目: 履歴が空の場合、適切なメッセージが表示される
        // given (前提条件):
        let records: Vec<ChatRecord> = Vec::new();

        // when (操作):
        let result = MessageFormatter::format_history(&records, None);

        // then (期待する結果):
        assert!(result.contains("(No new messages)"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_history_lists_records_in_order() {
        // テスト項目: 履歴のレコードが順番通りに表示される
        // given (前提条件):
        let records = vec![record("Alice", "first"), record("Bob", "second")];

        // when (操作):
        let result = MessageFormatter::format_history(&records, Some("Alice"));

        // then (期待する結果):
        let first = result.find("Alice (me): first").unwrap();
        let second = result.find("Bob: second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_format_banner() {
        // テスト項目: バナーは ! で始まる
        // given (前提条件):
        let text = "Failed to send message";

        // when (操作):
        let result = MessageFormatter::format_banner(text);

        // then (期待する結果):
        assert_eq!(result, "! Failed to send message");
    }

    #[test]
    fn test_format_connected() {
        // テスト項目: 接続時の案内に名前の有無が反映される
        // given (前提条件):

        // when (操作):
        let named = MessageFormatter::format_connected(Some("Alice"));
        let unnamed = MessageFormatter::format_connected(None);

        // then (期待する結果):
        assert!(named.contains("'Alice'"));
        assert!(!unnamed.contains("'"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 生メッセージが正しくフォーマットされる
        // given (前提条件):
        let text = "unknown message format";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("unknown message format"));
        assert!(result.contains("Received:"));
    }
}
