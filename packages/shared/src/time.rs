//! Time-related utilities with clock abstraction for testability.
//!
//! Chat timestamps travel as ISO-8601 strings in UTC with millisecond
//! precision (`2024-01-01T00:00:00.000Z`).

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Current instant rendered as an ISO-8601 string
    fn now_iso8601(&self) -> String {
        to_iso8601(self.now())
    }
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given instant
    pub fn new(fixed_time: DateTime<Utc>) -> Self {
        Self { fixed_time }
    }

    /// Create a fixed clock from Unix milliseconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self::new(DateTime::from_timestamp_millis(millis).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.fixed_time
    }
}

/// Get the current time as an ISO-8601 string
pub fn now_iso8601() -> String {
    SystemClock.now_iso8601()
}

/// Render an instant as an ISO-8601 string in UTC with millisecond precision
pub fn to_iso8601(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 / ISO-8601 timestamp with an explicit offset
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a timestamp as local wall-clock time (`HH:MM:SS`) for display.
///
/// Unparseable input is returned unchanged so that the line still renders.
pub fn format_local_time(value: &str) -> String {
    match parse_iso8601(value) {
        Some(instant) => instant.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに増加する時刻を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = clock.now();

        // then (期待する結果):
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じ時刻を返す
        // given (前提条件):
        let clock = FixedClock::from_millis(1_704_067_200_000);

        // when (操作):
        let first = clock.now_iso8601();
        let second = clock.now_iso8601();

        // then (期待する結果):
        assert_eq!(first, "2024-01-01T00:00:00.000Z");
        assert_eq!(first, second);
    }

    #[test]
    fn test_to_iso8601_keeps_milliseconds() {
        // テスト項目: ミリ秒を含む時刻が正しく ISO-8601 形式に変換される
        // given (前提条件):
        let clock = FixedClock::from_millis(1_704_067_200_123);

        // when (操作):
        let result = to_iso8601(clock.now());

        // then (期待する結果):
        assert_eq!(result, "2024-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_parse_iso8601_accepts_offsets() {
        // テスト項目: タイムゾーンオフセット付きの時刻を UTC に変換して解釈できる
        // given (前提条件):
        let value = "2024-01-01T09:00:00+09:00";

        // when (操作):
        let result = parse_iso8601(value);

        // then (期待する結果):
        assert_eq!(
            result.map(to_iso8601),
            Some("2024-01-01T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_parse_iso8601_rejects_garbage() {
        // テスト項目: 不正な文字列は None になる
        // given (前提条件):
        let values = ["", "yesterday", "2024-01-01"];

        // when (操作) / then (期待する結果):
        for value in values {
            assert!(parse_iso8601(value).is_none(), "{value} should not parse");
        }
    }

    #[test]
    fn test_format_local_time_passes_through_invalid_input() {
        // テスト項目: 解釈できない時刻はそのまま表示される
        // given (前提条件):
        let value = "not-a-time";

        // when (操作):
        let result = format_local_time(value);

        // then (期待する結果):
        assert_eq!(result, "not-a-time");
    }

    #[test]
    fn test_format_local_time_renders_wall_clock() {
        // テスト項目: 正しい時刻は HH:MM:SS 形式で表示される
        // given (前提条件):
        let value = "2024-01-01T00:00:00.000Z";

        // when (操作):
        let result = format_local_time(value);

        // then (期待する結果):
        assert_eq!(result.len(), 8);
        assert_eq!(result.matches(':').count(), 2);
    }
}
