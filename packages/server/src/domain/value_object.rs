//! 値オブジェクト
//!
//! 生成時に検証を行い、不正な値を持つインスタンスが存在しないことを保証します。

use lounge_shared::time::{parse_iso8601, to_iso8601};
use uuid::Uuid;

use super::{entity::SYSTEM_DISPLAY_NAME, error::ValueObjectError};

/// 表示名の最大文字数
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// メッセージ本文の最大文字数
pub const MAX_MESSAGE_TEXT_LENGTH: usize = 2000;

/// メッセージ ID（ストアが割り当てる、またはクライアントが生成した一意な文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::MessageIdEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<Uuid> for MessageId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<String> for MessageId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 接続 ID（リレーが接続ごとに割り当てる）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for ConnectionId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 表示名
///
/// - 前後の空白は取り除かれる
/// - 空文字列は不可
/// - 最大 [`MAX_DISPLAY_NAME_LENGTH`] 文字
/// - システム通知用の名前（`System`）は大文字小文字を問わず使用不可
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let name = Self::validate(value)?;
        if name.eq_ignore_ascii_case(SYSTEM_DISPLAY_NAME) {
            return Err(ValueObjectError::DisplayNameReserved(name));
        }
        Ok(Self(name))
    }

    /// システム通知の送信者名
    pub fn system() -> Self {
        Self(SYSTEM_DISPLAY_NAME.to_string())
    }

    /// 検証を行わずに生成する（ストアから読み出したレコード用）
    ///
    /// 保存済みのレコードは受け取った形のまま中継する。
    pub(crate) fn from_record(value: String) -> Self {
        Self(value)
    }

    fn validate(value: String) -> Result<String, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::DisplayNameEmpty);
        }
        let length = trimmed.chars().count();
        if length > MAX_DISPLAY_NAME_LENGTH {
            return Err(ValueObjectError::DisplayNameTooLong {
                max: MAX_DISPLAY_NAME_LENGTH,
                actual: length,
            });
        }
        Ok(trimmed.to_string())
    }

    pub fn is_system(&self) -> bool {
        self.0 == SYSTEM_DISPLAY_NAME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// メッセージ本文
///
/// 空白のみの本文は不可。本文そのものは加工せずに保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let length = value.chars().count();
        if length > MAX_MESSAGE_TEXT_LENGTH {
            return Err(ValueObjectError::MessageTextTooLong {
                max: MAX_MESSAGE_TEXT_LENGTH,
                actual: length,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl MessageText {
    /// リレー自身が生成する通知文
    pub(crate) fn notice(value: String) -> Self {
        Self(value)
    }

    /// 検証を行わずに生成する（ストアから読み出したレコード用）
    pub(crate) fn from_record(value: String) -> Self {
        Self(value)
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ISO-8601 形式のタイムスタンプ（クライアントが送信時に付与する）
///
/// クライアントが送ってきた表記をそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if parse_iso8601(&value).is_none() {
            return Err(ValueObjectError::InvalidTimestamp(value));
        }
        Ok(Self(value))
    }

    /// 検証を行わずに生成する（ストアから読み出したレコード用）
    pub(crate) fn from_record(value: String) -> Self {
        Self(value)
    }

    pub fn from_datetime(instant: chrono::DateTime<chrono::Utc>) -> Self {
        Self(to_iso8601(instant))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
