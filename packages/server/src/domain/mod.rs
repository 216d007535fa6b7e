//! ドメイン層
//!
//! チャットリレーのビジネスルールを表現する値オブジェクト・エンティティと、
//! 外部依存（永続化・接続管理・通知）のインターフェースを定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod message_store;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Connection, NewChatMessage, SYSTEM_DISPLAY_NAME};
pub use error::{MessagePushError, RepositoryError, StoreError, ValueObjectError};
pub use event::RelayEvent;
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use message_store::MessageStore;
pub use repository::ConnectionRepository;
pub use value_object::{ConnectionId, DisplayName, MessageId, MessageText, Timestamp};
