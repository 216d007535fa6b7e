//! Infrastructure 層
//!
//! ドメイン層が定義するインターフェースの具体的な実装を提供します。

pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod store;
