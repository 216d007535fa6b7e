//! MessageStore 実装
//!
//! - `inmemory`: プロセス内の Vec を使った実装（開発・テスト用）
//! - `appwrite`: ホスト型ドキュメントデータベースの REST API を使った実装

pub mod appwrite;
pub mod inmemory;

pub use appwrite::{AppwriteConfig, AppwriteMessageStore};
pub use inmemory::InMemoryMessageStore;
