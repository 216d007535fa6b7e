//! ホスト型ドキュメントデータベース（Appwrite）を使った MessageStore 実装
//!
//! ## 使用する API
//!
//! - 追加: `POST {endpoint}/databases/{database}/collections/{collection}/documents`
//! - 一覧: `GET  {endpoint}/databases/{database}/collections/{collection}/documents`
//!
//! 一覧は `$createdAt` の昇順を指定し、`limit` / `offset` クエリで
//! 全件を取得し終えるまでページを辿ります。

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    ChatMessage, DisplayName, MessageId, MessageIdFactory, MessageStore, MessageText,
    NewChatMessage, StoreError, Timestamp,
};

/// ドキュメント ID をサーバー側で採番させるための予約値
const UNIQUE_DOCUMENT_ID: &str = "unique()";

/// 一覧取得で 1 ページあたりに要求する件数
const PAGE_SIZE: u64 = 100;

/// 接続先の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppwriteConfig {
    /// API のエンドポイント（例: `https://cloud.appwrite.io/v1`）
    pub endpoint: String,
    pub project_id: String,
    /// サーバー用 API キー（未設定ならコレクションの公開権限に従う）
    pub api_key: Option<String>,
    pub database_id: String,
    pub collection_id: String,
}

/// Appwrite MessageStore 実装
pub struct AppwriteMessageStore {
    client: reqwest::Client,
    config: AppwriteConfig,
}

/// 作成リクエストのボディ
#[derive(Debug, Serialize)]
struct CreateDocumentRequest<'a> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: DocumentData<'a>,
}

/// コレクションに保存する属性
#[derive(Debug, Serialize)]
struct DocumentData<'a> {
    message: &'a str,
    #[serde(rename = "altName")]
    alt_name: &'a str,
    timestamp: &'a str,
}

/// 一覧レスポンス
#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    documents: Vec<Document>,
}

/// 保存済みドキュメント
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "$id", default)]
    id: String,
    #[serde(default)]
    message: String,
    #[serde(rename = "altName", default)]
    alt_name: String,
    #[serde(default)]
    timestamp: String,
}

impl Document {
    /// ストアの ID を取り出す。ID が無いドキュメントにはリレー側で ID を割り当てる
    fn message_id(&self) -> MessageId {
        MessageId::new(self.id.clone()).unwrap_or_else(|_| {
            tracing::warn!("Document without '$id' returned by the store, assigning a new id");
            MessageIdFactory::generate()
        })
    }

    /// ドメインモデルへ変換する。保存済みの値は検証せずそのまま使う
    fn into_chat_message(self) -> ChatMessage {
        let id = self.message_id();
        ChatMessage::new(
            id,
            DisplayName::from_record(self.alt_name),
            MessageText::from_record(self.message),
            Timestamp::from_record(self.timestamp),
        )
    }
}

impl AppwriteMessageStore {
    /// 新しい AppwriteMessageStore を作成
    pub fn new(config: AppwriteConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database_id,
            self.config.collection_id
        )
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.documents_url())
            .header("X-Appwrite-Project", &self.config.project_id);
        match &self.config.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    /// 作成順に並べた一覧の 1 ページを取得する
    async fn fetch_page(&self, offset: u64) -> Result<DocumentList, StoreError> {
        let queries = [
            ("queries[]", json!({ "method": "orderAsc", "attribute": "$createdAt" }).to_string()),
            ("queries[]", json!({ "method": "limit", "values": [PAGE_SIZE] }).to_string()),
            ("queries[]", json!({ "method": "offset", "values": [offset] }).to_string()),
        ];
        let response = Self::send(self.request(Method::GET).query(&queries)).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    /// リクエストを送信し、成功以外のステータスをエラーに変換する
    async fn send(builder: RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MessageStore for AppwriteMessageStore {
    async fn append(&self, message: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let body = CreateDocumentRequest {
            document_id: UNIQUE_DOCUMENT_ID,
            data: DocumentData {
                message: message.text.as_str(),
                alt_name: message.display_name.as_str(),
                timestamp: message.timestamp.as_str(),
            },
        };

        let response = Self::send(self.request(Method::POST).json(&body)).await?;
        let document: Document = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        tracing::debug!("Document '{}' created", document.id);
        Ok(ChatMessage::persisted(document.message_id(), message))
    }

    async fn list(&self) -> Result<Vec<ChatMessage>, StoreError> {
        let mut documents: Vec<Document> = Vec::new();
        loop {
            let page = self.fetch_page(documents.len() as u64).await?;
            let fetched = page.documents.len();
            documents.extend(page.documents);

            // 途中で total が減った場合は空のページが返る
            if fetched == 0 || documents.len() as u64 >= page.total {
                tracing::debug!("Fetched {} of {} documents", documents.len(), page.total);
                break;
            }
        }

        Ok(documents
            .into_iter()
            .map(Document::into_chat_message)
            .collect())
    }
}
