//! 外部AIサービスとの境界
//!
//! 解析クライアントはこのトレイトにのみ依存する。
//! 本番は `GeminiService`、テストでは任意のフェイク実装を差し込む。

mod gemini;

pub use gemini::{GeminiService, GEMINI_API_BASE};

use crate::codec::EncodedImage;
use async_trait::async_trait;
use thiserror::Error;

/// サービスへのリクエスト（画像 + 指示文 + 出力スキーマ）
#[derive(Debug, Clone)]
pub struct ModelRequest<'a> {
    pub image: &'a EncodedImage,
    pub instruction: String,
    pub schema: serde_json::Value,
}

/// サービスからのレスポンス
///
/// テキストが得られなかった場合（候補なし・空文字など）は `text` が None。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: Option<String>,
}

impl ModelResponse {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }
}

/// 通信・サービス側の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("通信エラー: {0}")]
    Transport(String),

    #[error("APIエラー (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("レスポンス形式エラー: {0}")]
    Envelope(String),
}

/// 画像を構造化出力で解析できるサービス
#[async_trait]
pub trait LocationService: Send + Sync {
    /// 1リクエストを送信する。リトライはしない。
    async fn generate(&self, request: &ModelRequest<'_>) -> Result<ModelResponse, ServiceError>;
}

#[async_trait]
impl<T: LocationService + ?Sized> LocationService for std::sync::Arc<T> {
    async fn generate(&self, request: &ModelRequest<'_>) -> Result<ModelResponse, ServiceError> {
        (**self).generate(request).await
    }
}
