//! 解析クライアント
//!
//! 画像1枚につき外部サービスを1回だけ呼び出し、
//! レスポンスを検証して LocationAnalysis を返す。失敗は AnalysisError に分類する。

use crate::codec::EncodedImage;
use crate::error::AnalysisError;
use crate::service::{LocationService, ModelRequest};
use geo_ai_common::{build_location_prompt, location_schema, parse_location_response, LocationAnalysis};
use tracing::{debug, warn};

/// 画像・指示文・スキーマからリクエストを組み立てる
pub fn build_model_request(image: &EncodedImage) -> ModelRequest<'_> {
    ModelRequest {
        image,
        instruction: build_location_prompt(),
        schema: location_schema(),
    }
}

pub struct AnalysisClient<S> {
    service: S,
}

impl<S: LocationService> AnalysisClient<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// 画像の撮影場所を解析
    ///
    /// キャッシュはしない。同じ画像でも呼ぶたびにサービスへ送信する。
    pub async fn analyze(&self, image: &EncodedImage) -> Result<LocationAnalysis, AnalysisError> {
        let request = build_model_request(image);

        let response = self.service.generate(&request).await.map_err(|e| {
            warn!(error = %e, "サービス呼び出しに失敗");
            AnalysisError::ServiceUnavailable
        })?;

        let text = match response.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                warn!("サービスの応答にテキストがありません");
                return Err(AnalysisError::EmptyResponse);
            }
        };
        debug!(chars = text.len(), "応答テキストを受信");

        parse_location_response(&text).map_err(|e| {
            warn!(error = %e, "応答の検証に失敗");
            AnalysisError::MalformedResponse
        })
    }
}
