//! 構造化出力スキーマ
//!
//! Gemini の `responseSchema`（OpenAPIサブセット）として送信する。
//! レスポンス検証は `LocationAnalysis` のデシリアライズで行うため、
//! ここでの必須項目と `types.rs` の必須項目は一致していなければならない。

use crate::types::Confidence;
use serde_json::{json, Value};

/// トップレベルの必須フィールド（coordinates以外すべて）
pub const REQUIRED_FIELDS: &[&str] = &[
    "placeName",
    "city",
    "country",
    "description",
    "confidence",
    "reasoning",
    "recommendation",
];

/// recommendationの必須フィールド
pub const RECOMMENDATION_FIELDS: &[&str] = &["title", "reason", "keywords"];

/// LocationAnalysisのレスポンススキーマを生成
pub fn location_schema() -> Value {
    let confidence_values: Vec<&str> = Confidence::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "placeName": { "type": "STRING" },
            "city": { "type": "STRING" },
            "country": { "type": "STRING" },
            "description": { "type": "STRING" },
            "coordinates": {
                "type": "OBJECT",
                "properties": {
                    "latitude": { "type": "NUMBER" },
                    "longitude": { "type": "NUMBER" }
                },
                "required": ["latitude", "longitude"],
                "nullable": true
            },
            "confidence": {
                "type": "STRING",
                "format": "enum",
                "enum": confidence_values
            },
            "reasoning": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "recommendation": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "reason": { "type": "STRING" },
                    "keywords": { "type": "STRING" }
                },
                "required": RECOMMENDATION_FIELDS
            }
        },
        "required": REQUIRED_FIELDS
    })
}
