//! 位置解析結果の型定義
//!
//! - LocationDraft: AIレスポンスをそのままデシリアライズした未検証データ
//! - LocationAnalysis: 検証済みの最終出力（LocationDraftからのみ生成される）

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// 確信度（AIの自己申告）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "高")]
    High,
    #[serde(rename = "中")]
    Medium,
    #[serde(rename = "低")]
    Low,
}

impl Confidence {
    pub const ALL: [Confidence; 3] = [Confidence::High, Confidence::Medium, Confidence::Low];

    /// ワイヤ上の表記（"高" / "中" / "低"）
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "高",
            Confidence::Medium => "中",
            Confidence::Low => "低",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 推定座標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// 緯度 [-90, 90]、経度 [-180, 180] の範囲内か
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// 推奨商品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub reason: String,
    /// マーケットプレイス検索用キーワード（スペース区切り）
    pub keywords: String,
}

/// AIレスポンスの未検証データ
///
/// 必須フィールドが欠けている場合はデシリアライズ自体が失敗する。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub place_name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub confidence: Confidence,
    pub reasoning: Vec<String>,
    pub recommendation: Recommendation,
}

/// 位置解析結果（検証済み）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LocationDraft")]
pub struct LocationAnalysis {
    place_name: String,
    city: String,
    country: String,
    description: String,
    coordinates: Option<Coordinates>,
    confidence: Confidence,
    reasoning: Vec<String>,
    recommendation: Recommendation,
}

impl TryFrom<LocationDraft> for LocationAnalysis {
    type Error = Error;

    fn try_from(draft: LocationDraft) -> Result<Self, Self::Error> {
        if draft.place_name.trim().is_empty() {
            return Err(Error::Validation("placeNameが空です".into()));
        }

        if let Some(coords) = draft.coordinates {
            if !coords.is_valid() {
                return Err(Error::Validation(format!(
                    "座標が範囲外です: ({}, {})",
                    coords.latitude, coords.longitude
                )));
            }
        }

        Ok(Self {
            place_name: draft.place_name,
            city: draft.city,
            country: draft.country,
            description: draft.description,
            coordinates: draft.coordinates,
            confidence: draft.confidence,
            reasoning: draft.reasoning,
            recommendation: draft.recommendation,
        })
    }
}

impl LocationAnalysis {
    pub fn place_name(&self) -> &str {
        &self.place_name
    }

    /// 不明な場合は空文字
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 推定できなかった場合はNone
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// 特定に至った視覚的手がかり
    pub fn reasoning(&self) -> &[String] {
        &self.reasoning
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "placeName": "清水寺",
            "city": "京都",
            "country": "日本",
            "description": "音羽山の中腹に建つ寺院",
            "coordinates": {"latitude": 34.9949, "longitude": 135.785},
            "confidence": "高",
            "reasoning": ["懸造りの舞台", "朱色の三重塔"],
            "recommendation": {
                "title": "地球の歩き方 京都",
                "reason": "周辺の寺社巡りに便利",
                "keywords": "地球の歩き方 京都"
            }
        })
    }

    #[test]
    fn test_deserialize_valid() {
        let analysis: LocationAnalysis =
            serde_json::from_value(sample_json()).expect("デシリアライズ失敗");
        assert_eq!(analysis.place_name(), "清水寺");
        assert_eq!(analysis.city(), "京都");
        assert_eq!(analysis.confidence(), Confidence::High);
        assert_eq!(analysis.reasoning().len(), 2);
        assert_eq!(analysis.recommendation().keywords, "地球の歩き方 京都");

        let coords = analysis.coordinates().expect("座標なし");
        assert_eq!(coords.latitude, 34.9949);
        assert_eq!(coords.longitude, 135.785);
    }

    #[test]
    fn test_coordinates_null_or_missing() {
        let mut value = sample_json();
        value["coordinates"] = serde_json::Value::Null;
        let analysis: LocationAnalysis = serde_json::from_value(value.clone()).unwrap();
        assert!(analysis.coordinates().is_none());

        value.as_object_mut().unwrap().remove("coordinates");
        let analysis: LocationAnalysis = serde_json::from_value(value).unwrap();
        assert!(analysis.coordinates().is_none());
    }

    #[test]
    fn test_coordinates_zero_is_not_unknown() {
        let mut value = sample_json();
        value["coordinates"] = serde_json::json!({"latitude": 0.0, "longitude": 0.0});
        let analysis: LocationAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(
            analysis.coordinates(),
            Some(Coordinates { latitude: 0.0, longitude: 0.0 })
        );
    }

    #[test]
    fn test_missing_required_field() {
        for key in [
            "placeName",
            "city",
            "country",
            "description",
            "confidence",
            "reasoning",
            "recommendation",
        ] {
            let mut value = sample_json();
            value.as_object_mut().unwrap().remove(key);
            let result = serde_json::from_value::<LocationAnalysis>(value);
            assert!(result.is_err(), "{} が欠けているのに成功した", key);
        }
    }

    #[test]
    fn test_missing_recommendation_keywords() {
        let mut value = sample_json();
        value["recommendation"].as_object_mut().unwrap().remove("keywords");
        assert!(serde_json::from_value::<LocationAnalysis>(value).is_err());
    }

    #[test]
    fn test_unknown_confidence() {
        for bad in ["High", "high", "中程度", ""] {
            let mut value = sample_json();
            value["confidence"] = serde_json::json!(bad);
            assert!(serde_json::from_value::<LocationAnalysis>(value).is_err());
        }
    }

    #[test]
    fn test_reasoning_must_be_array() {
        let mut value = sample_json();
        value["reasoning"] = serde_json::json!("懸造りの舞台");
        assert!(serde_json::from_value::<LocationAnalysis>(value).is_err());

        let mut value = sample_json();
        value["reasoning"] = serde_json::json!([]);
        let analysis: LocationAnalysis = serde_json::from_value(value).unwrap();
        assert!(analysis.reasoning().is_empty());
    }

    #[test]
    fn test_empty_place_name() {
        let mut value = sample_json();
        value["placeName"] = serde_json::json!("   ");
        let err = serde_json::from_value::<LocationAnalysis>(value).unwrap_err();
        assert!(err.to_string().contains("placeName"));
    }

    #[test]
    fn test_empty_city_is_allowed() {
        let mut value = sample_json();
        value["city"] = serde_json::json!("");
        let analysis: LocationAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(analysis.city(), "");
    }

    #[test]
    fn test_coordinates_out_of_range() {
        for (lat, lon) in [(91.0, 0.0), (-90.5, 10.0), (10.0, 180.1), (10.0, -200.0)] {
            let mut value = sample_json();
            value["coordinates"] = serde_json::json!({"latitude": lat, "longitude": lon});
            assert!(serde_json::from_value::<LocationAnalysis>(value).is_err());
        }
    }

    #[test]
    fn test_coordinates_missing_longitude() {
        let mut value = sample_json();
        value["coordinates"] = serde_json::json!({"latitude": 35.0});
        assert!(serde_json::from_value::<LocationAnalysis>(value).is_err());
    }

    #[test]
    fn test_serialize_camel_case() {
        let analysis: LocationAnalysis = serde_json::from_value(sample_json()).unwrap();
        let json = serde_json::to_string(&analysis).expect("シリアライズ失敗");
        assert!(json.contains("\"placeName\":\"清水寺\""));
        assert!(json.contains("\"confidence\":\"高\""));

        let restored: LocationAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(analysis, restored);
    }
}
