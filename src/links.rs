//! 解析結果から外部リンクを生成
//!
//! どちらも LocationAnalysis だけで決まる純粋関数。

use geo_ai_common::LocationAnalysis;
use url::form_urlencoded;

pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";
pub const MARKETPLACE_SEARCH_URL: &str = "https://www.amazon.co.jp/s";
pub const DEFAULT_ASSOCIATE_TAG: &str = "simplemind0f-22";

/// application/x-www-form-urlencoded 形式（空白は `%20` ではなく `+`）
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// "場所名 都市 国"
///
/// 空の要素は詰める（区切りの空白が連続しないように）。
pub fn location_query(analysis: &LocationAnalysis) -> String {
    [analysis.place_name(), analysis.city(), analysis.country()]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 地図検索URL
///
/// 座標があれば "緯度,経度"、なければ場所名での検索にする。
pub fn map_url(analysis: &LocationAnalysis) -> String {
    match analysis.coordinates() {
        Some(coords) => format!(
            "{}?api=1&query={},{}",
            MAPS_SEARCH_URL, coords.latitude, coords.longitude
        ),
        None => format!(
            "{}?api=1&query={}",
            MAPS_SEARCH_URL,
            encode_component(&location_query(analysis))
        ),
    }
}

/// 推奨商品のマーケットプレイス検索URL（アソシエイトタグ付き）
pub fn marketplace_url(analysis: &LocationAnalysis, associate_tag: &str) -> String {
    format!(
        "{}?k={}&tag={}",
        MARKETPLACE_SEARCH_URL,
        encode_component(&analysis.recommendation().keywords),
        encode_component(associate_tag)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(coordinates: serde_json::Value) -> LocationAnalysis {
        serde_json::from_value(serde_json::json!({
            "placeName": "Test Plaza",
            "city": "Testville",
            "country": "Testland",
            "description": "...",
            "coordinates": coordinates,
            "confidence": "低",
            "reasoning": [],
            "recommendation": {"title": "City Guide", "reason": "...", "keywords": "city guide testville"}
        }))
        .unwrap()
    }

    #[test]
    fn test_map_url_with_coordinates() {
        let a = analysis(serde_json::json!({"latitude": 35.0, "longitude": 139.0}));
        assert_eq!(
            map_url(&a),
            "https://www.google.com/maps/search/?api=1&query=35,139"
        );
    }

    #[test]
    fn test_map_url_keeps_precision() {
        let a = analysis(serde_json::json!({"latitude": -33.8568, "longitude": 151.2153}));
        assert!(map_url(&a).ends_with("query=-33.8568,151.2153"));
    }

    #[test]
    fn test_map_url_without_coordinates() {
        let a = analysis(serde_json::Value::Null);
        assert_eq!(
            map_url(&a),
            "https://www.google.com/maps/search/?api=1&query=Test+Plaza+Testville+Testland"
        );
    }

    #[test]
    fn test_location_query_skips_empty_city() {
        let mut value = serde_json::to_value(analysis(serde_json::Value::Null)).unwrap();
        value["city"] = serde_json::json!("");
        let a: LocationAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(location_query(&a), "Test Plaza Testland");
    }

    #[test]
    fn test_query_spaces_are_form_encoded() {
        let a = analysis(serde_json::Value::Null);
        let url = map_url(&a);
        assert!(!url.contains("%20"));
        assert!(url.ends_with("query=Test+Plaza+Testville+Testland"));
    }

    #[test]
    fn test_map_url_encodes_non_ascii() {
        let mut value = serde_json::to_value(analysis(serde_json::Value::Null)).unwrap();
        value["placeName"] = serde_json::json!("清水寺");
        let a: LocationAnalysis = serde_json::from_value(value).unwrap();
        let url = map_url(&a);
        assert!(url.contains("query=%E6%B8%85%E6%B0%B4%E5%AF%BA+Testville"));
    }

    #[test]
    fn test_marketplace_url() {
        let a = analysis(serde_json::Value::Null);
        assert_eq!(
            marketplace_url(&a, DEFAULT_ASSOCIATE_TAG),
            "https://www.amazon.co.jp/s?k=city+guide+testville&tag=simplemind0f-22"
        );
    }

    #[test]
    fn test_links_are_deterministic() {
        let a = analysis(serde_json::json!({"latitude": 48.8584, "longitude": 2.2945}));
        assert_eq!(map_url(&a), map_url(&a.clone()));
        assert_eq!(
            marketplace_url(&a, "tag-22"),
            marketplace_url(&a.clone(), "tag-22")
        );
    }
}
