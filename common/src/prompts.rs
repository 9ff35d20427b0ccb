//! プロンプト生成モジュール
//!
//! 位置特定用の指示文。出力形状はスキーマで強制するため、
//! ここでは各フィールドの意味だけを説明する。

use crate::types::Confidence;

/// 位置特定プロンプト生成
///
/// # Returns
/// 画像と一緒に送る指示文
pub fn build_location_prompt() -> String {
    let tiers = Confidence::ALL
        .iter()
        .map(|c| format!("\"{}\"", c.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"この画像を分析し、撮影された場所を特定してください。
ランドマーク、建築様式、自然の特徴、文字情報（看板など）を詳細に観察してください。

また、この場所を訪れるユーザーや、この写真のような体験をしたいユーザーにとって「あると便利」「役立つ」と思われるAmazonで購入可能な商品を、様々なジャンル（旅行ガイド、カメラ用品、アウトドア、ファッション、ガジェットなど）から1つだけ選定してください。

以下の情報をJSON形式で出力してください：
1. 場所の名前 (placeName): 具体的なランドマーク名や地域名
2. 都市 (city): 都市名（不明な場合は空文字）
3. 国 (country): 国名
4. 説明 (description): その場所についての簡潔な説明（歴史的背景や特徴など）
5. 座標 (coordinates): 推定される緯度(latitude)と経度(longitude)。不明な場合はnull。
6. 確信度 (confidence): {tiers} のいずれか
7. 推論理由 (reasoning): 特定に至った視覚的な手がかりのリスト（文字列の配列）
8. 推奨商品 (recommendation):
   - title: 商品名やカテゴリ（例：「GoPro Hero」「地球の歩き方 イタリア」「トレッキングシューズ」など具体的に）
   - reason: なぜこの場所やシチュエーションでその商品がおすすめなのかの理由
   - keywords: Amazon検索用のキーワード（スペース区切り）"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_every_field() {
        let prompt = build_location_prompt();
        for field in [
            "placeName",
            "city",
            "country",
            "description",
            "coordinates",
            "confidence",
            "reasoning",
            "recommendation",
            "keywords",
        ] {
            assert!(prompt.contains(field), "{} がプロンプトにない", field);
        }
    }

    #[test]
    fn test_prompt_lists_confidence_tiers() {
        let prompt = build_location_prompt();
        assert!(prompt.contains(r#""高", "中", "低""#));
        assert!(prompt.contains("1つだけ"));
    }
}
