//! APIレスポンスパーサー
//!
//! レスポンス本文をJSONオブジェクトとして厳密に読み、
//! LocationAnalysisとして検証する

use crate::error::{Error, Result};
use crate::types::LocationAnalysis;

/// APIレスポンスからJSON本文を取り出す
///
/// - 本文全体が ``` で始まる場合のみコードブロックを外す
/// - それ以外は前後の空白を除いた本文をそのまま使う
/// - 結果が `{` で始まらなければエラー（配列や前置きの文章は受け付けない）
///
/// # Examples
/// ```
/// use geo_ai_common::extract_json;
///
/// let response = "```json\n{\"key\": \"value\"}\n```";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"key\": \"value\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    let trimmed = response.trim();
    let body = match trimmed.strip_prefix("```") {
        Some(fenced) => strip_fence(fenced)?,
        None => trimmed,
    };

    if body.is_empty() {
        Err(Error::Parse("JSONが見つかりません".into()))
    } else if !body.starts_with('{') {
        Err(Error::Parse("JSONオブジェクトではありません".into()))
    } else {
        Ok(body)
    }
}

/// 開始行（言語指定）と末尾の ``` を外す
fn strip_fence(fenced: &str) -> Result<&str> {
    let unclosed = || Error::Parse("コードブロックが閉じていません".into());
    let (_, rest) = fenced.split_once('\n').ok_or_else(unclosed)?;
    let inner = rest.trim_end().strip_suffix("```").ok_or_else(unclosed)?;
    Ok(inner.trim())
}

/// 位置解析レスポンスをパース
///
/// 必須フィールドの欠落・型違い・確信度の範囲外・座標の範囲外・
/// オブジェクト後の余分な文字はすべてエラーになる。部分的な結果は返さない。
pub fn parse_location_response(response: &str) -> Result<LocationAnalysis> {
    let json_str = extract_json(response)?;
    Ok(serde_json::from_str(json_str)?)
}
