//! GeoAI Common Library
//!
//! 位置解析結果の型・構造化出力スキーマ・プロンプト・レスポンス検証

pub mod types;
pub mod schema;
pub mod prompts;
pub mod error;
pub mod parser;

pub use types::{Confidence, Coordinates, LocationAnalysis, LocationDraft, Recommendation};
pub use schema::location_schema;
pub use prompts::build_location_prompt;
pub use error::{Error, Result};
pub use parser::{extract_json, parse_location_response};
