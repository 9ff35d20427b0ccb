//! 解析結果の端末表示

use crate::links;
use crate::session::AnalysisState;
use geo_ai_common::{Confidence, Coordinates, LocationAnalysis};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;
use std::time::Duration;

/// 確信度の表示色
pub fn confidence_badge(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "🟢",
        Confidence::Medium => "🟡",
        Confidence::Low => "🔴",
    }
}

/// 座標を小数5桁で
pub fn format_coordinates(coords: &Coordinates) -> String {
    format!("緯度: {:.5} / 経度: {:.5}", coords.latitude, coords.longitude)
}

/// 結果カード
pub fn format_report(analysis: &LocationAnalysis, associate_tag: &str) -> String {
    let mut out = String::new();
    let confidence = analysis.confidence();

    let _ = writeln!(out, "📍 {}", analysis.place_name());
    let _ = writeln!(out, "   {}, {}", analysis.city(), analysis.country());
    let _ = writeln!(out, "   確信度: {} {}", confidence_badge(confidence), confidence);
    let _ = writeln!(out);

    let _ = writeln!(out, "■ 場所の概要");
    let _ = writeln!(out, "  {}", analysis.description());

    if !analysis.reasoning().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "■ 特定の手がかり");
        for reason in analysis.reasoning() {
            let _ = writeln!(out, "  ✔ {}", reason);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "■ 地図");
    if let Some(coords) = analysis.coordinates() {
        let _ = writeln!(out, "  {}", format_coordinates(&coords));
    }
    let _ = writeln!(out, "  {}", links::map_url(analysis));

    let recommendation = analysis.recommendation();
    let _ = writeln!(out);
    let _ = writeln!(out, "■ おすすめアイテム: {}", recommendation.title);
    let _ = writeln!(out, "  {}", recommendation.reason);
    let _ = writeln!(out, "  {}", links::marketplace_url(analysis, associate_tag));

    out
}

/// 解析状態を1行で
pub fn format_state(state: &AnalysisState) -> String {
    match state {
        AnalysisState::Idle => "画像を選択してください".into(),
        AnalysisState::Loading => "場所を特定中...".into(),
        AnalysisState::Success(data) => format!("✔ {}", data.place_name()),
        AnalysisState::Error(err) => format!("✖ {}", err),
    }
}

/// 解析中のスピナー
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
