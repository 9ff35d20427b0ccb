use clap::Parser;
use dialoguer::Input;
use geo_ai_rust::{cli, config, error, logging, render};
use geo_ai_rust::analyzer::AnalysisClient;
use geo_ai_rust::codec::SelectedFile;
use geo_ai_rust::service::GeminiService;
use geo_ai_rust::session::{AnalysisSession, AnalysisState};
use cli::{Cli, Commands, SessionAction};
use config::Config;
use error::{GeoAiError, Result};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, json } => {
            let session = build_session(&config)?;
            if !json {
                println!("🌏 geo-ai - 撮影場所の推定\n");
            }

            analyze_one(&session, &image, json).await?;
            match session.state() {
                AnalysisState::Success(data) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&data)?);
                    } else {
                        println!("{}", render::format_report(&data, &config.associate_tag));
                    }
                }
                AnalysisState::Error(err) => return Err(err.into()),
                _ => {}
            }
        }

        Commands::Session => {
            let session = build_session(&config)?;
            println!("🌏 geo-ai - 対話モード");
            println!("---");
            println!("操作: [パス]解析 [clear]選択解除 [quit]終了");
            println!("---\n");

            loop {
                let input: String = Input::new()
                    .with_prompt("画像")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(|e| GeoAiError::CliExecution(e.to_string()))?;

                match SessionAction::parse(&input) {
                    SessionAction::Analyze(path) => {
                        if let Err(e) = analyze_one(&session, &path, false).await {
                            println!("✖ {}\n", e);
                            continue;
                        }
                        match session.state() {
                            AnalysisState::Success(data) => {
                                println!("{}", render::format_report(&data, &config.associate_tag));
                            }
                            other => println!("{}\n", render::format_state(&other)),
                        }
                    }
                    SessionAction::Clear => {
                        session.clear_selection();
                        println!("  → 選択を解除しました\n");
                    }
                    SessionAction::Quit => break,
                    SessionAction::Nothing => {
                        println!("  {}\n", render::format_state(&session.state()));
                    }
                }
            }
        }

        Commands::Config { set_api_key, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "APIキー: {}",
                    if config.api_key.is_some() { "設定済み" } else { "未設定" }
                );
                println!("モデル: {}", config.model);
                println!("アソシエイトタグ: {}", config.associate_tag);
                println!("タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

fn build_session(config: &Config) -> Result<AnalysisSession<GeminiService>> {
    let api_key = config.get_api_key()?;
    let service = GeminiService::new(api_key, config.model.clone(), config.timeout())?;
    Ok(AnalysisSession::new(AnalysisClient::new(service)))
}

/// 1枚送信して完了まで待つ。受け付けられなかった場合のみ Err。
async fn analyze_one(
    session: &AnalysisSession<GeminiService>,
    path: &Path,
    quiet: bool,
) -> Result<()> {
    if !path.exists() {
        return Err(GeoAiError::FileNotFound(path.display().to_string()));
    }

    let file = SelectedFile::from_path(path);
    let spinner = (!quiet).then(|| render::spinner(&format!("{} の場所を特定中...", file.file_name())));
    let result = session.submit_image(&file).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    Ok(result?)
}
