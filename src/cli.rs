use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geo-ai")]
#[command(about = "写真の撮影場所をAIで推定するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真1枚の撮影場所を推定
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話的に写真を続けて解析
    Session,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 対話セッションの操作
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// 画像を解析
    Analyze(PathBuf),
    /// 選択を解除
    Clear,
    /// 終了
    Quit,
    /// 空入力
    Nothing,
}

impl SessionAction {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input {
            "" => SessionAction::Nothing,
            "clear" | "c" => SessionAction::Clear,
            "quit" | "q" | "exit" => SessionAction::Quit,
            path => SessionAction::Analyze(PathBuf::from(strip_quotes(path))),
        }
    }
}

/// ドラッグ&ドロップで付く引用符を外す
fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::try_parse_from(["geo-ai", "analyze", "photo.jpg", "--json", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze { image, json } => {
                assert_eq!(image, PathBuf::from("photo.jpg"));
                assert!(json);
            }
            _ => panic!("analyze として解釈されていない"),
        }
    }

    #[test]
    fn test_analyze_requires_image() {
        assert!(Cli::try_parse_from(["geo-ai", "analyze"]).is_err());
    }

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::try_parse_from(["geo-ai", "config", "--set-api-key", "abc"]).unwrap();
        match cli.command {
            Commands::Config { set_api_key, show } => {
                assert_eq!(set_api_key.as_deref(), Some("abc"));
                assert!(!show);
            }
            _ => panic!("config として解釈されていない"),
        }
    }

    #[test]
    fn test_session_action_parse() {
        assert_eq!(SessionAction::parse(""), SessionAction::Nothing);
        assert_eq!(SessionAction::parse("  "), SessionAction::Nothing);
        assert_eq!(SessionAction::parse("clear"), SessionAction::Clear);
        assert_eq!(SessionAction::parse("q"), SessionAction::Quit);
        assert_eq!(SessionAction::parse("quit"), SessionAction::Quit);
        assert_eq!(
            SessionAction::parse(" /tmp/a.jpg "),
            SessionAction::Analyze(PathBuf::from("/tmp/a.jpg"))
        );
    }

    #[test]
    fn test_session_action_strips_quotes() {
        assert_eq!(
            SessionAction::parse("'/tmp/my photo.png'"),
            SessionAction::Analyze(PathBuf::from("/tmp/my photo.png"))
        );
        assert_eq!(
            SessionAction::parse("\"/tmp/x.png\""),
            SessionAction::Analyze(PathBuf::from("/tmp/x.png"))
        );
    }
}
