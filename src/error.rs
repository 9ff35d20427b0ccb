use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`geo-ai config --set-api-key YOUR_KEY` または環境変数 GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTPクライアント初期化エラー: {0}")]
    HttpClient(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

pub type Result<T> = std::result::Result<T, GeoAiError>;

/// 解析1回分の失敗分類
///
/// 表示メッセージは利用者向けの要約のみ。内部の詳細はログに出す。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("画像ファイルのみアップロード可能です。")]
    UnsupportedMediaType,

    #[error("画像ファイルを読み込めませんでした。")]
    ImageUnreadable,

    #[error("AIからの応答が空でした。")]
    EmptyResponse,

    #[error("AIの応答を解釈できませんでした。別の画像を試してください。")]
    MalformedResponse,

    #[error("画像の解析に失敗しました。しばらく待ってから再試行してください。")]
    ServiceUnavailable,

    #[error("解析中です。完了するまでお待ちください。")]
    Busy,
}

/// 画像エンコードのエラー
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("画像以外のファイルです: {0}")]
    UnsupportedMediaType(String),

    #[error("画像読み込みエラー: {0}")]
    Read(#[from] std::io::Error),
}

impl From<CodecError> for AnalysisError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::UnsupportedMediaType(_) => AnalysisError::UnsupportedMediaType,
            CodecError::Read(_) => AnalysisError::ImageUnreadable,
        }
    }
}
