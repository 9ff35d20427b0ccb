//! 画像コーデック
//!
//! 選択されたファイルを Base64 ペイロード + MIMEタイプに変換する。
//! 縮小や再圧縮は行わない（元のバイト列をそのまま送る）。

use crate::error::CodecError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 画像クレートが知らない形式の拡張子 → MIMEタイプ
const EXTRA_MEDIA_TYPES: &[(&str, &str)] = &[
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
];

/// ユーザーが選択したファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
    media_type: String,
}

impl SelectedFile {
    /// 拡張子からMIMEタイプを宣言してファイルを選択
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let media_type = declared_media_type(&path);
        Self { path, media_type }
    }

    /// MIMEタイプを明示して選択（ブラウザの File.type 相当を受け取る場合）
    pub fn with_media_type(path: impl Into<PathBuf>, media_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            media_type: media_type.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// 拡張子から宣言MIMEタイプを決める
pub fn declared_media_type(path: &Path) -> String {
    if let Ok(format) = image::ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    EXTRA_MEDIA_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// `image/*` に一致するか
pub fn is_image_media_type(media_type: &str) -> bool {
    let media_type = media_type.trim().to_ascii_lowercase();
    match media_type.split_once('/') {
        Some((top, sub)) => top == "image" && !sub.is_empty(),
        None => false,
    }
}

/// 送信用にエンコードされた画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data: String,
    media_type: String,
}

impl EncodedImage {
    /// メモリ上のバイト列からエンコード
    pub fn from_bytes(bytes: &[u8], media_type: &str) -> Result<Self, CodecError> {
        if !is_image_media_type(media_type) {
            return Err(CodecError::UnsupportedMediaType(media_type.to_string()));
        }

        Ok(Self {
            data: STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        })
    }

    /// Base64ペイロード
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// プレビュー表示用のData URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    /// 元のバイト列に復号
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// 選択ファイルを読み込んでエンコード
///
/// MIMEタイプが `image/*` でなければファイルを読まずに失敗する。
pub async fn encode(file: &SelectedFile) -> Result<EncodedImage, CodecError> {
    if !is_image_media_type(file.media_type()) {
        return Err(CodecError::UnsupportedMediaType(file.media_type().to_string()));
    }

    let bytes = tokio::fs::read(file.path()).await?;
    debug!(
        file = %file.path().display(),
        media_type = file.media_type(),
        bytes = bytes.len(),
        "画像を読み込みました"
    );

    EncodedImage::from_bytes(&bytes, file.media_type())
}
