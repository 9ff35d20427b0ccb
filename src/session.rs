//! 解析の状態遷移
//!
//! Idle → Loading → (Success | Error)、Success/Error からは再送信で Loading に戻る。
//! 同時に進行できる解析は1件のみで、Loading 中の送信は `AnalysisError::Busy` で拒否する。
//! 状態は `watch` チャネルで購読できる。
//! 解析の途中で送信側が破棄された（タイムアウトなど）場合は Idle に戻る。

use crate::analyzer::AnalysisClient;
use crate::codec::{self, EncodedImage, SelectedFile};
use crate::error::AnalysisError;
use crate::service::LocationService;
use geo_ai_common::LocationAnalysis;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// 表示層に公開する解析状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading,
    Success(LocationAnalysis),
    Error(AnalysisError),
}

impl AnalysisState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AnalysisState::Loading)
    }

    pub fn data(&self) -> Option<&LocationAnalysis> {
        match self {
            AnalysisState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<AnalysisError> {
        match self {
            AnalysisState::Error(err) => Some(*err),
            _ => None,
        }
    }

    /// 利用者向けエラーメッセージ
    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }
}

pub struct AnalysisSession<S> {
    client: AnalysisClient<S>,
    state: watch::Sender<AnalysisState>,
    preview: watch::Sender<Option<String>>,
}

impl<S: LocationService> AnalysisSession<S> {
    pub fn new(client: AnalysisClient<S>) -> Self {
        let (state, _) = watch::channel(AnalysisState::Idle);
        let (preview, _) = watch::channel(None);
        Self {
            client,
            state,
            preview,
        }
    }

    /// 現在の状態のスナップショット
    pub fn state(&self) -> AnalysisState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state.subscribe()
    }

    /// 選択中画像のプレビュー（Data URL）
    pub fn preview(&self) -> Option<String> {
        self.preview.borrow().clone()
    }

    /// 選択を解除する。解析状態には触れない。
    pub fn clear_selection(&self) {
        self.preview.send_replace(None);
        debug!("選択を解除しました");
    }

    /// 画像を送信して解析する
    ///
    /// 解析結果は状態として公開される。`Err` は送信自体を受け付けなかった場合のみ
    /// （画像以外のファイル・読み込み失敗・解析中）で、そのとき状態は変わらない。
    pub async fn submit_image(&self, file: &SelectedFile) -> Result<(), AnalysisError> {
        if self.state.borrow().is_loading() {
            debug!(file = %file.path().display(), "解析中のため送信を拒否");
            return Err(AnalysisError::Busy);
        }

        let image = codec::encode(file).await.map_err(|e| {
            warn!(file = %file.path().display(), error = %e, "画像を受け付けられません");
            AnalysisError::from(e)
        })?;

        self.submit_encoded(image).await
    }

    /// エンコード済みの画像を送信して解析する
    pub async fn submit_encoded(&self, image: EncodedImage) -> Result<(), AnalysisError> {
        let started = self.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }
            *state = AnalysisState::Loading;
            true
        });
        if !started {
            debug!("解析中のため送信を拒否");
            return Err(AnalysisError::Busy);
        }

        let guard = LoadingGuard::new(&self.state);

        info!(media_type = image.media_type(), "解析を開始");
        self.preview.send_replace(Some(image.data_url()));

        let outcome = self.client.analyze(&image).await;
        drop(image);

        let next = match outcome {
            Ok(data) => {
                info!(place = data.place_name(), confidence = %data.confidence(), "解析に成功");
                AnalysisState::Success(data)
            }
            Err(err) => {
                info!(error = ?err, "解析に失敗");
                AnalysisState::Error(err)
            }
        };
        guard.finish(next);

        Ok(())
    }
}

/// Loading 中に送信側の Future が破棄されたとき Idle に戻す
struct LoadingGuard<'a> {
    state: &'a watch::Sender<AnalysisState>,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a watch::Sender<AnalysisState>) -> Self {
        Self { state, armed: true }
    }

    fn finish(mut self, next: AnalysisState) {
        self.armed = false;
        self.state.send_replace(next);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("解析が中断されました");
            self.state.send_replace(AnalysisState::Idle);
        }
    }
}
