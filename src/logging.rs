//! ログ初期化
//!
//! 通常は警告以上、`--verbose` でデバッグまで stderr に出す。
//! 標準出力は解析結果の表示に使う。

use tracing::Level;

pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

pub fn init(verbose: bool) {
    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
