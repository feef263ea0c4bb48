//! astrum - terminal file manager
//!
//! ディレクトリ閲覧、クリップボード経由のコピー／移動、フォルダ作成・削除・名前変更、
//! 名前・種類・サイズによるフィルタを提供するファイルマネージャのコア

// コアモジュール
pub mod config;
pub mod core;
pub mod error;
pub mod frontend;
pub mod logging;

// データ層
pub mod file;

// ロジック層
pub mod clipboard;
pub mod filter;
pub mod navigation;

// 表示層
pub mod ui;

// 公開API
pub use crate::core::{Activation, ConfirmKind, FileManager, UserInterface};
pub use config::AstrumConfig;
pub use error::{AstrumError, Result};
pub use frontend::TuiApplication;
