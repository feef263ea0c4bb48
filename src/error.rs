//! エラーハンドリングシステム
//!
//! ファイルマネージャ全体で使用される統一されたエラー型とユーティリティを定義
//! 設計方針：ファイルシステムのエラーは操作境界で捕捉し、型付きの結果として返す

use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum AstrumError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Already exists: {path}")]
    AlreadyExists { path: String },

    /// 再帰処理が途中で停止した（ロールバックなし）
    #[error("Stopped partway at {path} after {completed} item(s): {message}")]
    PartialFailure {
        path: String,
        completed: usize,
        message: String,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("IO error at {path}: {message}")]
    Io { path: String, message: String },
}

impl FileError {
    /// `std::io::Error` を対象パス付きの型付きエラーに変換
    pub fn from_io(error: &std::io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            std::io::ErrorKind::AlreadyExists => FileError::AlreadyExists { path },
            _ => FileError::Io {
                path,
                message: error.to_string(),
            },
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        FileError::InvalidInput {
            message: message.into(),
        }
    }
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid configuration file: {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// エラー種別（ホスト側の分岐用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    AlreadyExists,
    PartialFailure,
    InvalidInput,
    Io,
    Config,
    Ui,
    Application,
}

impl AstrumError {
    /// ネストを意識せずに種別を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            AstrumError::File(FileError::NotFound { .. }) => ErrorKind::NotFound,
            AstrumError::File(FileError::PermissionDenied { .. }) => ErrorKind::PermissionDenied,
            AstrumError::File(FileError::AlreadyExists { .. }) => ErrorKind::AlreadyExists,
            AstrumError::File(FileError::PartialFailure { .. }) => ErrorKind::PartialFailure,
            AstrumError::File(FileError::InvalidInput { .. }) => ErrorKind::InvalidInput,
            AstrumError::File(FileError::Io { .. }) => ErrorKind::Io,
            AstrumError::Config(_) => ErrorKind::Config,
            AstrumError::Ui(_) => ErrorKind::Ui,
            AstrumError::Application(_) => ErrorKind::Application,
        }
    }
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
}

/// エラー表示情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間（5秒）
    pub duration: Duration,
}

impl ErrorDisplay {
    pub fn new(error: &AstrumError) -> Self {
        let (message, level) = Self::format_error(error);
        Self::with_message(message, level)
    }

    /// 任意のメッセージで表示情報を作成
    pub fn with_message(message: impl Into<String>, level: ErrorLevel) -> Self {
        Self {
            message: message.into(),
            level,
            start_time: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    fn format_error(error: &AstrumError) -> (String, ErrorLevel) {
        match error {
            AstrumError::File(FileError::NotFound { path }) => {
                (format!("No longer exists: {}", path), ErrorLevel::Error)
            }
            AstrumError::File(FileError::PermissionDenied { path }) => {
                (format!("No permission for {}", path), ErrorLevel::Error)
            }
            AstrumError::File(FileError::AlreadyExists { path }) => {
                (format!("{} already exists", path), ErrorLevel::Error)
            }
            AstrumError::File(FileError::PartialFailure { path, completed, .. }) => (
                format!("Stopped at {} ({} item(s) already done)", path, completed),
                ErrorLevel::Warning,
            ),
            AstrumError::File(FileError::InvalidInput { message }) => {
                (message.clone(), ErrorLevel::Warning)
            }
            _ => (format!("Error: {}", error), ErrorLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定
pub fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("PANIC at {}: {}", location, message);
        default_hook(panic_info);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, AstrumError>;

/// 各モジュール固有のResult型
pub mod file {
    pub type Result<T> = std::result::Result<T, super::FileError>;
}

impl From<std::io::Error> for AstrumError {
    fn from(error: std::io::Error) -> Self {
        AstrumError::File(FileError::Io {
            path: String::new(),
            message: error.to_string(),
        })
    }
}
