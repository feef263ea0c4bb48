//! ロギングシステム
//!
//! `log` ファサードのバックエンド。stderr とファイルへの出力を提供

use log::{LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// デバッグ出力を強制する環境変数
pub const DEBUG_ENV_VAR: &str = "ASTRUM_DEBUG";

/// ログ初期化オプション
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub level: LevelFilter,
    pub output_stderr: bool,
    pub output_file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            output_stderr: true,
            output_file: None,
        }
    }
}

impl LoggingOptions {
    /// 設定文字列からレベルを解決（"debug", "warn" など）
    pub fn level_from_str(value: &str) -> Option<LevelFilter> {
        value.parse::<LevelFilter>().ok()
    }

    /// 環境変数によるデバッグレベル上書きを適用
    pub fn with_env_override(mut self) -> Self {
        if std::env::var_os(DEBUG_ENV_VAR).is_some() {
            self.level = LevelFilter::Debug;
        }
        self
    }
}

/// ロガー
///
/// * 開発者向けログを stderr へ出力
/// * TUI 実行中はファイル出力のみを使う
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    output_stderr: bool,
    output_file: Option<Mutex<std::fs::File>>,
}

impl Logger {
    pub fn new(options: &LoggingOptions) -> std::io::Result<Self> {
        let output_file = match &options.output_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(Mutex::new(file))
            }
            None => None,
        };

        Ok(Self {
            level: options.level,
            output_stderr: options.output_stderr,
            output_file,
        })
    }

    /// ログレベルを取得
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    fn format_line(record: &Record) -> String {
        let tag = match record.level() {
            log::Level::Error => "ERROR",
            log::Level::Warn => "WARNING",
            log::Level::Info => "INFO",
            log::Level::Debug => "DEBUG",
            log::Level::Trace => "TRACE",
        };
        format!("{}: {} in {}", tag, record.args(), record.target())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::format_line(record);

        if self.output_stderr {
            eprintln!("{}", line);
        }

        if let Some(file) = &self.output_file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", line);
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.output_file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// グローバルロガーを初期化（二度目以降の呼び出しは何もしない）
pub fn init(options: &LoggingOptions) -> std::io::Result<()> {
    let logger = Logger::new(options)?;
    let level = logger.level();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}
