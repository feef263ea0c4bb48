//! 設定ファイル
//!
//! `~/.config/astrum/config.json` を読み込む。ファイルが無ければ既定値を使う

use crate::error::ConfigError;
use crate::file::path::expand_path;
use crate::logging::LoggingOptions;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, ConfigError>;

/// ブックマーク
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub path: PathBuf,
}

impl Bookmark {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstrumConfig {
    /// 起動時のディレクトリ（未指定時はホーム）
    pub start_path: Option<PathBuf>,
    /// 隠しファイルを表示するか
    pub show_hidden: bool,
    pub bookmarks: Vec<Bookmark>,
    /// "error" / "warn" / "info" / "debug" / "trace"
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for AstrumConfig {
    fn default() -> Self {
        Self {
            start_path: None,
            show_hidden: false,
            bookmarks: default_bookmarks(),
            log_level: None,
            log_file: None,
        }
    }
}

impl AstrumConfig {
    /// 設定ファイルの既定の場所
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("astrum").join("config.json"))
    }

    /// 設定ファイルを読み込む（存在しなければ既定値）
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::InvalidFile {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// 既定の場所から読み込む
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let to_error = |message: String| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| to_error(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| to_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| to_error(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if let Some(level) = &self.log_level {
            if LoggingOptions::level_from_str(level).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: "log_level".to_string(),
                    value: level.clone(),
                });
            }
        }
        Ok(())
    }

    /// overrides 側で指定された値を優先してマージ
    pub fn merged_with(&self, overrides: &AstrumConfig) -> AstrumConfig {
        AstrumConfig {
            start_path: overrides
                .start_path
                .clone()
                .or_else(|| self.start_path.clone()),
            show_hidden: overrides.show_hidden || self.show_hidden,
            bookmarks: if overrides.bookmarks.is_empty() {
                self.bookmarks.clone()
            } else {
                overrides.bookmarks.clone()
            },
            log_level: overrides
                .log_level
                .clone()
                .or_else(|| self.log_level.clone()),
            log_file: overrides.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// 起動ディレクトリを解決（~ や $VAR を展開）
    pub fn resolve_start_path(&self) -> PathBuf {
        self.start_path
            .as_ref()
            .and_then(|path| expand_config_path(path))
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    /// 展開済みのブックマーク一覧
    pub fn resolved_bookmarks(&self) -> Vec<Bookmark> {
        self.bookmarks
            .iter()
            .filter_map(|bookmark| {
                expand_config_path(&bookmark.path).map(|path| Bookmark::new(&bookmark.name, path))
            })
            .collect()
    }

    /// ロギング設定へ変換
    pub fn logging_options(&self) -> LoggingOptions {
        let mut options = LoggingOptions::default();
        if let Some(level) = self
            .log_level
            .as_deref()
            .and_then(LoggingOptions::level_from_str)
        {
            options.level = level;
        }
        options.output_file = self.log_file.as_ref().and_then(|p| expand_config_path(p));
        options
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        self.logging_options().level
    }
}

fn expand_config_path(path: &Path) -> Option<PathBuf> {
    let text = path.to_str()?;
    match expand_path(text) {
        Ok(expanded) => Some(expanded),
        Err(e) => {
            log::warn!("ignoring config path {}: {}", text, e);
            None
        }
    }
}

/// ホーム・ダウンロード・ドキュメント（解決できないものは省く）
pub fn default_bookmarks() -> Vec<Bookmark> {
    [
        ("Home", dirs::home_dir()),
        ("Downloads", dirs::download_dir()),
        ("Documents", dirs::document_dir()),
    ]
    .into_iter()
    .filter_map(|(name, path)| path.map(|path| Bookmark::new(name, path)))
    .collect()
}
