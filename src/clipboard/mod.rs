//! ファイルクリップボード
//!
//! コピー／切り取り元を一つだけ保持し、貼り付けで消費する状態機械。
//! OS のテキストクリップボードとは無関係

use crate::error::{file::Result, FileError};
use crate::file::copy::{copy_directory, copy_file, remove_entry, CopyReport};
use std::path::{Path, PathBuf};

/// クリップボードのモード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

/// クリップボードの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardState {
    pub source_path: PathBuf,
    pub mode: ClipboardMode,
}

/// 貼り付けの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// 貼り付け完了
    Pasted {
        destination: PathBuf,
        mode: ClipboardMode,
        report: CopyReport,
    },
    /// 上書き確認で拒否された（状態は変更なし）
    Declined { destination: PathBuf },
}

/// クリップボード管理
#[derive(Debug, Clone, Default)]
pub struct ClipboardManager {
    state: Option<ClipboardState>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// コピー元を設定（存在チェックは貼り付け時に行う）
    pub fn copy(&mut self, path: impl Into<PathBuf>) {
        self.set(path.into(), ClipboardMode::Copy);
    }

    /// 切り取り元を設定
    pub fn cut(&mut self, path: impl Into<PathBuf>) {
        self.set(path.into(), ClipboardMode::Cut);
    }

    fn set(&mut self, source_path: PathBuf, mode: ClipboardMode) {
        if source_path.as_os_str().is_empty() {
            self.state = None;
            return;
        }
        log::debug!("clipboard {:?}: {}", mode, source_path.display());
        self.state = Some(ClipboardState { source_path, mode });
    }

    pub fn state(&self) -> Option<&ClipboardState> {
        self.state.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none()
    }

    pub fn clear(&mut self) {
        self.state = None;
    }

    /// `dest_dir` に貼り付け
    ///
    /// 同名のエントリが既にある場合は `confirm_overwrite` で確認し、
    /// 承認されたら既存のエントリを削除してから処理する
    pub fn paste<F>(&mut self, dest_dir: &Path, confirm_overwrite: F) -> Result<PasteOutcome>
    where
        F: FnOnce(&Path) -> bool,
    {
        let Some(state) = self.state.clone() else {
            return Err(FileError::invalid_input("clipboard is empty"));
        };
        if dest_dir.as_os_str().is_empty() {
            return Err(FileError::invalid_input("no destination directory"));
        }

        let source = state.source_path.as_path();
        if source.symlink_metadata().is_err() {
            log::warn!("clipboard source vanished: {}", source.display());
            self.state = None;
            return Err(FileError::NotFound {
                path: source.display().to_string(),
            });
        }
        // リンクはリンク先の種別で扱う
        let source_is_dir = source.is_dir();

        let name = source.file_name().ok_or_else(|| {
            FileError::invalid_input(format!("cannot paste {}", source.display()))
        })?;
        let destination = dest_dir.join(name);
        let same_location = destination == source;

        if source_is_dir && !same_location && destination.starts_with(source) {
            return Err(FileError::invalid_input(format!(
                "cannot paste {} into itself",
                source.display()
            )));
        }
        // 上書きで貼り付け元ごと消してしまう
        if !same_location && source.starts_with(&destination) {
            return Err(FileError::invalid_input(format!(
                "cannot replace {} with its own content",
                destination.display()
            )));
        }
        if same_location && state.mode == ClipboardMode::Copy {
            return Err(FileError::AlreadyExists {
                path: destination.display().to_string(),
            });
        }

        if !same_location && destination.symlink_metadata().is_ok() {
            if !confirm_overwrite(&destination) {
                log::info!("overwrite of {} declined", destination.display());
                return Ok(PasteOutcome::Declined { destination });
            }
            remove_entry(&destination)?;
            log::info!("removed {} before paste", destination.display());
        }

        let report = match state.mode {
            ClipboardMode::Cut => {
                if !same_location {
                    std::fs::rename(source, &destination).map_err(|e| {
                        log::warn!("move {} failed: {}", source.display(), e);
                        FileError::from_io(&e, source)
                    })?;
                }
                self.state = None;
                CopyReport::default()
            }
            ClipboardMode::Copy if source_is_dir => copy_directory(source, &destination)?,
            ClipboardMode::Copy => copy_file(source, &destination)?,
        };

        log::info!(
            "pasted ({:?}) {} -> {}",
            state.mode,
            source.display(),
            destination.display()
        );

        Ok(PasteOutcome::Pasted {
            destination,
            mode: state.mode,
            report,
        })
    }
}
