//! ファイル操作コア機能
//!
//! フォルダ作成、削除、名前変更の実装

use crate::error::{file::Result, FileError};
use crate::file::copy::{remove_entry, RemoveReport};
use crate::file::path::{is_valid_entry_name, parent_of};
use std::path::{Path, PathBuf};

/// ファイル操作の実行
#[derive(Debug, Clone, Default)]
pub struct FileOperationExecutor;

impl FileOperationExecutor {
    pub fn new() -> Self {
        Self
    }

    /// フォルダを作成
    ///
    /// 作成に失敗した場合（名前の衝突や不正な文字）は `AlreadyExists`
    pub fn create_folder(&self, parent: &Path, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(FileError::invalid_input("folder name is empty"));
        }

        let target = parent.join(name);
        if !is_valid_entry_name(name) {
            log::warn!("rejected folder name {:?} in {}", name, parent.display());
            return Err(FileError::AlreadyExists {
                path: target.display().to_string(),
            });
        }

        std::fs::create_dir(&target).map_err(|e| {
            log::warn!("create folder {} failed: {}", target.display(), e);
            FileError::AlreadyExists {
                path: target.display().to_string(),
            }
        })?;

        log::info!("created folder {}", target.display());
        Ok(target)
    }

    /// ファイル・フォルダを削除
    ///
    /// 対象ではなく親ディレクトリの書き込み権限を確認する。
    /// 確認ダイアログは呼び出し側（UI境界）の責務
    pub fn delete(&self, path: &Path) -> Result<RemoveReport> {
        if path.symlink_metadata().is_err() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            });
        }

        let parent = parent_of(path).ok_or_else(|| FileError::PermissionDenied {
            path: path.display().to_string(),
        })?;

        if !Self::is_writable_dir(&parent) {
            log::warn!(
                "delete {} refused: {} is not writable",
                path.display(),
                parent.display()
            );
            return Err(FileError::PermissionDenied {
                path: parent.display().to_string(),
            });
        }

        let report = remove_entry(path)?;
        log::info!("deleted {} ({} item(s))", path.display(), report.removed);
        Ok(report)
    }

    /// 名前を変更（同じディレクトリ内）
    pub fn rename(&self, path: &Path, new_name: &str) -> Result<PathBuf> {
        if new_name.is_empty() {
            return Err(FileError::invalid_input("new name is empty"));
        }
        if !is_valid_entry_name(new_name) {
            return Err(FileError::invalid_input(format!(
                "invalid name: {}",
                new_name
            )));
        }
        if path.symlink_metadata().is_err() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            });
        }

        let parent = parent_of(path).ok_or_else(|| {
            FileError::invalid_input(format!("cannot rename {}", path.display()))
        })?;
        let target = parent.join(new_name);

        if target == path {
            return Ok(target);
        }

        // rename(2) は既存ファイルを黙って上書きするため事前に確認する
        if target.symlink_metadata().is_ok() {
            return Err(FileError::AlreadyExists {
                path: target.display().to_string(),
            });
        }

        std::fs::rename(path, &target).map_err(|e| {
            log::warn!("rename {} failed: {}", path.display(), e);
            match e.kind() {
                std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied {
                    path: path.display().to_string(),
                },
                _ => FileError::AlreadyExists {
                    path: target.display().to_string(),
                },
            }
        })?;

        log::info!("renamed {} -> {}", path.display(), target.display());
        Ok(target)
    }

    /// ディレクトリが書き込み可能か（権限ビットで判定）
    pub fn is_writable_dir(path: &Path) -> bool {
        match path.metadata() {
            Ok(metadata) => metadata.is_dir() && !metadata.permissions().readonly(),
            Err(_) => false,
        }
    }
}
