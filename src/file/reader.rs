//! ディレクトリ読み込み
//!
//! 並び順：名前の大文字小文字を無視した昇順（同値は大文字小文字を区別して比較）

use crate::error::{file::Result, FileError};
use crate::file::entry::DirectoryEntry;
use std::cmp::Ordering;
use std::path::Path;

/// ディレクトリ一覧の取得
#[derive(Debug, Clone, Default)]
pub struct DirectoryReader {
    show_hidden: bool,
}

impl DirectoryReader {
    pub fn new() -> Self {
        Self { show_hidden: false }
    }

    /// 隠しファイル表示設定
    pub fn with_hidden(show_hidden: bool) -> Self {
        Self { show_hidden }
    }

    pub fn set_show_hidden(&mut self, show: bool) {
        self.show_hidden = show;
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// ディレクトリ内容を一覧（`.` と `..` は含まない）
    pub fn list(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        let metadata = path.metadata().map_err(|e| FileError::from_io(&e, path))?;
        if !metadata.is_dir() {
            return Err(FileError::NotFound {
                path: path.display().to_string(),
            });
        }

        let entries = std::fs::read_dir(path).map_err(|e| FileError::from_io(&e, path))?;

        let mut listing = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FileError::from_io(&e, path))?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            // 隠しファイルフィルタ
            if !self.show_hidden && name.starts_with('.') {
                continue;
            }

            let entry_path = entry.path();
            // 一覧取得中に消えたエントリは読み飛ばす
            match entry_path.symlink_metadata() {
                Ok(meta) => listing.push(DirectoryEntry::from_metadata(&entry_path, &meta)),
                Err(e) => log::debug!("skipping {}: {}", entry_path.display(), e),
            }
        }

        listing.sort_by(compare_names);
        log::debug!("listed {} entries in {}", listing.len(), path.display());

        Ok(listing)
    }

    /// 読み取り可能なディレクトリか
    pub fn is_readable_dir(path: &Path) -> bool {
        path.is_dir() && std::fs::read_dir(path).is_ok()
    }
}

fn compare_names(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}
