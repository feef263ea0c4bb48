//! プロパティ表示用の情報

use crate::error::file::Result;
use crate::file::entry::{DirectoryEntry, EntryKind};
use crate::file::path::parent_of;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;
use std::time::SystemTime;

/// プロパティ画面に表示する内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryProperties {
    pub name: String,
    pub type_description: String,
    pub location: String,
    pub size: String,
    pub created: String,
    pub modified: String,
    pub accessed: String,
    pub permissions: String,
}

impl EntryProperties {
    /// パスを調べてプロパティを作成
    pub fn inspect(path: &Path) -> Result<Self> {
        let entry = DirectoryEntry::from_path(path)?;
        Ok(Self::from_entry(&entry))
    }

    pub fn from_entry(entry: &DirectoryEntry) -> Self {
        let location = parent_of(&entry.path)
            .map(|parent| parent.display().to_string())
            .unwrap_or_default();

        let size = match entry.kind {
            EntryKind::File => format_size(entry.size),
            _ => "--".to_string(),
        };

        Self {
            name: entry.name.clone(),
            type_description: type_description(entry),
            location,
            size,
            created: format_timestamp(entry.created_at),
            modified: format_timestamp(entry.modified_at),
            accessed: format_timestamp(entry.accessed_at),
            permissions: entry.permissions.to_flags(),
        }
    }
}

fn type_description(entry: &DirectoryEntry) -> String {
    match entry.kind {
        EntryKind::Directory => "Folder".to_string(),
        EntryKind::Symlink => "Symbolic Link".to_string(),
        EntryKind::File => match entry.extension() {
            Some(ext) if !ext.is_empty() => format!("{} File", ext.to_uppercase()),
            _ => "File".to_string(),
        },
    }
}

/// バイト数を人間向けに整形（1024未満はバイト、それ以上は小数2桁）
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size < KB {
        format!("{} bytes", size)
    } else if size < MB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else {
        format!("{:.2} GB", size as f64 / GB as f64)
    }
}

/// タイムスタンプを `YYYY-MM-DD HH:MM:SS`（ローカル時刻）で整形
pub fn format_timestamp(time: Option<SystemTime>) -> String {
    time.map(|t| {
        let datetime: DateTime<Local> = t.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    })
    .unwrap_or_else(|| "Unknown".to_string())
}
