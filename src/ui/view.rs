//! 描画用スナップショット
//!
//! `FileManager` の状態を文字列化し、描画中に借用を持たないようにする

use crate::clipboard::ClipboardMode;
use crate::core::FileManager;
use crate::file::entry::{DirectoryEntry, EntryKind};
use crate::file::properties::{format_size, format_timestamp, EntryProperties};
use crate::file::path::display_name;

/// 一覧の一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub name: String,
    pub size: String,
    pub modified: String,
    pub is_dir: bool,
    pub synthetic: bool,
}

impl ListingRow {
    pub fn from_entry(entry: &DirectoryEntry) -> Self {
        let name = match entry.kind {
            EntryKind::Directory => format!("{}/", entry.name),
            EntryKind::Symlink => format!("{}@", entry.name),
            EntryKind::File => entry.name.clone(),
        };
        let size = if entry.is_file() {
            format_size(entry.size)
        } else {
            String::new()
        };
        let modified = if entry.synthetic {
            String::new()
        } else {
            format_timestamp(entry.modified_at)
        };

        Self {
            name,
            size,
            modified,
            is_dir: entry.is_dir(),
            synthetic: entry.synthetic,
        }
    }
}

/// 画面一枚分の表示内容
#[derive(Debug, Clone, Default)]
pub struct ListingView {
    pub path_label: String,
    pub rows: Vec<ListingRow>,
    pub selected: Option<usize>,
    pub count_label: String,
    pub filter_label: Option<String>,
    pub clipboard_label: Option<String>,
    pub properties: Option<EntryProperties>,
}

impl ListingView {
    pub fn capture(manager: &FileManager, selected: usize) -> Self {
        let entries = manager.entries();
        let rows: Vec<ListingRow> = entries.iter().map(ListingRow::from_entry).collect();
        let selected = if rows.is_empty() {
            None
        } else {
            Some(selected.min(rows.len() - 1))
        };

        let filter_label = manager
            .active_filter()
            .map(|query| format!("{}: {}", query.mode.label(), query.raw_text));

        let clipboard_label = manager.clipboard().map(|state| {
            let verb = match state.mode {
                ClipboardMode::Copy => "Copy",
                ClipboardMode::Cut => "Cut",
            };
            format!("{} {}", verb, display_name(&state.source_path))
        });

        Self {
            path_label: manager.current_path().display().to_string(),
            rows,
            selected,
            count_label: manager.item_count_label(manager.is_filtered()),
            filter_label,
            clipboard_label,
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: Option<EntryProperties>) -> Self {
        self.properties = properties;
        self
    }
}
