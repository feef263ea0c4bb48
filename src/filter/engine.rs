//! フィルタ評価エンジン

use crate::file::entry::DirectoryEntry;
use crate::filter::query::{FilterMode, FilterQuery, SizeSpec};

/// エントリ一覧へのフィルタ適用
pub struct FilterEngine;

impl FilterEngine {
    /// 条件に一致するエントリだけを返す（順序は保持）
    pub fn apply(entries: &[DirectoryEntry], query: &FilterQuery) -> Vec<DirectoryEntry> {
        let predicate = Predicate::compile(query);
        entries
            .iter()
            .filter(|entry| predicate.matches(entry))
            .cloned()
            .collect()
    }

    /// 単一エントリの判定
    pub fn matches(entry: &DirectoryEntry, query: &FilterQuery) -> bool {
        Predicate::compile(query).matches(entry)
    }
}

/// 一覧全体で使い回す解析済みの述語
enum Predicate {
    Name {
        needle: String,
    },
    Type {
        needle: String,
        folders: bool,
    },
    Size {
        spec: Option<SizeSpec>,
        folders: bool,
    },
}

impl Predicate {
    fn compile(query: &FilterQuery) -> Self {
        match query.mode {
            FilterMode::Name => Predicate::Name {
                needle: query.raw_text.to_lowercase(),
            },
            FilterMode::Type => Predicate::Type {
                needle: query.raw_text.to_lowercase(),
                folders: query.names_folders(),
            },
            FilterMode::Size => {
                let spec = SizeSpec::parse(&query.raw_text);
                if spec.is_none() {
                    log::debug!("size filter {:?} not understood, matching all files", query.raw_text);
                }
                Predicate::Size {
                    spec,
                    folders: query.names_folders(),
                }
            }
        }
    }

    fn matches(&self, entry: &DirectoryEntry) -> bool {
        if entry.synthetic {
            return false;
        }

        match self {
            Predicate::Name { needle } => entry.name.to_lowercase().contains(needle.as_str()),
            Predicate::Type { needle, folders } => {
                if entry.resolves_to_dir() {
                    *folders
                } else {
                    match entry.extension() {
                        Some(ext) if !ext.is_empty() => ext.to_lowercase().contains(needle.as_str()),
                        _ => false,
                    }
                }
            }
            Predicate::Size { spec, folders } => {
                if entry.resolves_to_dir() {
                    *folders
                } else {
                    // 解析できないサイズ指定は全件一致（フェイルオープン）
                    spec.map_or(true, |spec| spec.matches(entry.size))
                }
            }
        }
    }
}
