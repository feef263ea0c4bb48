//! ナビゲーション履歴
//!
//! 戻る方向のみの履歴（新しいものが先頭）。進む方向の履歴は持たない

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// 履歴の最大保存数
const MAX_HISTORY_SIZE: usize = 100;

/// 訪問済みディレクトリの履歴
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: VecDeque<PathBuf>,
    max_size: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_SIZE)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// 移動前のパスを記録
    pub fn record(&mut self, path: &Path) {
        if path.as_os_str().is_empty() {
            return;
        }

        // 直前と同じなら積まない
        if self.entries.front().map(PathBuf::as_path) == Some(path) {
            return;
        }

        self.entries.push_front(path.to_path_buf());

        while self.entries.len() > self.max_size {
            self.entries.pop_back();
        }
    }

    /// インデックス0が最新
    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}
