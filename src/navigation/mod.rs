//! ナビゲーション制御
//!
//! 現在のパスを保持し、パス変更時に一覧取得とフィルタ適用を行う

pub mod history;

pub use history::NavigationHistory;

use crate::file::entry::DirectoryEntry;
use crate::file::path::parent_of;
use crate::file::reader::DirectoryReader;
use crate::filter::{FilterEngine, FilterQuery};
use crate::ui::status::ItemCounter;
use std::path::{Path, PathBuf};

/// ナビゲーション状態と現在の一覧
#[derive(Debug, Clone)]
pub struct NavigationController {
    current_path: PathBuf,
    history: NavigationHistory,
    reader: DirectoryReader,
    active_filter: Option<FilterQuery>,
    /// フィルタ前の一覧
    entries: Vec<DirectoryEntry>,
    /// フィルタ後の一覧
    visible: Vec<DirectoryEntry>,
    accessible: bool,
}

impl NavigationController {
    pub fn new(reader: DirectoryReader) -> Self {
        Self {
            current_path: PathBuf::new(),
            history: NavigationHistory::new(),
            reader,
            active_filter: None,
            entries: Vec::new(),
            visible: Vec::new(),
            accessible: false,
        }
    }

    /// 指定ディレクトリへ移動
    ///
    /// 読み取れないディレクトリの場合もパスは更新し、一覧を "No access" 一件に置き換える。
    /// 一覧が読めたかどうかを返す
    pub fn navigate_to(&mut self, path: &Path) -> bool {
        if self.current_path != path {
            self.history.record(&self.current_path);
            self.current_path = path.to_path_buf();
        }
        self.reload()
    }

    /// 親ディレクトリへ移動（ルートでは何もしない）
    pub fn go_up(&mut self) -> bool {
        match parent_of(&self.current_path) {
            Some(parent) => {
                self.navigate_to(&parent);
                true
            }
            None => {
                log::debug!("already at root: {}", self.current_path.display());
                false
            }
        }
    }

    /// 戻る（親ディレクトリへの移動と同じ動作）
    pub fn go_back(&mut self) -> bool {
        self.go_up()
    }

    /// 進む（履歴を持たないため何もしない）
    pub fn go_forward(&mut self) -> bool {
        log::debug!("forward navigation is not recorded");
        false
    }

    /// 現在のディレクトリを読み直し、フィルタを再適用
    pub fn refresh(&mut self) -> bool {
        self.reload()
    }

    /// フィルタを設定（空文字はフィルタ解除）
    pub fn set_filter(&mut self, query: FilterQuery) {
        if query.is_empty() {
            self.active_filter = None;
        } else {
            log::debug!("filter {} {:?}", query.mode, query.raw_text);
            self.active_filter = Some(query);
        }
        self.reload();
    }

    pub fn clear_filter(&mut self) {
        self.active_filter = None;
        self.reload();
    }

    /// 隠しファイル表示を切り替えて読み直す
    pub fn set_show_hidden(&mut self, show: bool) {
        self.reader.set_show_hidden(show);
        self.reload();
    }

    fn reload(&mut self) -> bool {
        self.accessible = DirectoryReader::is_readable_dir(&self.current_path);

        self.entries = if self.accessible {
            match self.reader.list(&self.current_path) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("listing {} failed: {}", self.current_path.display(), e);
                    self.accessible = false;
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        if !self.accessible {
            log::info!("no access to {}", self.current_path.display());
            self.entries = vec![DirectoryEntry::no_access_marker(&self.current_path)];
            self.visible = self.entries.clone();
            return false;
        }

        self.visible = match &self.active_filter {
            Some(query) => FilterEngine::apply(&self.entries, query),
            None => self.entries.clone(),
        };
        true
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// 表示中の一覧（フィルタ適用後）
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.visible
    }

    /// フィルタ適用前の一覧
    pub fn all_entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn active_filter(&self) -> Option<&FilterQuery> {
        self.active_filter.as_ref()
    }

    pub fn is_filtered(&self) -> bool {
        self.active_filter.is_some()
    }

    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn reader(&self) -> &DirectoryReader {
        &self.reader
    }

    /// 件数ラベル（filtered なら表示中の件数、そうでなければ全件数）
    pub fn item_count_label(&self, filtered: bool) -> String {
        let entries = if filtered { &self.visible } else { &self.entries };
        ItemCounter::count(&self.current_path, entries, filtered)
    }
}
