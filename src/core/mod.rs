//! ファイルマネージャのセッション
//!
//! ナビゲーション・クリップボード・ファイル操作を一つにまとめ、ホストへ公開する。
//! 対話が必要な操作は `UserInterface` を受け取り、失敗は通知したうえで `Err` を返す

pub mod boundary;
pub mod notifier;

pub use boundary::{ConfirmKind, HeadlessInterface, UserInterface};
pub use notifier::{ListenerId, ListingChanged, ListingListener, ListingNotifier};

use crate::clipboard::{ClipboardManager, ClipboardState, PasteOutcome};
use crate::config::{AstrumConfig, Bookmark};
use crate::error::{file::Result, FileError};
use crate::file::entry::DirectoryEntry;
use crate::file::operations::FileOperationExecutor;
use crate::file::path::{display_name, normalize_path, parent_of, to_absolute};
use crate::file::properties::EntryProperties;
use crate::file::reader::DirectoryReader;
use crate::filter::{FilterEngine, FilterQuery};
use crate::navigation::{NavigationController, NavigationHistory};
use std::path::{Path, PathBuf};

/// エントリを開いた結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// ディレクトリへ移動した（一覧が読めたかどうか）
    Navigated { accessible: bool },
    /// ファイルはホスト側で開く
    OpenFile(PathBuf),
}

/// ファイルマネージャ本体
#[derive(Debug)]
pub struct FileManager {
    navigation: NavigationController,
    clipboard: ClipboardManager,
    executor: FileOperationExecutor,
    notifier: ListingNotifier,
    bookmarks: Vec<Bookmark>,
}

impl FileManager {
    /// 設定から作成し、起動ディレクトリを開く
    pub fn new(config: &AstrumConfig) -> Self {
        let mut manager = Self::with_reader(
            DirectoryReader::with_hidden(config.show_hidden),
            config.resolved_bookmarks(),
        );
        let start = config.resolve_start_path();
        manager.navigate_to(&start);
        manager
    }

    /// 初期位置なしで作成（最初に `navigate_to` を呼ぶこと）
    pub fn with_reader(reader: DirectoryReader, bookmarks: Vec<Bookmark>) -> Self {
        Self {
            navigation: NavigationController::new(reader),
            clipboard: ClipboardManager::new(),
            executor: FileOperationExecutor::new(),
            notifier: ListingNotifier::new(),
            bookmarks,
        }
    }

    // ---- 一覧 ----

    /// 任意のディレクトリの一覧（現在位置は変えない）
    pub fn listing(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        self.navigation.reader().list(path)
    }

    /// 任意のディレクトリをフィルタした一覧
    pub fn filtered_listing(&self, path: &Path, query: &FilterQuery) -> Result<Vec<DirectoryEntry>> {
        let entries = self.listing(path)?;
        if query.is_empty() {
            return Ok(entries);
        }
        Ok(FilterEngine::apply(&entries, query))
    }

    pub fn current_path(&self) -> &Path {
        self.navigation.current_path()
    }

    /// 表示中の一覧
    pub fn entries(&self) -> &[DirectoryEntry] {
        self.navigation.entries()
    }

    pub fn all_entries(&self) -> &[DirectoryEntry] {
        self.navigation.all_entries()
    }

    pub fn item_count_label(&self, filtered: bool) -> String {
        self.navigation.item_count_label(filtered)
    }

    pub fn is_filtered(&self) -> bool {
        self.navigation.is_filtered()
    }

    pub fn active_filter(&self) -> Option<&FilterQuery> {
        self.navigation.active_filter()
    }

    pub fn history(&self) -> &NavigationHistory {
        self.navigation.history()
    }

    pub fn show_hidden(&self) -> bool {
        self.navigation.reader().show_hidden()
    }

    pub fn set_show_hidden(&mut self, show: bool) {
        self.navigation.set_show_hidden(show);
        self.emit();
    }

    // ---- ナビゲーション ----

    /// 指定ディレクトリへ移動（読めない場合も移動し "No access" を表示）
    pub fn navigate_to(&mut self, path: &Path) -> bool {
        let target = match to_absolute(path) {
            Ok(absolute) => normalize_path(&absolute),
            Err(e) => {
                log::warn!("cannot resolve {}: {}", path.display(), e);
                path.to_path_buf()
            }
        };
        let accessible = self.navigation.navigate_to(&target);
        log::debug!("navigated to {}", target.display());
        self.emit();
        accessible
    }

    pub fn go_up(&mut self) -> bool {
        let moved = self.navigation.go_up();
        if moved {
            self.emit();
        }
        moved
    }

    pub fn go_back(&mut self) -> bool {
        let moved = self.navigation.go_back();
        if moved {
            self.emit();
        }
        moved
    }

    pub fn go_forward(&mut self) -> bool {
        self.navigation.go_forward()
    }

    pub fn refresh(&mut self) -> bool {
        let accessible = self.navigation.refresh();
        self.emit();
        accessible
    }

    /// フィルタを設定（空文字は解除と同じ）
    pub fn set_filter(&mut self, query: FilterQuery) {
        self.navigation.set_filter(query);
        self.emit();
    }

    pub fn clear_filter(&mut self) {
        self.navigation.clear_filter();
        self.emit();
    }

    /// エントリを開く（ディレクトリなら移動、ファイルならホストに委ねる）
    pub fn activate(&mut self, path: &Path) -> Result<Activation> {
        let entry = DirectoryEntry::from_path(path)?;
        if entry.is_dir() || path.is_dir() {
            let accessible = self.navigate_to(path);
            return Ok(Activation::Navigated { accessible });
        }
        log::info!("open file {}", path.display());
        Ok(Activation::OpenFile(path.to_path_buf()))
    }

    /// エントリの親ディレクトリへ移動
    pub fn open_containing_folder(&mut self, path: &Path) -> bool {
        match parent_of(path) {
            Some(parent) => self.navigate_to(&parent),
            None => false,
        }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn open_bookmark(&mut self, index: usize) -> Result<bool> {
        let path = self
            .bookmarks
            .get(index)
            .map(|bookmark| bookmark.path.clone())
            .ok_or_else(|| FileError::invalid_input(format!("no bookmark #{}", index)))?;
        Ok(self.navigate_to(&path))
    }

    // ---- クリップボード ----

    pub fn copy(&mut self, path: &Path) {
        self.clipboard.copy(path);
    }

    pub fn cut(&mut self, path: &Path) {
        self.clipboard.cut(path);
    }

    pub fn clipboard(&self) -> Option<&ClipboardState> {
        self.clipboard.state()
    }

    /// 現在のディレクトリへ貼り付け
    pub fn paste(&mut self, ui: &mut dyn UserInterface) -> Result<PasteOutcome> {
        let dest_dir = self.navigation.current_path().to_path_buf();
        let source_name = self
            .clipboard
            .state()
            .map(|state| display_name(&state.source_path))
            .unwrap_or_default();

        let result = self.clipboard.paste(&dest_dir, |destination| {
            let message = format!(
                "'{}' already exists. Do you want to overwrite it?",
                display_name(destination)
            );
            ui.confirm(&message, ConfirmKind::Overwrite)
        });

        match result {
            Ok(outcome) => {
                if let PasteOutcome::Pasted { destination, .. } = &outcome {
                    ui.notify_info(&format!("Pasted {}", display_name(destination)));
                    self.refresh();
                }
                Ok(outcome)
            }
            Err(e) => {
                if matches!(e, FileError::PartialFailure { .. }) {
                    self.refresh();
                }
                report(ui, "paste", &source_name, &e);
                Err(e)
            }
        }
    }

    // ---- ファイル操作 ----

    /// 名前を入力してフォルダを作成（キャンセル時は None）
    pub fn create_folder(&mut self, ui: &mut dyn UserInterface) -> Result<Option<PathBuf>> {
        let Some(name) = ui.prompt_text("New Folder", "Enter folder name:", "") else {
            return Ok(None);
        };
        if name.is_empty() {
            return Ok(None);
        }

        let parent = self.navigation.current_path().to_path_buf();
        match self.executor.create_folder(&parent, &name) {
            Ok(created) => {
                self.refresh();
                Ok(Some(created))
            }
            Err(e) => {
                report(ui, "create folder", &name, &e);
                Err(e)
            }
        }
    }

    /// 確認のうえ削除（拒否された場合は false）
    pub fn delete(&mut self, path: &Path, ui: &mut dyn UserInterface) -> Result<bool> {
        let name = display_name(path);
        let message = format!("Are you sure you want to delete '{}'?", name);
        if !ui.confirm(&message, ConfirmKind::Delete) {
            return Ok(false);
        }

        match self.executor.delete(path) {
            Ok(_) => {
                self.refresh();
                Ok(true)
            }
            Err(e) => {
                if matches!(e, FileError::PartialFailure { .. }) {
                    self.refresh();
                }
                report(ui, "delete", &name, &e);
                Err(e)
            }
        }
    }

    /// 新しい名前を入力して名前変更（キャンセル・空・同名は None）
    pub fn rename(&mut self, path: &Path, ui: &mut dyn UserInterface) -> Result<Option<PathBuf>> {
        let old_name = display_name(path);
        let Some(new_name) = ui.prompt_text("Rename", "Enter new name:", &old_name) else {
            return Ok(None);
        };
        if new_name.is_empty() || new_name == old_name {
            return Ok(None);
        }

        match self.executor.rename(path, &new_name) {
            Ok(renamed) => {
                self.refresh();
                Ok(Some(renamed))
            }
            Err(e) => {
                report(ui, "rename", &old_name, &e);
                Err(e)
            }
        }
    }

    pub fn properties(&self, path: &Path) -> Result<EntryProperties> {
        EntryProperties::inspect(path)
    }

    // ---- 通知 ----

    pub fn add_listener(&mut self, listener: Box<dyn ListingListener>) -> ListenerId {
        self.notifier.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.notifier.remove_listener(id)
    }

    fn emit(&mut self) {
        let count = |entries: &[DirectoryEntry]| entries.iter().filter(|e| !e.synthetic).count();
        let event = ListingChanged {
            path: self.navigation.current_path().to_path_buf(),
            total: count(self.navigation.all_entries()),
            visible: count(self.navigation.entries()),
            filtered: self.navigation.is_filtered(),
        };
        self.notifier.notify(&event);
    }
}

fn report(ui: &mut dyn UserInterface, action: &str, name: &str, error: &FileError) {
    let message = format!("Could not {} '{}': {}", action, name, error);
    log::warn!("{}", message);
    ui.notify_error(&message);
}
