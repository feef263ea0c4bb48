//! ファイルシステム操作モジュール
//!
//! - 一覧取得は名前順（大文字小文字を無視）、隠しファイルは既定で除外
//! - 再帰コピー・削除は途中失敗時にロールバックしない
//! - 削除は親ディレクトリの書き込み権限を確認

pub mod copy;
pub mod entry;
pub mod operations;
pub mod path;
pub mod properties;
pub mod reader;

pub use copy::{copy_directory, copy_file, remove_entry, CopyReport, RemoveReport};
pub use entry::{DirectoryEntry, EntryKind, EntryPermissions, NO_ACCESS_LABEL};
pub use operations::FileOperationExecutor;
pub use path::{expand_path, normalize_path, parent_of};
pub use properties::{format_size, EntryProperties};
pub use reader::DirectoryReader;
