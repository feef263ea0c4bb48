//! ディレクトリエントリ
//!
//! 一覧取得ごとに新しく生成される不変のエントリ情報

use crate::error::{file::Result, FileError};
use crate::file::path::display_name;
use serde::Serialize;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// アクセス不可ディレクトリの代わりに表示するエントリ名
pub const NO_ACCESS_LABEL: &str = "No access";

/// エントリ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

/// 権限フラグ（現在のユーザーから見た値）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntryPermissions {
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
}

impl EntryPermissions {
    /// "RWX" 形式の文字列
    pub fn to_flags(self) -> String {
        let mut flags = String::new();
        if self.readable {
            flags.push('R');
        }
        if self.writable {
            flags.push('W');
        }
        if self.executable {
            flags.push('X');
        }
        flags
    }
}

/// ディレクトリエントリ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryEntry {
    /// 表示名
    pub name: String,
    /// 絶対パス
    pub path: PathBuf,
    pub kind: EntryKind,
    /// リンクを辿った先の種別（リンク以外は `kind` と同じ、リンク切れは `Symlink`）
    pub target_kind: EntryKind,
    /// バイト数（ファイルとファイルへのリンクのみ、それ以外は 0）
    pub size: u64,
    pub created_at: Option<SystemTime>,
    pub modified_at: Option<SystemTime>,
    pub accessed_at: Option<SystemTime>,
    pub permissions: EntryPermissions,
    /// "No access" 表示用の合成エントリ
    pub synthetic: bool,
}

impl DirectoryEntry {
    /// パスからエントリを作成（シンボリックリンクは辿らない）
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = path
            .symlink_metadata()
            .map_err(|e| FileError::from_io(&e, path))?;
        Ok(Self::from_metadata(path, &metadata))
    }

    pub(crate) fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        let kind = if metadata.file_type().is_symlink() {
            EntryKind::Symlink
        } else if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        let (target_kind, size) = if kind == EntryKind::Symlink {
            match std::fs::metadata(path) {
                Ok(target) if target.is_dir() => (EntryKind::Directory, 0),
                Ok(target) => (EntryKind::File, target.len()),
                Err(_) => (EntryKind::Symlink, 0),
            }
        } else if kind == EntryKind::File {
            (kind, metadata.len())
        } else {
            (kind, 0)
        };

        Self {
            name: display_name(path),
            path: path.to_path_buf(),
            kind,
            target_kind,
            size,
            created_at: metadata.created().ok(),
            modified_at: metadata.modified().ok(),
            accessed_at: metadata.accessed().ok(),
            permissions: permissions_of(path, metadata),
            synthetic: false,
        }
    }

    /// アクセスできないディレクトリ用の合成エントリ
    pub fn no_access_marker(path: &Path) -> Self {
        Self {
            name: NO_ACCESS_LABEL.to_string(),
            path: path.to_path_buf(),
            kind: EntryKind::File,
            target_kind: EntryKind::File,
            size: 0,
            created_at: None,
            modified_at: None,
            accessed_at: None,
            permissions: EntryPermissions::default(),
            synthetic: true,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// ディレクトリ、またはディレクトリへのリンクか
    pub fn resolves_to_dir(&self) -> bool {
        self.target_kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File && !self.synthetic
    }

    /// 拡張子（ディレクトリやドットファイルは None）
    pub fn extension(&self) -> Option<String> {
        if self.is_dir() {
            return None;
        }
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
    }
}

#[cfg(unix)]
fn permissions_of(path: &Path, metadata: &Metadata) -> EntryPermissions {
    use std::os::unix::fs::PermissionsExt;

    let mode = metadata.permissions().mode();
    // 所有者ビットで近似し、読み取りは実際に試す
    EntryPermissions {
        readable: probe_readable(path, metadata),
        writable: !metadata.permissions().readonly() && mode & 0o200 != 0,
        executable: mode & 0o111 != 0,
    }
}

#[cfg(not(unix))]
fn permissions_of(path: &Path, metadata: &Metadata) -> EntryPermissions {
    let executable = path
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "exe" | "bat" | "cmd" | "com")
        })
        .unwrap_or(false);

    EntryPermissions {
        readable: probe_readable(path, metadata),
        writable: !metadata.permissions().readonly(),
        executable: executable || metadata.is_dir(),
    }
}

fn probe_readable(path: &Path, metadata: &Metadata) -> bool {
    if metadata.is_dir() {
        std::fs::read_dir(path).is_ok()
    } else if metadata.file_type().is_symlink() {
        true
    } else {
        std::fs::File::open(path).is_ok()
    }
}
