//! パス処理ユーティリティ
//!
//! パスの展開、正規化、エントリ名の検証

use crate::error::{file::Result, FileError};
use std::env;
use std::path::{Component, Path, PathBuf};

/// パス展開の便利関数（~ と環境変数を展開し、絶対パス化）
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FileError::invalid_input("path is empty"));
    }

    let expanded = shellexpand::full(trimmed).map_err(|e| {
        FileError::invalid_input(format!("cannot expand {}: {}", trimmed, e))
    })?;

    let absolute = to_absolute(Path::new(expanded.as_ref()))?;
    Ok(normalize_path(&absolute))
}

/// 相対パスを絶対パスに変換
pub fn to_absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = env::current_dir().map_err(|e| FileError::Io {
            path: path.display().to_string(),
            message: format!("current directory unavailable: {}", e),
        })?;
        Ok(current_dir.join(path))
    }
}

/// パスを字句的に正規化（. や .. を解決、ルートより上には出ない）
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => {
                // ルートでは pop が false を返すだけ
                result.pop();
            }
            other => result.push(other),
        }
    }

    if result.as_os_str().is_empty() {
        result.push(Component::CurDir);
    }

    result
}

/// 親ディレクトリを取得（ルートでは None）
pub fn parent_of(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// 表示用のエントリ名
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.display().to_string(),
    }
}

/// 新しいエントリ名として使えるか
///
/// 空文字、`.`/`..`、区切り文字や NUL を含む名前は拒否する
pub fn is_valid_entry_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }

    !name
        .chars()
        .any(|ch| ch == '/' || ch == '\0' || std::path::is_separator(ch))
}

/// ファイル拡張子（小文字化しない）
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|ext| ext.to_string_lossy().to_string())
}
