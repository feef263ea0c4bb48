//! 再帰コピーと再帰削除
//!
//! 深さ優先（各ディレクトリでファイルを先に、次にサブディレクトリ）。
//! 途中で失敗した場合は処理済みのエントリをそのまま残す（ロールバックなし）。
//! ツリー内のディレクトリへのリンクとリンク切れはリンクとして再作成する。

use crate::error::{file::Result, FileError};
use std::fs;
use std::path::{Path, PathBuf};

/// コピー結果の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub files: usize,
    pub directories: usize,
    /// 再作成したシンボリックリンク
    pub links: usize,
}

/// 削除結果の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveReport {
    pub removed: usize,
}

/// 単一ファイルをコピー
pub fn copy_file(source: &Path, dest: &Path) -> Result<CopyReport> {
    fs::copy(source, dest).map_err(|e| {
        log::warn!("copy {} -> {} failed: {}", source.display(), dest.display(), e);
        FileError::from_io(&e, source)
    })?;
    Ok(CopyReport {
        files: 1,
        ..CopyReport::default()
    })
}

/// ディレクトリを再帰的にコピー
///
/// 最初に失敗したファイル／ディレクトリで中断し `PartialFailure` を返す
pub fn copy_directory(source: &Path, dest: &Path) -> Result<CopyReport> {
    if !source.is_dir() {
        return Err(FileError::NotFound {
            path: source.display().to_string(),
        });
    }
    if dest.starts_with(source) || resolved_inside(dest, source) {
        return Err(FileError::invalid_input(format!(
            "cannot copy {} into itself",
            source.display()
        )));
    }

    let mut report = CopyReport::default();
    let mut stack: Vec<(PathBuf, PathBuf)> = vec![(source.to_path_buf(), dest.to_path_buf())];

    while let Some((src_dir, dst_dir)) = stack.pop() {
        if !dst_dir.is_dir() {
            fs::create_dir(&dst_dir).map_err(|e| partial(&dst_dir, &report, &e))?;
            report.directories += 1;
        }

        let children = split_children(&src_dir).map_err(|e| partial(&src_dir, &report, &e))?;

        for file in children.files {
            let Some(name) = file.file_name() else { continue };
            let target = dst_dir.join(name);
            fs::copy(&file, &target).map_err(|e| partial(&file, &report, &e))?;
            report.files += 1;
        }

        for link in children.links {
            let Some(name) = link.file_name() else { continue };
            let target = dst_dir.join(name);
            copy_link(&link, &target).map_err(|e| partial(&link, &report, &e))?;
            report.links += 1;
        }

        // 逆順に積んで名前順に処理する
        for subdir in children.subdirs.into_iter().rev() {
            let Some(name) = subdir.file_name() else { continue };
            let target = dst_dir.join(name);
            stack.push((subdir, target));
        }
    }

    log::debug!(
        "copied {} file(s), {} director(ies), {} link(s) from {}",
        report.files,
        report.directories,
        report.links,
        source.display()
    );
    Ok(report)
}

/// リンクを解決したうえで `dest` が `source` の中にあるか
fn resolved_inside(dest: &Path, source: &Path) -> bool {
    let Ok(source) = fs::canonicalize(source) else {
        return false;
    };
    let resolved_dest = match (dest.parent(), dest.file_name()) {
        (Some(parent), Some(name)) => match fs::canonicalize(parent) {
            Ok(parent) => parent.join(name),
            Err(_) => return false,
        },
        _ => return false,
    };
    resolved_dest.starts_with(source)
}

/// ファイル・ディレクトリを削除（ディレクトリは再帰的に）
pub fn remove_entry(path: &Path) -> Result<RemoveReport> {
    let metadata = path
        .symlink_metadata()
        .map_err(|e| FileError::from_io(&e, path))?;

    if !metadata.is_dir() {
        fs::remove_file(path).map_err(|e| FileError::from_io(&e, path))?;
        return Ok(RemoveReport { removed: 1 });
    }

    remove_directory(path)
}

fn remove_directory(root: &Path) -> Result<RemoveReport> {
    let mut report = RemoveReport::default();
    // (パス, 子を展開済みか)
    let mut stack: Vec<(PathBuf, bool)> = vec![(root.to_path_buf(), false)];

    while let Some((dir, expanded)) = stack.pop() {
        if expanded {
            fs::remove_dir(&dir).map_err(|e| removal_error(&dir, &report, &e))?;
            report.removed += 1;
            continue;
        }

        stack.push((dir.clone(), true));

        let entries = fs::read_dir(&dir).map_err(|e| removal_error(&dir, &report, &e))?;
        for entry in entries {
            let entry = entry.map_err(|e| removal_error(&dir, &report, &e))?;
            let child = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| removal_error(&child, &report, &e))?;

            if file_type.is_dir() {
                stack.push((child, false));
            } else {
                fs::remove_file(&child).map_err(|e| removal_error(&child, &report, &e))?;
                report.removed += 1;
            }
        }
    }

    Ok(report)
}

/// ディレクトリ直下の子エントリ（それぞれ名前順）
#[derive(Debug, Default)]
struct Children {
    /// 通常ファイルとファイルへのリンク（内容をコピー）
    files: Vec<PathBuf>,
    /// リンクとして再作成するもの
    links: Vec<PathBuf>,
    subdirs: Vec<PathBuf>,
}

fn split_children(dir: &Path) -> std::io::Result<Children> {
    let mut children = Children::default();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            children.subdirs.push(path);
        } else if file_type.is_symlink() && !path.is_file() {
            // ディレクトリへのリンクは辿らない（循環防止）
            children.links.push(path);
        } else {
            children.files.push(path);
        }
    }

    children.files.sort();
    children.links.sort();
    children.subdirs.sort();
    Ok(children)
}

#[cfg(unix)]
fn copy_link(link: &Path, target: &Path) -> std::io::Result<()> {
    let destination = fs::read_link(link)?;
    std::os::unix::fs::symlink(destination, target)
}

#[cfg(windows)]
fn copy_link(link: &Path, target: &Path) -> std::io::Result<()> {
    let destination = fs::read_link(link)?;
    if link.is_dir() {
        std::os::windows::fs::symlink_dir(destination, target)
    } else {
        std::os::windows::fs::symlink_file(destination, target)
    }
}

#[cfg(not(any(unix, windows)))]
fn copy_link(link: &Path, _target: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("cannot recreate symbolic link {}", link.display()),
    ))
}

fn partial(path: &Path, report: &CopyReport, error: &std::io::Error) -> FileError {
    log::warn!("recursive copy stopped at {}: {}", path.display(), error);
    FileError::PartialFailure {
        path: path.display().to_string(),
        completed: report.files,
        message: error.to_string(),
    }
}

fn removal_error(path: &Path, report: &RemoveReport, error: &std::io::Error) -> FileError {
    log::warn!("recursive delete stopped at {}: {}", path.display(), error);
    if report.removed == 0 {
        FileError::from_io(error, path)
    } else {
        FileError::PartialFailure {
            path: path.display().to_string(),
            completed: report.removed,
            message: error.to_string(),
        }
    }
}
