mod common;

use astrum::clipboard::{ClipboardManager, ClipboardMode, PasteOutcome};
use astrum::core::ConfirmKind;
use astrum::error::FileError;
use common::{manager_at, populate_home, ScriptedUi};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_paste_with_empty_clipboard() {
    let temp_dir = tempdir().unwrap();
    populate_home(temp_dir.path());
    let mut manager = manager_at(temp_dir.path());
    let mut ui = ScriptedUi::default();

    let result = manager.paste(&mut ui);
    assert!(matches!(result, Err(FileError::InvalidInput { .. })));
    assert_eq!(ui.errors.len(), 1);
    assert!(ui.confirmations.is_empty());
    assert_eq!(manager.item_count_label(false), "Items: 4");
}

#[test]
fn test_cut_and_paste_moves_file() {
    let temp_dir = tempdir().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    fs::write(a.join("f.txt"), "payload").unwrap();

    let mut manager = manager_at(&a);
    manager.cut(&a.join("f.txt"));
    manager.navigate_to(&b);
    let mut ui = ScriptedUi::default();

    let outcome = manager.paste(&mut ui).expect("paste");
    assert_eq!(
        outcome,
        PasteOutcome::Pasted {
            destination: b.join("f.txt"),
            mode: ClipboardMode::Cut,
            report: Default::default(),
        }
    );
    assert!(!a.join("f.txt").exists());
    assert_eq!(fs::read_to_string(b.join("f.txt")).unwrap(), "payload");
    assert!(manager.clipboard().is_none());
    assert_eq!(manager.item_count_label(false), "Items: 1");
}

#[test]
fn test_copy_paste_is_repeatable() {
    let temp_dir = tempdir().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    let c = temp_dir.path().join("c");
    for dir in [&a, &b, &c] {
        fs::create_dir(dir).unwrap();
    }
    fs::write(a.join("f.txt"), "payload").unwrap();

    let mut manager = manager_at(&a);
    manager.copy(&a.join("f.txt"));
    let mut ui = ScriptedUi::default();

    manager.navigate_to(&b);
    manager.paste(&mut ui).expect("first paste");
    manager.navigate_to(&c);
    manager.paste(&mut ui).expect("second paste");

    assert!(a.join("f.txt").exists());
    assert!(b.join("f.txt").exists());
    assert!(c.join("f.txt").exists());
    let state = manager.clipboard().expect("clipboard kept");
    assert_eq!(state.mode, ClipboardMode::Copy);
}

#[test]
fn test_recursive_copy_reproduces_tree() {
    let temp_dir = tempdir().unwrap();
    let source = temp_dir.path().join("album");
    let dest = temp_dir.path().join("backup");
    fs::create_dir_all(source.join("disc1")).unwrap();
    fs::create_dir_all(source.join("disc2").join("bonus")).unwrap();
    fs::create_dir(&dest).unwrap();
    let files = [
        "cover.jpg",
        "disc1/01.flac",
        "disc1/02.flac",
        "disc2/01.flac",
        "disc2/bonus/live.flac",
    ];
    for file in files {
        fs::write(source.join(file), file).unwrap();
    }

    let mut manager = manager_at(&dest);
    manager.copy(&source);
    let mut ui = ScriptedUi::default();
    let outcome = manager.paste(&mut ui).expect("paste");

    match outcome {
        PasteOutcome::Pasted { report, .. } => {
            assert_eq!(report.files, files.len());
            assert_eq!(report.directories, 4);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    for file in files {
        assert_eq!(fs::read_to_string(dest.join("album").join(file)).unwrap(), file);
    }
}

#[test]
fn test_overwrite_declined_leaves_everything() {
    let temp_dir = tempdir().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    fs::write(a.join("f.txt"), "new").unwrap();
    fs::write(b.join("f.txt"), "old").unwrap();

    let mut manager = manager_at(&b);
    manager.cut(&a.join("f.txt"));
    let mut ui = ScriptedUi::answering(&[false]);

    let outcome = manager.paste(&mut ui).expect("paste");
    assert!(matches!(outcome, PasteOutcome::Declined { .. }));
    assert_eq!(ui.confirmations.len(), 1);
    assert_eq!(ui.confirmations[0].1, ConfirmKind::Overwrite);
    assert!(ui.confirmations[0].0.contains("f.txt"));
    assert_eq!(fs::read_to_string(b.join("f.txt")).unwrap(), "old");
    assert!(a.join("f.txt").exists());
    assert!(manager.clipboard().is_some());
}

#[test]
fn test_overwrite_confirmed_replaces_file() {
    let temp_dir = tempdir().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    fs::write(a.join("f.txt"), "new").unwrap();
    fs::write(b.join("f.txt"), "old").unwrap();

    let mut manager = manager_at(&b);
    manager.copy(&a.join("f.txt"));
    let mut ui = ScriptedUi::answering(&[true]);

    manager.paste(&mut ui).expect("paste");
    assert_eq!(fs::read_to_string(b.join("f.txt")).unwrap(), "new");
}

#[test]
fn test_vanished_source_clears_clipboard() {
    let temp_dir = tempdir().unwrap();
    let source = temp_dir.path().join("temp.log");
    fs::write(&source, "x").unwrap();

    let mut manager = manager_at(temp_dir.path());
    manager.copy(&source);
    fs::remove_file(&source).unwrap();

    let mut ui = ScriptedUi::default();
    let result = manager.paste(&mut ui);
    assert!(matches!(result, Err(FileError::NotFound { .. })));
    assert!(manager.clipboard().is_none());
    assert!(ui.errors[0].contains("temp.log"));
}

#[test]
fn test_partial_copy_keeps_copied_files() {
    let temp_dir = tempdir().unwrap();
    let source = temp_dir.path().join("src");
    let dest = temp_dir.path().join("dst");
    fs::create_dir(&source).unwrap();
    for name in ["1.txt", "2.txt", "3.txt", "4.txt"] {
        fs::write(source.join(name), name).unwrap();
    }
    // 3番目のファイル位置をディレクトリで塞ぐ
    fs::create_dir_all(dest.join("3.txt")).unwrap();

    let result = astrum::file::copy_directory(&source, &dest);
    assert!(matches!(
        result,
        Err(FileError::PartialFailure { completed: 2, .. })
    ));
    assert!(dest.join("1.txt").is_file());
    assert!(dest.join("2.txt").is_file());
    assert!(!dest.join("4.txt").exists());
}

#[test]
fn test_clipboard_without_facade() {
    let temp_dir = tempdir().unwrap();
    let source = temp_dir.path().join("note.md");
    let target_dir = temp_dir.path().join("inbox");
    fs::write(&source, "# note").unwrap();
    fs::create_dir(&target_dir).unwrap();

    let mut clipboard = ClipboardManager::new();
    assert!(clipboard.is_empty());
    clipboard.cut(&source);

    let outcome = clipboard.paste(&target_dir, |_| unreachable!()).expect("paste");
    assert!(matches!(outcome, PasteOutcome::Pasted { .. }));
    assert!(clipboard.is_empty());
}

#[cfg(unix)]
#[test]
fn test_partial_paste_refreshes_listing() {
    use std::os::unix::net::UnixListener;

    let temp_dir = tempdir().unwrap();
    let source = temp_dir.path().join("bundle");
    let dest = temp_dir.path().join("dest");
    fs::create_dir(&source).unwrap();
    fs::create_dir(&dest).unwrap();
    fs::write(source.join("a.txt"), "a").unwrap();
    // ソケットは内容をコピーできない
    let _listener = UnixListener::bind(source.join("b.sock")).unwrap();

    let mut manager = manager_at(&dest);
    manager.copy(&source);
    let mut ui = ScriptedUi::default();
    let result = manager.paste(&mut ui);

    assert!(matches!(
        result,
        Err(FileError::PartialFailure { completed: 1, .. })
    ));
    assert!(dest.join("bundle").join("a.txt").is_file());
    assert_eq!(manager.item_count_label(false), "Items: 1");
    assert!(ui.errors[0].contains("bundle"));
}

#[test]
fn test_paste_over_containing_folder_is_refused() {
    let temp_dir = tempdir().unwrap();
    let outer = temp_dir.path().join("x");
    let inner = outer.join("x");
    fs::create_dir_all(&inner).unwrap();
    fs::write(inner.join("data.txt"), "keep").unwrap();

    let mut manager = manager_at(&inner);
    manager.cut(&inner);
    manager.navigate_to(temp_dir.path());
    let mut ui = ScriptedUi::answering(&[true]);

    let result = manager.paste(&mut ui);
    assert!(matches!(result, Err(FileError::InvalidInput { .. })));
    assert!(ui.confirmations.is_empty());
    assert_eq!(fs::read_to_string(inner.join("data.txt")).unwrap(), "keep");
}

#[cfg(unix)]
#[test]
fn test_recursive_copy_keeps_directory_links() {
    let temp_dir = tempdir().unwrap();
    let source = temp_dir.path().join("src");
    let dest_dir = temp_dir.path().join("out");
    fs::create_dir_all(source.join("real")).unwrap();
    fs::write(source.join("real").join("a.txt"), "a").unwrap();
    std::os::unix::fs::symlink("real", source.join("alias")).unwrap();
    fs::create_dir(&dest_dir).unwrap();

    let mut manager = manager_at(&dest_dir);
    manager.copy(&source);
    let mut ui = ScriptedUi::default();
    manager.paste(&mut ui).expect("paste");

    let copied = dest_dir.join("src");
    assert!(fs::symlink_metadata(copied.join("alias")).unwrap().file_type().is_symlink());
    assert!(copied.join("alias").join("a.txt").is_file());
}
