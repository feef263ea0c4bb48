//! キーバインド
//!
//! 一覧画面でのキー入力をアクションへ変換

use crate::filter::FilterMode;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// 一覧画面のアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    Activate,
    GoUp,
    GoBack,
    GoForward,
    Copy,
    Cut,
    Paste,
    NewFolder,
    Delete,
    Rename,
    Properties,
    OpenContainingFolder,
    Filter(FilterMode),
    ClearFilter,
    ToggleHidden,
    Refresh,
    NextBookmark,
    Quit,
}

/// キーイベントをアクションへ変換（割り当てのないキーは None）
pub fn action_for(event: &KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('h') => Some(Action::ToggleHidden),
            _ => None,
        };
    }

    let action = match event.code {
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Enter | KeyCode::Right => Action::Activate,
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('u') => Action::GoUp,
        KeyCode::Char('h') => Action::GoBack,
        KeyCode::Char('l') => Action::GoForward,
        KeyCode::Char('c') => Action::Copy,
        KeyCode::Char('x') => Action::Cut,
        KeyCode::Char('v') => Action::Paste,
        KeyCode::Char('n') => Action::NewFolder,
        KeyCode::Char('d') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('r') => Action::Rename,
        KeyCode::Char('i') => Action::Properties,
        KeyCode::Char('o') => Action::OpenContainingFolder,
        KeyCode::Char('/') => Action::Filter(FilterMode::Name),
        KeyCode::Char('t') => Action::Filter(FilterMode::Type),
        KeyCode::Char('s') => Action::Filter(FilterMode::Size),
        KeyCode::Esc => Action::ClearFilter,
        KeyCode::Char('.') => Action::ToggleHidden,
        KeyCode::F(5) => Action::Refresh,
        KeyCode::Char('b') => Action::NextBookmark,
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_basic_bindings() {
        assert_eq!(action_for(&key(KeyCode::Enter)), Some(Action::Activate));
        assert_eq!(action_for(&key(KeyCode::Backspace)), Some(Action::GoUp));
        assert_eq!(action_for(&key(KeyCode::Char('v'))), Some(Action::Paste));
        assert_eq!(
            action_for(&key(KeyCode::Char('s'))),
            Some(Action::Filter(FilterMode::Size))
        );
        assert_eq!(action_for(&key(KeyCode::F(5))), Some(Action::Refresh));
        assert_eq!(action_for(&key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_bindings() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&ctrl_c), Some(Action::Quit));
    }
}
