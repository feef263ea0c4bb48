//! UI境界
//!
//! コアが必要とする対話機能（確認・入力・通知）の抽象

/// 確認の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    /// 貼り付け先の上書き
    Overwrite,
    /// 削除
    Delete,
}

/// ホスト側が実装する対話インターフェース
pub trait UserInterface {
    /// はい／いいえの確認
    fn confirm(&mut self, message: &str, kind: ConfirmKind) -> bool;

    /// 文字列入力（キャンセル時は None）
    fn prompt_text(&mut self, title: &str, placeholder: &str, default_value: &str)
        -> Option<String>;

    fn notify_error(&mut self, message: &str);

    fn notify_info(&mut self, message: &str) {
        let _ = message;
    }
}

/// 対話なしで動かすための実装
///
/// 確認はすべて拒否、入力はすべてキャンセル扱い。通知はログへ流す
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessInterface;

impl UserInterface for HeadlessInterface {
    fn confirm(&mut self, message: &str, kind: ConfirmKind) -> bool {
        log::debug!("declined {:?} confirmation: {}", kind, message);
        false
    }

    fn prompt_text(&mut self, title: &str, _placeholder: &str, _default_value: &str) -> Option<String> {
        log::debug!("prompt '{}' cancelled", title);
        None
    }

    fn notify_error(&mut self, message: &str) {
        log::error!("{}", message);
    }

    fn notify_info(&mut self, message: &str) {
        log::info!("{}", message);
    }
}
