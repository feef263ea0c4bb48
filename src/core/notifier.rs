//! 一覧変更通知
//!
//! ナビゲーション・更新・フィルタ変更・ファイル操作の後に一覧の状態を配信する

use std::collections::HashMap;
use std::path::PathBuf;

/// リスナーの一意識別子
pub type ListenerId = usize;

/// 一覧変更イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingChanged {
    /// 現在のディレクトリ
    pub path: PathBuf,
    /// フィルタ前の件数（"No access" は含まない）
    pub total: usize,
    /// 表示中の件数
    pub visible: usize,
    pub filtered: bool,
}

/// 一覧変更リスナー
pub trait ListingListener {
    fn on_listing_changed(&mut self, event: &ListingChanged);

    /// 高い値ほど先に呼ばれる
    fn priority(&self) -> i32 {
        0
    }
}

/// 任意のクロージャをリスナーとして使う
impl<F> ListingListener for F
where
    F: FnMut(&ListingChanged),
{
    fn on_listing_changed(&mut self, event: &ListingChanged) {
        self(event)
    }
}

/// 配信統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifierStats {
    pub listeners: usize,
    pub events_dispatched: usize,
}

/// リスナー管理と配信
#[derive(Default)]
pub struct ListingNotifier {
    listeners: HashMap<ListenerId, (Box<dyn ListingListener>, i32)>,
    next_listener_id: ListenerId,
    stats: NotifierStats,
}

impl ListingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Box<dyn ListingListener>) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        let priority = listener.priority();
        self.listeners.insert(id, (listener, priority));
        self.stats.listeners = self.listeners.len();
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(&id).is_some();
        self.stats.listeners = self.listeners.len();
        removed
    }

    pub fn notify(&mut self, event: &ListingChanged) {
        let mut sorted: Vec<_> = self.listeners.iter_mut().collect();
        // 優先度の降順、同順位は登録順
        sorted.sort_by(|a, b| b.1 .1.cmp(&a.1 .1).then(a.0.cmp(b.0)));

        for (_, (listener, _)) in sorted {
            listener.on_listing_changed(event);
        }
        self.stats.events_dispatched += 1;
    }

    pub fn stats(&self) -> &NotifierStats {
        &self.stats
    }
}

impl std::fmt::Debug for ListingNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingNotifier")
            .field("stats", &self.stats)
            .finish()
    }
}
