//! ステータスラインの件数表示

use crate::file::entry::DirectoryEntry;
use std::path::Path;

/// 件数ラベルの生成
pub struct ItemCounter;

impl ItemCounter {
    /// "Items: N" または "Filtered: N"
    ///
    /// 対象ディレクトリが存在しない場合はモードに関係なく "Items: 0"。
    /// "No access" の合成エントリは数えない
    pub fn count(dir: &Path, entries: &[DirectoryEntry], filtered: bool) -> String {
        if !dir.is_dir() {
            return "Items: 0".to_string();
        }

        let count = entries.iter().filter(|entry| !entry.synthetic).count();
        if filtered {
            format!("Filtered: {}", count)
        } else {
            format!("Items: {}", count)
        }
    }
}
