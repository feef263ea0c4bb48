//! フィルタ機能
//!
//! 名前・種類・サイズによる一覧の絞り込み

pub mod engine;
pub mod query;

pub use engine::FilterEngine;
pub use query::{Comparator, FilterMode, FilterQuery, SizeSpec, SizeUnit};
