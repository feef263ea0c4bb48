//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能と件数表示

pub mod minibuffer;
pub mod renderer;
pub mod status;
pub mod view;

// 公開API
pub use minibuffer::{MinibufferRenderer, MinibufferState};
pub use renderer::{ListingRenderer, ScreenAreas};
pub use status::ItemCounter;
pub use view::{ListingRow, ListingView};
