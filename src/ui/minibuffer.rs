//! ミニバッファ描画
//!
//! 画面最下行のプロンプト・確認・メッセージ表示

use crate::error::{ErrorDisplay, ErrorLevel};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// ミニバッファの状態
#[derive(Debug, Clone)]
pub enum MinibufferState {
    /// 何も表示しない
    Normal,
    /// 文字列入力
    Prompt { message: String, input: String },
    /// y/n 確認
    Confirm { message: String },
    /// 一定時間で消えるメッセージ
    Message(ErrorDisplay),
}

/// ミニバッファ描画器
#[derive(Debug)]
pub struct MinibufferRenderer {
    state: MinibufferState,
}

impl MinibufferRenderer {
    pub fn new() -> Self {
        Self {
            state: MinibufferState::Normal,
        }
    }

    pub fn set_prompt(&mut self, message: impl Into<String>, input: impl Into<String>) {
        self.state = MinibufferState::Prompt {
            message: message.into(),
            input: input.into(),
        };
    }

    pub fn set_confirm(&mut self, message: impl Into<String>) {
        self.state = MinibufferState::Confirm {
            message: message.into(),
        };
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.state = MinibufferState::Message(ErrorDisplay::with_message(text, ErrorLevel::Info));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.state = MinibufferState::Message(ErrorDisplay::with_message(text, ErrorLevel::Error));
    }

    pub fn clear(&mut self) {
        self.state = MinibufferState::Normal;
    }

    /// 表示期限を過ぎたメッセージを消す
    pub fn expire(&mut self) {
        if let MinibufferState::Message(display) = &self.state {
            if display.is_expired() {
                self.state = MinibufferState::Normal;
            }
        }
    }

    pub fn current_state(&self) -> &MinibufferState {
        &self.state
    }

    pub fn is_prompting(&self) -> bool {
        matches!(self.state, MinibufferState::Prompt { .. })
    }

    pub fn prompt_input(&self) -> Option<&str> {
        match &self.state {
            MinibufferState::Prompt { input, .. } => Some(input),
            _ => None,
        }
    }

    pub fn append_to_prompt(&mut self, ch: char) {
        if let MinibufferState::Prompt { input, .. } = &mut self.state {
            input.push(ch);
        }
    }

    pub fn backspace_prompt(&mut self) -> bool {
        if let MinibufferState::Prompt { input, .. } = &mut self.state {
            return input.pop().is_some();
        }
        false
    }

    /// 描画してカーソル位置を返す（プロンプト時のみ）
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) -> Option<(u16, u16)> {
        let width = area.width as usize;
        let (text, style, cursor) = match &self.state {
            MinibufferState::Normal => (String::new(), Style::default(), false),
            MinibufferState::Prompt { message, input } => (
                format!("{} {}", message, input),
                Style::default().fg(Color::Cyan),
                true,
            ),
            MinibufferState::Confirm { message } => (
                format!("{} (y/n)", message),
                Style::default().fg(Color::Yellow),
                false,
            ),
            MinibufferState::Message(display) => {
                let color = match display.level {
                    ErrorLevel::Info => Color::Green,
                    ErrorLevel::Warning => Color::Yellow,
                    ErrorLevel::Error => Color::Red,
                };
                (display.message.clone(), Style::default().fg(color), false)
            }
        };

        // 入力中は末尾が見えるように左側を切る
        let shown = if cursor {
            truncate_left(&text, width.saturating_sub(1))
        } else {
            truncate_text(&text, width)
        };
        let cursor_x = area.x + (shown.width() as u16).min(area.width.saturating_sub(1));

        frame.render_widget(Paragraph::new(Line::from(shown)).style(style), area);
        cursor.then_some((cursor_x, area.y))
    }
}

impl Default for MinibufferRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// 表示幅に収まるよう末尾を切り詰める
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        result.push(ch);
        used += w;
    }
    result.push('…');
    result
}

/// 表示幅に収まるよう先頭を切り詰める
pub fn truncate_left(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut kept: Vec<char> = Vec::new();
    let mut used = 0;
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        kept.push(ch);
        used += w;
    }
    kept.into_iter().rev().collect()
}
