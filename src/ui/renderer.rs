//! 画面描画
//!
//! パスバー・一覧・ステータスライン・ミニバッファの4領域を描く

use crate::file::properties::EntryProperties;
use crate::ui::minibuffer::{truncate_left, truncate_text, MinibufferRenderer};
use crate::ui::view::{ListingRow, ListingView};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use unicode_width::UnicodeWidthStr;

/// サイズ列と日時列の幅
const SIZE_COLUMN: usize = 12;
const DATE_COLUMN: usize = 19;

/// 画面領域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub path_bar: Rect,
    pub listing: Rect,
    pub status_line: Rect,
    pub minibuffer: Rect,
}

impl ScreenAreas {
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        Self {
            path_bar: chunks[0],
            listing: chunks[1],
            status_line: chunks[2],
            minibuffer: chunks[3],
        }
    }
}

/// 一覧画面のレンダラー
#[derive(Debug, Default)]
pub struct ListingRenderer {
    list_state: ListState,
}

impl ListingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        view: &ListingView,
        minibuffer: &MinibufferRenderer,
    ) -> io::Result<()> {
        terminal.draw(|frame| self.render_frame(frame, view, minibuffer))?;
        Ok(())
    }

    fn render_frame(&mut self, frame: &mut Frame<'_>, view: &ListingView, minibuffer: &MinibufferRenderer) {
        let areas = ScreenAreas::calculate(frame.area());

        let path = truncate_left(&view.path_label, areas.path_bar.width as usize);
        frame.render_widget(
            Paragraph::new(path).style(Style::default().add_modifier(Modifier::BOLD)),
            areas.path_bar,
        );

        let width = areas.listing.width as usize;
        let items: Vec<ListItem> = view
            .rows
            .iter()
            .map(|row| ListItem::new(row_line(row, width)).style(row_style(row)))
            .collect();
        self.list_state.select(view.selected);
        let list = List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, areas.listing, &mut self.list_state);

        let status = status_text(view, areas.status_line.width as usize);
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::Black).bg(Color::Gray)),
            areas.status_line,
        );

        if let Some(properties) = &view.properties {
            render_properties(frame, areas.listing, properties);
        }

        if let Some((x, y)) = minibuffer.render(frame, areas.minibuffer) {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

fn row_style(row: &ListingRow) -> Style {
    if row.synthetic {
        Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC)
    } else if row.is_dir {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// 名前・サイズ・更新日時を一行に並べる（狭い場合は名前のみ）
pub fn row_line(row: &ListingRow, width: usize) -> String {
    let columns = SIZE_COLUMN + DATE_COLUMN + 2;
    if width <= columns + 8 {
        return truncate_text(&row.name, width);
    }

    let name_width = width - columns;
    let name = truncate_text(&row.name, name_width);
    let padding = name_width.saturating_sub(name.width());
    format!(
        "{}{} {:>size$} {:<date$}",
        name,
        " ".repeat(padding),
        row.size,
        row.modified,
        size = SIZE_COLUMN,
        date = DATE_COLUMN
    )
}

/// ステータスライン（件数・フィルタ・クリップボード）
pub fn status_text(view: &ListingView, width: usize) -> String {
    let mut parts = vec![view.count_label.clone()];
    if let Some(filter) = &view.filter_label {
        parts.push(format!("[{}]", filter));
    }
    if let Some(clipboard) = &view.clipboard_label {
        parts.push(clipboard.clone());
    }
    truncate_text(&format!(" {}", parts.join("  ")), width)
}

/// プロパティ表示の各行
pub fn properties_lines(properties: &EntryProperties) -> Vec<(&'static str, String)> {
    vec![
        ("Name", properties.name.clone()),
        ("Type", properties.type_description.clone()),
        ("Location", properties.location.clone()),
        ("Size", properties.size.clone()),
        ("Created", properties.created.clone()),
        ("Modified", properties.modified.clone()),
        ("Accessed", properties.accessed.clone()),
        ("Permissions", properties.permissions.clone()),
    ]
}

fn render_properties(frame: &mut Frame<'_>, area: Rect, properties: &EntryProperties) {
    let lines: Vec<Line> = properties_lines(properties)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", label), Style::default().fg(Color::Cyan)),
                Span::raw(value),
            ])
        })
        .collect();

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = area.width.saturating_sub(4).min(72);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Properties ")),
        popup,
    );
}
