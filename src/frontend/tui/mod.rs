//! ターミナルフロントエンド
//!
//! crossterm でキー入力を受け、ratatui で一覧画面を描画する

pub mod keymap;

use crate::core::{Activation, ConfirmKind, FileManager, UserInterface};
use crate::error::{AstrumError, ErrorDisplay, Result, UiError};
use crate::file::entry::DirectoryEntry;
use crate::file::properties::EntryProperties;
use crate::filter::{FilterMode, FilterQuery};
use crate::ui::{ListingRenderer, ListingView, MinibufferRenderer};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use keymap::{action_for, Action};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::Duration;

pub struct TuiApplication {
    manager: FileManager,
    renderer: ListingRenderer,
    minibuffer: MinibufferRenderer,
    selected: usize,
    bookmark_cursor: usize,
    properties: Option<EntryProperties>,
    running: bool,
}

impl TuiApplication {
    pub fn new(manager: FileManager) -> Self {
        Self {
            manager,
            renderer: ListingRenderer::new(),
            minibuffer: MinibufferRenderer::new(),
            selected: 0,
            bookmark_cursor: 0,
            properties: None,
            running: true,
        }
    }

    pub fn manager(&self) -> &FileManager {
        &self.manager
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            self.minibuffer.expire();
            self.render(terminal)?;

            if event::poll(Duration::from_millis(250)).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.handle_key_event(terminal, key_event),
                    Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
        }

        Ok(())
    }

    fn view(&self) -> ListingView {
        ListingView::capture(&self.manager, self.selected).with_properties(self.properties.clone())
    }

    fn render<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = self.view();
        self.renderer
            .render(terminal, &view, &self.minibuffer)
            .map_err(|err| terminal_error("render", err))
    }

    /// 選択中のエントリ（"No access" は除く）
    fn selected_entry(&self) -> Option<DirectoryEntry> {
        self.manager
            .entries()
            .get(self.selected)
            .filter(|entry| !entry.synthetic)
            .cloned()
    }

    fn clamp_selection(&mut self) {
        let len = self.manager.entries().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn handle_key_event<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>, key_event: KeyEvent) {
        if key_event.kind == KeyEventKind::Release {
            return;
        }
        // プロパティ表示中は任意のキーで閉じる
        if self.properties.take().is_some() {
            return;
        }
        let Some(action) = action_for(&key_event) else {
            return;
        };

        let page = terminal
            .size()
            .map(|size| size.height.saturating_sub(4).max(1) as usize)
            .unwrap_or(10);
        let len = self.manager.entries().len();

        match action {
            Action::MoveUp => self.selected = self.selected.saturating_sub(1),
            Action::MoveDown => self.selected = (self.selected + 1).min(len.saturating_sub(1)),
            Action::PageUp => self.selected = self.selected.saturating_sub(page),
            Action::PageDown => self.selected = (self.selected + page).min(len.saturating_sub(1)),
            Action::Home => self.selected = 0,
            Action::End => self.selected = len.saturating_sub(1),
            Action::Activate => self.activate_selected(),
            Action::GoUp => self.after_navigation(|manager| manager.go_up()),
            Action::GoBack => self.after_navigation(|manager| manager.go_back()),
            Action::GoForward => {
                self.manager.go_forward();
                self.minibuffer.set_message("No forward history");
            }
            Action::Copy | Action::Cut => {
                if let Some(entry) = self.selected_entry() {
                    if action == Action::Copy {
                        self.manager.copy(&entry.path);
                        self.minibuffer.set_message(format!("Copied {}", entry.name));
                    } else {
                        self.manager.cut(&entry.path);
                        self.minibuffer.set_message(format!("Cut {}", entry.name));
                    }
                }
            }
            Action::Paste => {
                let view = self.view();
                let mut ui = TerminalInterface::new(terminal, &mut self.renderer, &mut self.minibuffer, view);
                if let Err(e) = self.manager.paste(&mut ui) {
                    log::debug!("paste failed: {}", e);
                }
            }
            Action::NewFolder => {
                let view = self.view();
                let mut ui = TerminalInterface::new(terminal, &mut self.renderer, &mut self.minibuffer, view);
                if let Ok(Some(created)) = self.manager.create_folder(&mut ui) {
                    self.select_path(&created);
                }
            }
            Action::Delete => {
                if let Some(entry) = self.selected_entry() {
                    let view = self.view();
                    let mut ui = TerminalInterface::new(terminal, &mut self.renderer, &mut self.minibuffer, view);
                    if let Ok(true) = self.manager.delete(&entry.path, &mut ui) {
                        self.minibuffer.set_message(format!("Deleted {}", entry.name));
                    }
                }
            }
            Action::Rename => {
                if let Some(entry) = self.selected_entry() {
                    let view = self.view();
                    let mut ui = TerminalInterface::new(terminal, &mut self.renderer, &mut self.minibuffer, view);
                    if let Ok(Some(renamed)) = self.manager.rename(&entry.path, &mut ui) {
                        self.select_path(&renamed);
                    }
                }
            }
            Action::Properties => {
                if let Some(entry) = self.selected_entry() {
                    match self.manager.properties(&entry.path) {
                        Ok(properties) => self.properties = Some(properties),
                        Err(e) => self
                            .minibuffer
                            .set_error(ErrorDisplay::new(&AstrumError::File(e)).message),
                    }
                }
            }
            Action::OpenContainingFolder => {
                if let Some(entry) = self.selected_entry() {
                    self.after_navigation(|manager| manager.open_containing_folder(&entry.path));
                }
            }
            Action::Filter(mode) => self.prompt_filter(terminal, mode),
            Action::ClearFilter => {
                self.manager.clear_filter();
                self.clamp_selection();
            }
            Action::ToggleHidden => {
                let show = !self.manager.show_hidden();
                self.manager.set_show_hidden(show);
                self.clamp_selection();
            }
            Action::Refresh => {
                self.manager.refresh();
                self.clamp_selection();
            }
            Action::NextBookmark => self.next_bookmark(),
            Action::Quit => self.running = false,
        }
        self.clamp_selection();
    }

    fn activate_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        match self.manager.activate(&entry.path) {
            Ok(Activation::Navigated { .. }) => self.selected = 0,
            Ok(Activation::OpenFile(path)) => {
                log::info!("open requested for {}", path.display());
                self.minibuffer
                    .set_message(format!("{}: opening files is left to the desktop", entry.name));
            }
            Err(e) => self
                .minibuffer
                .set_error(ErrorDisplay::new(&AstrumError::File(e)).message),
        }
    }

    fn after_navigation(&mut self, navigate: impl FnOnce(&mut FileManager) -> bool) {
        let previous = self.manager.current_path().to_path_buf();
        navigate(&mut self.manager);
        if self.manager.current_path() != previous {
            // 元いたディレクトリを選択状態にする
            self.selected = 0;
            self.select_path(&previous);
        }
    }

    fn select_path(&mut self, path: &std::path::Path) {
        if let Some(index) = self.manager.entries().iter().position(|entry| entry.path == path) {
            self.selected = index;
        }
    }

    fn prompt_filter<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>, mode: FilterMode) {
        let current = self
            .manager
            .active_filter()
            .filter(|query| query.mode == mode)
            .map(|query| query.raw_text.clone())
            .unwrap_or_default();
        let placeholder = match mode {
            FilterMode::Name => "Name contains:",
            FilterMode::Type => "Extension or folder:",
            FilterMode::Size => "Size (e.g. >1MB):",
        };

        let view = self.view();
        let mut ui = TerminalInterface::new(terminal, &mut self.renderer, &mut self.minibuffer, view);
        if let Some(text) = ui.prompt_text("Filter", placeholder, &current) {
            self.manager.set_filter(FilterQuery::new(text, mode));
            self.selected = 0;
        }
    }

    fn next_bookmark(&mut self) {
        let count = self.manager.bookmarks().len();
        if count == 0 {
            self.minibuffer.set_message("No bookmarks configured");
            return;
        }

        let index = self.bookmark_cursor % count;
        self.bookmark_cursor = index + 1;
        let name = self.manager.bookmarks()[index].name.clone();
        match self.manager.open_bookmark(index) {
            Ok(_) => {
                self.selected = 0;
                self.minibuffer.set_message(format!("Bookmark: {}", name));
            }
            Err(e) => self
                .minibuffer
                .set_error(ErrorDisplay::new(&AstrumError::File(e)).message),
        }
    }
}

/// ミニバッファで確認・入力を行う `UserInterface` 実装
struct TerminalInterface<'a, B: ratatui::backend::Backend> {
    terminal: &'a mut Terminal<B>,
    renderer: &'a mut ListingRenderer,
    minibuffer: &'a mut MinibufferRenderer,
    view: ListingView,
}

impl<'a, B: ratatui::backend::Backend> TerminalInterface<'a, B> {
    fn new(
        terminal: &'a mut Terminal<B>,
        renderer: &'a mut ListingRenderer,
        minibuffer: &'a mut MinibufferRenderer,
        view: ListingView,
    ) -> Self {
        Self {
            terminal,
            renderer,
            minibuffer,
            view,
        }
    }

    fn redraw(&mut self) {
        if let Err(e) = self.renderer.render(&mut *self.terminal, &self.view, &*self.minibuffer) {
            log::error!("render failed during prompt: {}", e);
        }
    }

    /// 押下イベントを一つ待つ（読み取りに失敗したら None）
    fn read_key(&mut self) -> Option<KeyEvent> {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => return Some(key),
                Ok(Event::Resize(_, _)) => self.redraw(),
                Ok(_) => {}
                Err(e) => {
                    log::error!("event read failed during prompt: {}", e);
                    return None;
                }
            }
        }
    }
}

impl<'a, B: ratatui::backend::Backend> UserInterface for TerminalInterface<'a, B> {
    fn confirm(&mut self, message: &str, kind: ConfirmKind) -> bool {
        log::debug!("confirm {:?}: {}", kind, message);
        self.minibuffer.set_confirm(message);

        let answer = loop {
            self.redraw();
            let Some(key) = self.read_key() else {
                break false;
            };
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => break true,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => break false,
                KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => break false,
                _ => {}
            }
        };

        self.minibuffer.clear();
        answer
    }

    fn prompt_text(&mut self, title: &str, placeholder: &str, default_value: &str) -> Option<String> {
        self.minibuffer
            .set_prompt(format!("[{}] {}", title, placeholder), default_value);

        let result = loop {
            self.redraw();
            let Some(key) = self.read_key() else {
                break None;
            };
            match key.code {
                KeyCode::Enter => break self.minibuffer.prompt_input().map(str::to_string),
                KeyCode::Esc => break None,
                KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => break None,
                KeyCode::Backspace => {
                    self.minibuffer.backspace_prompt();
                }
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.minibuffer.append_to_prompt(ch);
                }
                _ => {}
            }
        };

        self.minibuffer.clear();
        result
    }

    fn notify_error(&mut self, message: &str) {
        self.minibuffer.set_error(message);
    }

    fn notify_info(&mut self, message: &str) {
        self.minibuffer.set_message(message);
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_init_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_init_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_init_error(context: &str, err: impl std::fmt::Display) -> AstrumError {
    AstrumError::Ui(UiError::TerminalInit {
        message: format!("{}: {}", context, err),
    })
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> AstrumError {
    AstrumError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
