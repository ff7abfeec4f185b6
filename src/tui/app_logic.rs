use super::app_state::View;
use crate::client::TreeStoreClient;
use crate::error::{Error, Result};
use crate::navigation::{NavigationController, Selection, Transition};
use crate::node::Node;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use tracing::warn;

const PAGE: usize = 10;

pub struct TuiApp<C> {
    pub(super) controller: NavigationController<C>,
    pub(super) view: View,
    pub(super) entries: Vec<Selection>,
    pub(super) list_state: ListState,
    pub(super) title: String,
    pub(super) file_lines: Vec<String>,
    pub(super) file_scroll: usize,
    pub(super) file_viewport_height: usize,
    pub(super) status: Option<String>,
    pub(super) quit: bool,
}

impl<C: TreeStoreClient> TuiApp<C> {
    pub fn new(controller: NavigationController<C>) -> Self {
        let mut app = TuiApp {
            controller,
            view: View::Browser,
            entries: Vec::new(),
            list_state: ListState::default(),
            title: String::new(),
            file_lines: Vec::new(),
            file_scroll: 0,
            file_viewport_height: 0, // Will be updated by ui_renderer
            status: None,
            quit: false,
        };
        app.load_listing();
        app
    }

    pub(super) fn load_listing(&mut self) {
        self.title = self.controller.current_path().to_string();
        self.entries.clear();
        if !self.controller.is_at_root() {
            self.entries.push(Selection::GoToParent);
        }
        let listing = self
            .controller
            .current_directory()
            .map(|dir| dir.nodes.clone());
        match listing {
            Ok(nodes) => self
                .entries
                .extend(nodes.into_iter().map(Selection::SelectChild)),
            Err(err) => self.report(err),
        }
        self.clamp_selection();
    }

    pub(super) fn load_file(&mut self) {
        self.title = self.controller.current_path().to_string();
        match self.controller.current_file().map(decode_lines) {
            Ok(lines) => self.file_lines = lines,
            Err(err) => {
                self.file_lines.clear();
                self.report(err);
            }
        }
        self.file_scroll = 0;
    }

    fn report(&mut self, err: Error) {
        warn!(%err, path = %self.controller.current_path(), "operation failed");
        self.status = Some(err.to_string());
    }

    /// Reacts to the transition a controller operation asked for.
    pub(super) fn apply(&mut self, outcome: Result<Transition>) {
        match outcome {
            Ok(Transition::Stay) => {
                self.list_state.select(Some(0));
                self.load_listing();
            }
            Ok(Transition::SwitchToFileView) => {
                self.view = View::File;
                self.load_file();
            }
            Ok(Transition::SwitchToBrowserView) => {
                self.view = View::Browser;
                self.list_state.select(Some(0));
                self.load_listing();
            }
            Ok(Transition::Terminate) => self.quit = true,
            Err(err) => self.report(err),
        }
    }

    pub(super) fn selected_entry(&self) -> Option<&Selection> {
        self.list_state
            .selected()
            .and_then(|idx| self.entries.get(idx))
    }

    pub(super) fn selected_node(&self) -> Option<&Node> {
        match self.selected_entry() {
            Some(Selection::SelectChild(node)) => Some(node),
            _ => None,
        }
    }

    fn clamp_selection(&mut self) {
        if self.entries.is_empty() {
            self.list_state.select(None);
        } else {
            let idx = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(idx.min(self.entries.len() - 1)));
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as i32;
        let next = match self.list_state.selected() {
            Some(pos) => (pos as i32 + delta).rem_euclid(len) as usize,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn open_selected(&mut self) {
        if let Some(selection) = self.selected_entry().cloned() {
            self.status = None;
            let outcome = self.controller.enter(&selection);
            self.apply(outcome);
        }
    }

    fn go_up(&mut self) {
        if self.controller.is_at_root() {
            return;
        }
        self.status = None;
        let outcome = self.controller.enter(&Selection::GoToParent);
        self.apply(outcome);
    }

    fn refresh(&mut self) {
        self.status = None;
        self.controller.refresh_current_directory();
        self.load_listing();
    }

    fn reload(&mut self) {
        match self.controller.reload_current_file().map(decode_lines) {
            Ok(lines) => {
                self.file_lines = lines;
                self.clamp_scroll();
                self.status = Some(format!(
                    "Reloaded at: {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
                ));
            }
            Err(err) => self.report(err),
        }
    }

    fn back_to_browser(&mut self) {
        self.status = None;
        let outcome = self.controller.go_back_to_browser();
        self.apply(outcome);
    }

    fn max_scroll(&self) -> usize {
        self.file_lines
            .len()
            .saturating_sub(self.file_viewport_height.max(1))
    }

    fn clamp_scroll(&mut self) {
        self.file_scroll = self.file_scroll.min(self.max_scroll());
    }

    fn scroll_by(&mut self, delta: isize) {
        self.file_scroll = self.file_scroll.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    // --- Event handling sub-methods ---
    pub(super) fn handle_browser_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.apply(Ok(Transition::Terminate)),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.open_selected(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.go_up(),
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }
    }

    pub(super) fn handle_file_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') => self.apply(Ok(Transition::Terminate)),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                self.back_to_browser()
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(PAGE as isize),
            KeyCode::PageUp => self.scroll_by(-(PAGE as isize)),
            KeyCode::Home | KeyCode::Char('g') => self.file_scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.file_scroll = self.max_scroll(),
            _ => {}
        }
    }
}

fn decode_lines(content: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(content)
        .lines()
        .map(str::to_owned)
        .collect()
}
