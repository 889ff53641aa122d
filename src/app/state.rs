use super::context::AppContext;
use super::controller::Controller;
use super::mode::Mode;
use crate::entry::Entry;
use crate::ui::theme::Theme;
use std::time::{Duration, Instant};
use tracing::debug;

pub struct AppState {
    pub ctx: AppContext,
    pub cursor_position: usize,
    pub menu_cursor: usize,
    pub mode: Mode,
    pub edit_buffer: String,
    pub edit_cursor_pos: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    /// Blocking message; every other key is ignored until it is dismissed.
    pub notice: Option<String>,
    pub status_message: Option<(String, Instant)>,
    pub status_timeout: Duration,
}

impl AppState {
    pub fn new(mut ctx: AppContext, theme: Theme, status_timeout: Duration) -> Self {
        let notice = ctx.take_startup_notice();
        let mut state = Self {
            ctx,
            cursor_position: 0,
            menu_cursor: 0,
            mode: Mode::Navigate,
            edit_buffer: String::new(),
            edit_cursor_pos: 0,
            should_quit: false,
            show_help: false,
            theme,
            notice,
            status_message: None,
            status_timeout,
        };
        state.sync_selection();
        state
    }

    pub fn controller(&self) -> &Controller {
        self.ctx.controller()
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        self.ctx.controller_mut()
    }

    pub fn entries(&self) -> &[Entry] {
        self.ctx.controller().entries()
    }

    pub fn cursor_entry(&self) -> Option<&Entry> {
        self.entries().get(self.cursor_position)
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.sync_selection();
        }
    }

    pub fn move_cursor_down(&mut self) {
        let len = self.entries().len();
        if len > 0 && self.cursor_position < len - 1 {
            self.cursor_position += 1;
            self.sync_selection();
        }
    }

    pub fn move_cursor_to(&mut self, index: usize) {
        self.cursor_position = index;
        self.clamp_cursor();
    }

    /// Keep the cursor in range and the controller's selection on the row
    /// under it.
    pub fn clamp_cursor(&mut self) {
        let len = self.entries().len();
        if len > 0 {
            self.cursor_position = self.cursor_position.min(len - 1);
        } else {
            self.cursor_position = 0;
        }
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        match self.cursor_entry().map(|entry| entry.id) {
            Some(id) => {
                self.controller_mut().select_entry(id);
            }
            None => self.controller_mut().clear_selection(),
        }
    }

    pub fn move_menu_cursor_up(&mut self) {
        self.menu_cursor = self.menu_cursor.saturating_sub(1);
    }

    pub fn move_menu_cursor_down(&mut self) {
        let len = self.ctx.menu().len();
        if len > 0 && self.menu_cursor < len - 1 {
            self.menu_cursor += 1;
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn clear_expired_status_message(&mut self) {
        let expired = matches!(
            &self.status_message,
            Some((_, since)) if since.elapsed() >= self.status_timeout
        );
        if expired {
            self.status_message = None;
        }
    }

    /// Surface background save failures in the status bar.
    pub fn check_save_errors(&mut self) {
        let errors = self.ctx.drain_save_errors();
        if let Some(last) = errors.last() {
            debug!(count = errors.len(), "Save errors reported");
            self.set_status(format!("Save failed: {last}"));
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn reset_edit_buffer(&mut self) {
        self.edit_buffer.clear();
        self.edit_cursor_pos = 0;
    }
}
