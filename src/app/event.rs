use super::mode::Mode;
use super::state::AppState;
use crate::utils::unicode::{next_char_boundary, prev_char_boundary};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    if state.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.dismiss_notice();
        }
        return Ok(());
    }

    if state.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            state.show_help = false;
        }
        return Ok(());
    }

    match state.mode {
        Mode::Navigate => handle_navigate_mode(key, state),
        Mode::AddTitle => handle_add_title_mode(key, state),
        Mode::EditContent => handle_edit_content_mode(key, state),
        Mode::Menu => handle_menu_mode(key, state),
    }
    Ok(())
}

fn handle_navigate_mode(key: KeyEvent, state: &mut AppState) {
    match (key.code, key.modifiers) {
        (KeyCode::Up, KeyModifiers::NONE) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
            state.move_cursor_up();
        }
        (KeyCode::Down, KeyModifiers::NONE) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
            state.move_cursor_down();
        }

        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Char('a'), KeyModifiers::NONE) => {
            state.reset_edit_buffer();
            state.mode = Mode::AddTitle;
        }

        (KeyCode::Char('i'), KeyModifiers::NONE) | (KeyCode::Enter, KeyModifiers::NONE) => {
            enter_edit_mode(state);
        }

        (KeyCode::Char('d'), KeyModifiers::NONE) => {
            delete_current_entry(state);
        }

        (KeyCode::Char('y'), KeyModifiers::NONE) | (KeyCode::Char('c'), KeyModifiers::NONE) => {
            copy_current_entry(state);
        }

        (KeyCode::Char('m'), KeyModifiers::NONE) => {
            if state.ctx.menu().is_empty() {
                state.set_status("Menu is empty");
            } else {
                state.menu_cursor = state.menu_cursor.min(state.ctx.menu().len() - 1);
                state.mode = Mode::Menu;
            }
        }

        (KeyCode::Char('?'), KeyModifiers::NONE) => {
            state.show_help = true;
        }

        (KeyCode::Char('q'), KeyModifiers::NONE) => {
            state.should_quit = true;
        }

        _ => {}
    }
}

fn handle_add_title_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.reset_edit_buffer();
            state.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let title = std::mem::take(&mut state.edit_buffer);
            state.edit_cursor_pos = 0;
            state.mode = Mode::Navigate;

            match state.controller_mut().add_entry(&title) {
                Some(_) => {
                    let last = state.entries().len().saturating_sub(1);
                    state.move_cursor_to(last);
                    state.set_status(format!("Added '{title}'"));
                }
                None if title.trim().is_empty() => {}
                None => state.set_status(format!("'{title}' already exists")),
            }
        }
        // Titles are single line.
        _ => edit_text(key, state, false),
    }
}

fn handle_edit_content_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.reset_edit_buffer();
            state.mode = Mode::Navigate;
        }
        KeyCode::Enter if !key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) => {
            let content = std::mem::take(&mut state.edit_buffer);
            state.edit_cursor_pos = 0;
            state.mode = Mode::Navigate;

            if let Some(id) = state.controller().selected()
                && state.controller_mut().edit_content(id, content)
            {
                state.set_status("Saved");
            }
        }
        _ => edit_text(key, state, true),
    }
}

fn handle_menu_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => {
            state.mode = Mode::Navigate;
        }
        KeyCode::Up | KeyCode::Char('k') => state.move_menu_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_menu_cursor_down(),
        KeyCode::Enter => {
            state.mode = Mode::Navigate;
            if let Some(activation_key) = state.ctx.menu().activation_key(state.menu_cursor)
                && state.controller_mut().activate_menu_item(&activation_key)
            {
                state.set_status(format!("Copied '{activation_key}'"));
            }
        }
        _ => {}
    }
}

/// Shared line-editing keys for the text input modes. `edit_cursor_pos` is a
/// byte offset that always sits on a char boundary.
fn edit_text(key: KeyEvent, state: &mut AppState, allow_newline: bool) {
    match key.code {
        KeyCode::Enter if allow_newline => {
            state.edit_buffer.insert(state.edit_cursor_pos, '\n');
            state.edit_cursor_pos += 1;
        }
        KeyCode::Backspace => {
            if state.edit_cursor_pos > 0 {
                let prev = prev_char_boundary(&state.edit_buffer, state.edit_cursor_pos);
                state.edit_buffer.replace_range(prev..state.edit_cursor_pos, "");
                state.edit_cursor_pos = prev;
            }
        }
        KeyCode::Delete => {
            if state.edit_cursor_pos < state.edit_buffer.len() {
                let next = next_char_boundary(&state.edit_buffer, state.edit_cursor_pos);
                state.edit_buffer.replace_range(state.edit_cursor_pos..next, "");
            }
        }
        KeyCode::Left => {
            state.edit_cursor_pos = prev_char_boundary(&state.edit_buffer, state.edit_cursor_pos);
        }
        KeyCode::Right => {
            state.edit_cursor_pos = next_char_boundary(&state.edit_buffer, state.edit_cursor_pos);
        }
        KeyCode::Home => {
            state.edit_cursor_pos = 0;
        }
        KeyCode::End => {
            state.edit_cursor_pos = state.edit_buffer.len();
        }
        KeyCode::Char(c) => {
            state.edit_buffer.insert(state.edit_cursor_pos, c);
            state.edit_cursor_pos += c.len_utf8();
        }
        _ => {}
    }
}

fn enter_edit_mode(state: &mut AppState) {
    let Some(content) = state.cursor_entry().map(|entry| entry.content.clone()) else {
        return;
    };
    state.edit_cursor_pos = content.len();
    state.edit_buffer = content;
    state.mode = Mode::EditContent;
}

fn delete_current_entry(state: &mut AppState) {
    let Some(entry) = state.cursor_entry() else {
        return;
    };
    let (id, title) = (entry.id, entry.title.clone());

    if state.controller_mut().remove_entry(id) {
        state.clamp_cursor();
        state.set_status(format!("Removed '{title}'"));
    }
}

fn copy_current_entry(state: &mut AppState) {
    let Some(title) = state.cursor_entry().map(|entry| entry.title.clone()) else {
        return;
    };

    if state.controller_mut().activate_menu_item(&title) {
        state.set_status(format!("Copied '{title}'"));
    } else {
        state.set_status("Could not copy to clipboard");
    }
}
