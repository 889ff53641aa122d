pub mod entry_list;
pub mod menu_popup;
pub mod status_bar;

use crate::app::{AppState, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Entry list
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    entry_list::render(f, state, chunks[0]);
    status_bar::render(f, state, chunks[1]);

    if state.mode == Mode::Menu {
        menu_popup::render(f, state);
    }

    if state.show_help {
        render_help_overlay(f, state);
    }

    // Drawn last so nothing covers it.
    if let Some(notice) = &state.notice {
        render_notice(f, state, notice);
    }
}

fn render_help_overlay(f: &mut Frame, state: &AppState) {
    let help_text = r#"
    tray-clip Help

    Entries:
      ↑/↓ or j/k            Move cursor (selects the entry)
      n or a                New entry (type a title, Enter)
      i or Enter            Edit content of the entry
      y or c                Copy content to clipboard
      d                     Remove entry
      m                     Open the tray menu
      ?                     Toggle help
      q                     Quit

    Editing:
      Enter                 Save
      Alt/Shift+Enter       New line (content only)
      Esc                   Cancel
      ←/→ Home/End          Move cursor
      Backspace/Delete      Delete character
    "#;

    let area = centered_rect(60, 70, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(state.theme.background));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn render_notice(f: &mut Frame, state: &AppState, notice: &str) {
    let area = centered_rect(60, 40, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Could not load entries ")
        .title_bottom(" Enter to continue ")
        .border_style(
            Style::default()
                .fg(state.theme.notice)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(state.theme.background));

    let paragraph = Paragraph::new(notice.to_string())
        .block(block)
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
