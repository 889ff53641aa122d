use crate::app::{AppState, Mode};
use crate::utils::unicode::truncate_to_width;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use unicode_width::UnicodeWidthStr;

const CURSOR_MARK: char = '▏';

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let available_width = area.width.saturating_sub(2) as usize;
    let mut items: Vec<ListItem> = Vec::new();

    for (idx, entry) in state.entries().iter().enumerate() {
        let is_cursor = idx == state.cursor_position;

        if is_cursor && state.mode == Mode::EditContent {
            items.push(ListItem::new(build_edit_lines(state, &entry.title, available_width)));
            continue;
        }

        let title_style = if is_cursor && state.mode != Mode::AddTitle {
            Style::default()
                .fg(state.theme.cursor)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
                .fg(state.theme.foreground)
                .add_modifier(Modifier::BOLD)
        };

        let title = format!(" {} ", entry.title);
        let preview_width = available_width.saturating_sub(title.width() + 1);
        let more = if entry.is_multiline() { " ↵" } else { "" };
        let preview = truncate_to_width(&format!("{}{more}", entry.preview()), preview_width);

        items.push(ListItem::new(Line::from(vec![
            Span::styled(title, title_style),
            Span::raw(" "),
            Span::styled(preview, Style::default().fg(state.theme.preview)),
        ])));
    }

    if state.mode == Mode::AddTitle {
        let input = with_cursor_mark(&state.edit_buffer, state.edit_cursor_pos);
        items.push(ListItem::new(Line::from(vec![
            Span::styled(" + ", Style::default().fg(state.theme.input)),
            Span::styled(input, Style::default().fg(state.theme.input)),
        ])));
    } else if state.entries().is_empty() {
        items.push(ListItem::new(Line::from("")));
        items.push(ListItem::new(Line::from(Span::styled(
            "  No entries yet",
            Style::default().fg(state.theme.foreground),
        ))));
        items.push(ListItem::new(Line::from(Span::styled(
            "  Press 'n' to add one, '?' for help",
            Style::default().fg(state.theme.preview),
        ))));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Entries ")
        .style(Style::default().bg(state.theme.background));

    let mut list_state = ListState::default();
    if state.mode == Mode::AddTitle {
        list_state.select(Some(items.len().saturating_sub(1)));
    } else if !state.entries().is_empty() {
        list_state.select(Some(state.cursor_position));
    }

    f.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
}

fn build_edit_lines(state: &AppState, title: &str, available_width: usize) -> Vec<Line<'static>> {
    let header = Line::from(vec![
        Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(state.theme.cursor)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
        ),
        Span::styled(
            "  Enter save · Alt+Enter newline · Esc cancel",
            Style::default().fg(state.theme.preview),
        ),
    ]);

    let text = with_cursor_mark(&state.edit_buffer, state.edit_cursor_pos);
    let style = Style::default().fg(state.theme.input);
    let mut lines = vec![header];
    for line in text.split('\n') {
        lines.push(Line::from(Span::styled(
            format!("   {}", truncate_to_width(line, available_width.saturating_sub(3))),
            style,
        )));
    }
    lines
}

fn with_cursor_mark(buffer: &str, cursor: usize) -> String {
    let cursor = cursor.min(buffer.len());
    let mut text = String::with_capacity(buffer.len() + CURSOR_MARK.len_utf8());
    text.push_str(&buffer[..cursor]);
    text.push(CURSOR_MARK);
    text.push_str(&buffer[cursor..]);
    text
}
