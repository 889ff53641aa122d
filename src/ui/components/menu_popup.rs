use super::centered_rect;
use crate::app::AppState;
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

/// The tray menu: one row per entry, Enter copies it.
pub fn render(f: &mut Frame, state: &AppState) {
    let area = centered_rect(40, 60, f.area());
    let menu = state.ctx.menu().items();

    let items: Vec<ListItem> = menu
        .iter()
        .map(|item| ListItem::new(Line::from(Span::raw(format!(" {}", item.label)))))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Copy to clipboard ")
        .title_bottom(" Enter copy · Esc close ")
        .style(Style::default().bg(state.theme.background).fg(state.theme.foreground));

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(state.theme.cursor)
            .add_modifier(Modifier::REVERSED),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(state.menu_cursor));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut list_state);
}
