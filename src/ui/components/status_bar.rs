use crate::app::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let count = state.entries().len();
    let noun = if count == 1 { "entry" } else { "entries" };

    let message = state
        .status_message
        .as_ref()
        .map(|(message, _)| format!(" | {message}"))
        .unwrap_or_default();

    let left_content = format!(" {} | {count} {noun}{message}", state.mode);
    let nav_hint = "m menu  ? help  q quit";
    let version_text = format!("v{VERSION}");

    let padding = (area.width as usize)
        .saturating_sub(left_content.width() + nav_hint.width() + version_text.width() + 3);

    let status_line = format!(
        "{} {:>padding$} {} {}",
        left_content,
        "",
        nav_hint,
        version_text,
        padding = padding
    );

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    f.render_widget(Paragraph::new(Line::from(vec![Span::styled(status_line, style)])), area);
}
