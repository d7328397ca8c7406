//! Link and API key input fields

use crate::app::state::{AppState, Focus};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::panel;

pub fn render_url(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let placeholder = "https://www.youtube.com/watch?v=...";
    let text = if state.url_input.is_empty() {
        Span::styled(placeholder, Style::default().fg(theme.palette.fg_secondary))
    } else {
        Span::styled(state.url_input.clone(), Style::default().fg(theme.palette.fg_primary))
    };
    render_field(
        frame,
        area,
        format!(" {} YouTube link ", theme.icons.link),
        text,
        state.focus == Focus::Url,
        state.url_input.chars().count(),
    );
}

pub fn render_key(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let text = if state.key_input.is_empty() {
        Span::styled("Enter X.AI API key", Style::default().fg(theme.palette.fg_secondary))
    } else {
        Span::styled(
            "*".repeat(state.key_input.chars().count()),
            Style::default().fg(theme.palette.fg_primary),
        )
    };
    let title = if state.has_key {
        format!(" {} API key ", theme.icons.key)
    } else {
        format!(" {} API key (required) ", theme.icons.key)
    };
    render_field(
        frame,
        area,
        title,
        text,
        state.focus == Focus::ApiKey,
        state.key_input.chars().count(),
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    title: String,
    text: Span<'static>,
    focused: bool,
    cursor_col: usize,
) {
    let theme = get_theme();
    let block = panel(&theme, title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep the end of long input visible.
    let width = inner.width.saturating_sub(2) as usize;
    let scroll = cursor_col.saturating_sub(width) as u16;
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::raw(" "), text])).scroll((0, scroll)),
        inner,
    );

    if focused && inner.width > 0 {
        let x = inner.x + 1 + (cursor_col as u16).saturating_sub(scroll).min(inner.width.saturating_sub(2));
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}
