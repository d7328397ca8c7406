//! Root layout widget

use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{form, lyrics, player, trivia};

/// ┌ Link ──────────────────┬ Lyrics ───────────┐
/// ├ API key ───────────────┤                   │
/// ├ Player ────────────────┤                   │
/// ├ Trivia ────────────────┤                   │
/// └────────────────────────┴───────────────────┘
///  key hints
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(root);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Length(3), // API key input
            Constraint::Length(7), // Player
            Constraint::Min(4),    // Trivia
        ])
        .split(cols[0]);

    form::render_url(frame, state, left[0]);
    form::render_key(frame, state, left[1]);
    player::render(frame, state, left[2]);
    trivia::render(frame, state, left[3]);
    lyrics::render(frame, state, cols[1]);
    render_hints(frame, state, rows[1]);
}

fn render_hints(frame: &mut Frame, state: &AppState, area: ratatui::layout::Rect) {
    let theme = get_theme();
    let hints = if state.focus.is_text_input() {
        "Enter submit  Esc leave field  Tab next field  Ctrl-S search  Ctrl-C quit"
    } else {
        "s search  space play/pause  [ ] seek  j/k scroll  i link  a key  q quit"
    };
    let line = Line::from(Span::styled(
        format!(" {hints}"),
        Style::default().fg(theme.palette.fg_secondary),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
