use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::Style,
    widgets::{Paragraph, Wrap},
};

use super::panel;

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let block = panel(&theme, format!(" {} Song Trivia ", theme.icons.search), false);
    let inner = block.inner(area).inner(Margin::new(1, 0));
    frame.render_widget(block, area);

    let paragraph = match &state.trivia {
        Some(t) => Paragraph::new(t.as_str()).style(Style::default().fg(theme.palette.fg_primary)),
        None => Paragraph::new("Trivia appears here after a search.")
            .style(Style::default().fg(theme.palette.fg_secondary)),
    };
    frame.render_widget(paragraph.wrap(Wrap { trim: true }), inner);
}
