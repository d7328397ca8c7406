//! Lyrics panel

use crate::app::state::{AppState, Focus};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Paragraph, Wrap},
};

use super::panel;

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let block = panel(
        &theme,
        format!(" {} Lyrics ", theme.icons.lyrics),
        state.focus == Focus::Lyrics,
    );
    let inner = block.inner(area).inner(Margin::new(1, 0));
    frame.render_widget(block, area);
    state.lyrics_viewport = inner.height;

    let text = match &state.lyrics {
        Some(lyrics) => Text::from(
            lyrics
                .lines()
                .map(|l| Line::styled(l.trim_end().to_string(), Style::default().fg(theme.palette.fg_primary)))
                .collect::<Vec<_>>(),
        ),
        None => {
            let hint = if state.searching {
                "Searching..."
            } else {
                "No lyrics yet. Load a video and press s to search."
            };
            Text::from(Line::styled(hint, Style::default().fg(theme.palette.fg_secondary)))
        }
    };

    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((state.lyrics_scroll, 0)),
        inner,
    );
}
