pub mod form;
pub mod lyrics;
pub mod player;
pub mod root;
pub mod trivia;

use crate::tui::theme::Theme;
use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};

/// Bordered panel, highlighted when it has focus.
pub(crate) fn panel<'a>(theme: &Theme, title: String, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set(focused))
        .border_style(Style::default().fg(theme.border_color(focused)))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent))
}

pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_str;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Bohemian Rhapsody", 40), "Bohemian Rhapsody");
        assert_eq!(truncate_str("Bohemian Rhapsody", 8), "Bohem...");
        assert_eq!(truncate_str("Bohemian", 2), "Bo");
        assert_eq!(truncate_str("anything", 0), "");
    }
}
