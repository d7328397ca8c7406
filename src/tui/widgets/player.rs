//! Player panel: loaded title, playback position, search status and toasts

use crate::app::state::AppState;
use crate::tui::theme::{Icons, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{panel, truncate_str};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = panel(&theme, format!(" {} Player ", icons.music), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner)[1];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Time + state
            Constraint::Length(1), // Status
            Constraint::Min(0),    // Toast
        ])
        .split(padded);

    let width = padded.width as usize;

    let title = match (&state.video_title, &state.video_id) {
        (Some(t), _) => t.clone(),
        (None, Some(_)) => "Loading title...".to_string(),
        (None, None) => "No video loaded".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate_str(&title, width),
            Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );

    let ratio = if state.duration_secs > 0.0 {
        (state.position_secs / state.duration_secs).clamp(0.0, 1.0)
    } else {
        0.0
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            progress_bar(width, ratio, icons),
            Style::default().fg(theme.palette.accent),
        )),
        rows[1],
    );

    let play_icon = if state.playing { icons.pause } else { icons.play };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(play_icon, Style::default().fg(theme.palette.accent)),
            Span::raw(" "),
            Span::styled(
                format!("{}/{}", clock(state.position_secs), clock(state.duration_secs)),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ])),
        rows[2],
    );

    let status = if state.searching {
        Line::from(vec![
            Span::styled(icons.loading, Style::default().fg(theme.palette.accent)),
            Span::raw(" "),
            Span::styled(
                truncate_str("Searching lyrics & trivia...", width.saturating_sub(2)),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(icons.info, Style::default().fg(theme.palette.fg_secondary)),
            Span::raw(" "),
            Span::styled(
                truncate_str(&state.status, width.saturating_sub(2)),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(status), rows[3]);

    if let Some(toast) = &state.toast
        && !toast.is_expired()
    {
        let (prefix, color) = if toast.is_error() {
            (icons.error, theme.palette.error)
        } else {
            (icons.success, theme.palette.success)
        };
        let n = &toast.notification;
        let text = format!("{}: {}", n.title, n.description);
        let line = Line::from(vec![
            Span::styled(format!("{} ", prefix), Style::default().fg(color)),
            Span::styled(truncate_str(&text, width.saturating_sub(2)), Style::default().fg(color)),
        ]);
        frame.render_widget(Paragraph::new(line), rows[4]);
    }
}

fn clock(secs: f64) -> String {
    let secs = secs.max(0.0);
    format!("{:02}:{:02}", (secs / 60.0).floor() as u32, (secs % 60.0).floor() as u32)
}

fn progress_bar(width: usize, ratio: f64, icons: &Icons) -> String {
    if width < 3 {
        return String::new();
    }

    let filled = ((width - 1) as f64 * ratio).round() as usize;
    let empty = width.saturating_sub(filled + 1);

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push_str(icons.progress_full);
    }
    bar.push_str(icons.progress_head);
    for _ in 0..empty {
        bar.push_str(icons.progress_empty);
    }
    bar
}
