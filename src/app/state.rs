use super::actions::Action;
use super::events::{NetworkEvent, PlayerEvent};
use crate::notify::{Notification, Severity};
use crate::pipeline::PipelineResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Url,
    ApiKey,
    Lyrics,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Url => Focus::ApiKey,
            Focus::ApiKey => Focus::Lyrics,
            Focus::Lyrics => Focus::Url,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Url => Focus::Lyrics,
            Focus::ApiKey => Focus::Url,
            Focus::Lyrics => Focus::ApiKey,
        }
    }

    pub fn is_text_input(self) -> bool {
        matches!(self, Focus::Url | Focus::ApiKey)
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub created_at: std::time::Instant,
}

impl Toast {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Notification::error(title, description))
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Notification::success(title, description))
    }

    pub fn is_error(&self) -> bool {
        self.notification.severity == Severity::Error
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(5)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub focus: Focus,
    pub url_input: String,
    pub key_input: String,
    /// A key is available (typed, stored, or configured).
    pub has_key: bool,

    pub video_id: Option<String>,
    pub video_title: Option<String>,
    pub playing: bool,
    pub position_secs: f64,
    pub duration_secs: f64,

    pub searching: bool,
    pub lyrics: Option<String>,
    pub trivia: Option<String>,
    pub lyrics_scroll: u16,
    /// Set by the renderer so scrolling can clamp.
    pub lyrics_viewport: u16,

    pub toast: Option<Toast>,
    pub status: String,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status: "Paste a YouTube link and press Enter".into(),
            ..Self::default()
        }
    }

    fn lyrics_line_count(&self) -> u16 {
        self.lyrics
            .as_deref()
            .map(|l| l.lines().count().min(u16::MAX as usize) as u16)
            .unwrap_or(0)
    }

    fn max_scroll(&self) -> u16 {
        self.lyrics_line_count()
            .saturating_sub(self.lyrics_viewport.max(1))
    }

    /// Pure state transitions; side effects are handled by the caller.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::SetFocus(f) => self.focus = f,
            Action::InputChar(c) => {
                if let Some(buf) = self.focused_input_mut() {
                    buf.push(c);
                }
            }
            Action::Backspace => {
                if let Some(buf) = self.focused_input_mut() {
                    buf.pop();
                }
            }
            Action::ClearInput => {
                if let Some(buf) = self.focused_input_mut() {
                    buf.clear();
                }
            }
            Action::ScrollUp => self.lyrics_scroll = self.lyrics_scroll.saturating_sub(1),
            Action::ScrollDown => {
                self.lyrics_scroll = (self.lyrics_scroll + 1).min(self.max_scroll())
            }
            Action::PageUp => {
                let page = self.lyrics_viewport.max(1);
                self.lyrics_scroll = self.lyrics_scroll.saturating_sub(page);
            }
            Action::PageDown => {
                let page = self.lyrics_viewport.max(1);
                self.lyrics_scroll = self.lyrics_scroll.saturating_add(page).min(self.max_scroll());
            }
            Action::ScrollTop => self.lyrics_scroll = 0,
            Action::ScrollBottom => self.lyrics_scroll = self.max_scroll(),
            Action::Submit
            | Action::Search
            | Action::TogglePause
            | Action::SeekForward
            | Action::SeekBack
            | Action::Resize => {}
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Url => Some(&mut self.url_input),
            Focus::ApiKey => Some(&mut self.key_input),
            Focus::Lyrics => None,
        }
    }

    /// A new video replaces the previous title; lyrics stay until the next search.
    pub fn begin_video(&mut self, video_id: String) {
        self.video_id = Some(video_id);
        self.video_title = None;
        self.playing = false;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.status = "Loading video...".into();
    }

    pub fn apply_player(&mut self, ev: PlayerEvent) {
        match ev {
            PlayerEvent::Title(title) => {
                if self.video_id.is_some() && self.video_title.is_none() {
                    self.status = "Video loaded".into();
                    self.video_title = Some(title);
                }
            }
            PlayerEvent::Playing(p) => self.playing = p,
            PlayerEvent::Position { seconds } => self.position_secs = seconds,
            PlayerEvent::Duration { seconds } => self.duration_secs = seconds,
            PlayerEvent::Error(e) => {
                self.playing = false;
                self.status = e;
            }
        }
    }

    pub fn apply_network(&mut self, ev: NetworkEvent) {
        match ev {
            NetworkEvent::TitleResolved { video_id, title } => {
                // Ignore answers for a video that has since been replaced.
                if self.video_id.as_deref() == Some(video_id.as_str()) && self.video_title.is_none() {
                    self.status = "Video loaded".into();
                    self.video_title = Some(title);
                }
            }
            NetworkEvent::TitleFailed { video_id, error } => {
                if self.video_id.as_deref() == Some(video_id.as_str()) && self.video_title.is_none() {
                    self.status = format!("Could not read video title: {error}");
                }
            }
            NetworkEvent::Notify(n) => self.toast = Some(Toast::new(n)),
            NetworkEvent::PipelineFinished(result) => {
                self.searching = false;
                self.lyrics = result.lyrics;
                self.trivia = result.trivia;
                self.lyrics_scroll = 0;
                self.status = "Ready".into();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut state = AppState::new();
        state.reduce(Action::InputChar('a'));
        state.reduce(Action::FocusNext);
        state.reduce(Action::InputChar('k'));
        state.reduce(Action::InputChar('x'));
        state.reduce(Action::Backspace);
        state.reduce(Action::FocusNext);
        state.reduce(Action::InputChar('z'));

        assert_eq!(state.url_input, "a");
        assert_eq!(state.key_input, "k");
        assert_eq!(state.focus, Focus::Lyrics);
    }

    #[test]
    fn test_scroll_clamps_to_lyrics() {
        let mut state = AppState::new();
        state.lyrics = Some("1\n2\n3\n4\n5".into());
        state.lyrics_viewport = 3;

        state.reduce(Action::ScrollBottom);
        assert_eq!(state.lyrics_scroll, 2);
        state.reduce(Action::ScrollDown);
        assert_eq!(state.lyrics_scroll, 2);
        state.reduce(Action::PageUp);
        assert_eq!(state.lyrics_scroll, 0);
        state.reduce(Action::ScrollUp);
        assert_eq!(state.lyrics_scroll, 0);
    }

    #[test]
    fn test_stale_title_is_ignored() {
        let mut state = AppState::new();
        state.begin_video("aaaaaaaaaaa".into());
        state.begin_video("bbbbbbbbbbb".into());

        state.apply_network(NetworkEvent::TitleResolved {
            video_id: "aaaaaaaaaaa".into(),
            title: "Old".into(),
        });
        assert_eq!(state.video_title, None);

        state.apply_network(NetworkEvent::TitleResolved {
            video_id: "bbbbbbbbbbb".into(),
            title: "New".into(),
        });
        assert_eq!(state.video_title.as_deref(), Some("New"));
    }

    #[test]
    fn test_player_title_requires_loaded_video() {
        let mut state = AppState::new();
        state.apply_player(PlayerEvent::Title("Idle".into()));
        assert_eq!(state.video_title, None);

        state.begin_video("dQw4w9WgXcQ".into());
        state.apply_player(PlayerEvent::Title("Rick Astley - Never Gonna Give You Up".into()));
        assert_eq!(
            state.video_title.as_deref(),
            Some("Rick Astley - Never Gonna Give You Up")
        );
    }

    #[test]
    fn test_first_title_wins() {
        let mut state = AppState::new();
        state.begin_video("dQw4w9WgXcQ".into());
        state.apply_network(NetworkEvent::TitleResolved {
            video_id: "dQw4w9WgXcQ".into(),
            title: "From oEmbed".into(),
        });
        state.apply_player(PlayerEvent::Title("From mpv".into()));
        assert_eq!(state.video_title.as_deref(), Some("From oEmbed"));

        state.begin_video("aaaaaaaaaaa".into());
        state.apply_player(PlayerEvent::Title("From mpv".into()));
        state.apply_network(NetworkEvent::TitleResolved {
            video_id: "aaaaaaaaaaa".into(),
            title: "From oEmbed".into(),
        });
        assert_eq!(state.video_title.as_deref(), Some("From mpv"));
    }

    #[test]
    fn test_pipeline_result_replaces_previous() {
        let mut state = AppState::new();
        state.searching = true;
        state.lyrics = Some("old lyrics".into());
        state.trivia = Some("old trivia".into());
        state.lyrics_scroll = 7;

        state.apply_network(NetworkEvent::PipelineFinished(PipelineResult {
            lyrics: None,
            trivia: Some("new trivia".into()),
        }));

        assert!(!state.searching);
        assert_eq!(state.lyrics, None);
        assert_eq!(state.trivia.as_deref(), Some("new trivia"));
        assert_eq!(state.lyrics_scroll, 0);
    }
}
