pub mod actions;
pub mod events;
pub mod state;

use crate::config::Config;
use crate::credential::CredentialStore;
use crate::input;
use crate::media::{self, OEmbedClient};
use crate::pipeline::Pipeline;
use crate::player::mpv::MpvHandle;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent};
use state::{AppState, Focus, Toast};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    state: AppState,
    pipeline: Arc<Pipeline>,
    credentials: Arc<CredentialStore>,
    oembed: OEmbedClient,
    mpv: Option<MpvHandle>,
}

impl App {
    pub fn new(
        cfg: Config,
        pipeline: Arc<Pipeline>,
        credentials: Arc<CredentialStore>,
    ) -> anyhow::Result<Self> {
        let oembed = OEmbedClient::new(cfg.media.oembed_url.clone())?;

        let mut state = AppState::new();
        if let Some(key) = credentials.get()? {
            state.key_input = key;
            state.has_key = true;
        } else {
            state.status = "Enter your X.AI API key (Tab to the key field)".into();
        }

        Ok(Self {
            cfg,
            state,
            pipeline,
            credentials,
            oembed,
            mpv: None,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone());

        if self.cfg.player.enabled {
            let mpv_log = self.cfg.paths.data_dir.join("mpv.log");
            match MpvHandle::spawn(tx.clone(), self.cfg.player.video, Some(&mpv_log)).await {
                Ok(h) => self.mpv = Some(h),
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "mpv unavailable");
                    self.state.toast = Some(Toast::error(
                        "Player disabled",
                        "mpv could not be started; titles come from oEmbed",
                    ));
                }
            }
        }

        tui::draw(terminal, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx).await;
                    }
                }
                Event::Player(pe) => self.state.apply_player(pe),
                Event::Network(ne) => self.state.apply_network(ne),
            }

            if self.state.should_quit {
                break;
            }

            tui::draw(terminal, &mut self.state)?;
        }

        Ok(())
    }

    async fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Submit => match self.state.focus {
                Focus::Url => self.load_video(tx).await,
                Focus::ApiKey => self.save_key(),
                Focus::Lyrics => {}
            },
            Action::Search => self.spawn_search(tx),
            Action::TogglePause => {
                if let Some(mpv) = &self.mpv
                    && let Err(e) = mpv.toggle_pause().await
                {
                    self.state.status = format!("mpv error: {e:#}");
                }
            }
            Action::SeekForward => self.seek(self.cfg.player.seek_step_secs).await,
            Action::SeekBack => self.seek(-self.cfg.player.seek_step_secs).await,
            _ => self.state.reduce(action),
        }
    }

    async fn seek(&mut self, seconds: f64) {
        if let Some(mpv) = &self.mpv
            && let Err(e) = mpv.seek_relative(seconds).await
        {
            self.state.status = format!("mpv error: {e:#}");
        }
    }

    async fn load_video(&mut self, tx: &mpsc::Sender<Event>) {
        let Some(video_id) = media::extract_video_id(self.state.url_input.trim()) else {
            self.state.toast = Some(Toast::error(
                "Invalid YouTube URL",
                "Please enter a valid YouTube video URL",
            ));
            return;
        };
        tracing::info!(%video_id, "loading video");
        self.state.begin_video(video_id.clone());
        self.state.focus = Focus::Lyrics;

        if let Some(mpv) = &self.mpv
            && let Err(e) = mpv.load_url(&media::watch_url(&video_id)).await
        {
            self.state.status = format!("mpv error: {e:#}");
        }

        // mpv may report the title first; whichever answer arrives first wins.
        let oembed = self.oembed.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let ev = match oembed.fetch_title(&video_id).await {
                Ok(title) => NetworkEvent::TitleResolved { video_id, title },
                Err(e) => NetworkEvent::TitleFailed {
                    video_id,
                    error: format!("{e:#}"),
                },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn save_key(&mut self) {
        let key = self.state.key_input.trim().to_string();
        match self.credentials.set(&key) {
            Ok(()) if key.is_empty() => {
                self.state.has_key = self.credentials.get().ok().flatten().is_some();
            }
            Ok(()) => {
                self.state.has_key = true;
                self.state.focus = Focus::Url;
                self.state.toast = Some(Toast::success("API key saved", "Stored for future sessions"));
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "failed to save api key");
                self.state.toast = Some(Toast::error("Could not save API key", format!("{e:#}")));
            }
        }
    }

    fn spawn_search(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.searching || self.pipeline.is_busy() {
            return;
        }
        let Some(title) = self.state.video_title.clone() else {
            self.state.toast = Some(Toast::error("No video loaded", "Please load a video first"));
            return;
        };

        self.state.searching = true;
        self.state.status = format!("Searching: {title}");

        let pipeline = Arc::clone(&self.pipeline);
        let credentials = Arc::clone(&self.credentials);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = pipeline.run(&title, &credentials, &tx).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::PipelineFinished(result)))
                .await;
        });
    }
}
