//! Title → song → trivia → lyrics.
//!
//! Every run ends in exactly one [`Outcome`], and each outcome produces exactly
//! one notification. Nothing is returned as an error.

use crate::credential::CredentialStore;
use crate::lyrics::LyricsOvhClient;
use crate::notify::{Notification, Notify};
use crate::song::SongIdentifier;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    pub lyrics: Option<String>,
    pub trivia: Option<String>,
}

impl PipelineResult {
    /// Only a run that found lyrics counts as a success.
    pub fn has_lyrics(&self) -> bool {
        self.lyrics.is_some()
    }
}

#[derive(Debug)]
pub enum Outcome {
    NoCredential,
    IdentificationFailed,
    LyricsFailed { trivia: Option<String> },
    Success { lyrics: String, trivia: Option<String> },
    /// Something below the stages failed (e.g. reading the stored key).
    Failed(anyhow::Error),
}

impl Outcome {
    pub fn notification(&self) -> Notification {
        match self {
            Outcome::NoCredential => Notification::error(
                "API Key Required",
                "Please enter your X.AI API key to enable song information extraction",
            ),
            Outcome::IdentificationFailed => Notification::error(
                "Could not extract song information",
                "Please check if the video title contains song information",
            ),
            Outcome::LyricsFailed { .. } => Notification::error(
                "Error fetching lyrics",
                "Could not fetch the lyrics for this song",
            ),
            Outcome::Success { .. } => {
                Notification::success("Success", "Found lyrics and trivia for the song!")
            }
            Outcome::Failed(_) => Notification::error(
                "Error",
                "An error occurred while fetching song information",
            ),
        }
    }

    pub fn into_result(self) -> PipelineResult {
        match self {
            Outcome::Success { lyrics, trivia } => PipelineResult {
                lyrics: Some(lyrics),
                trivia,
            },
            Outcome::LyricsFailed { trivia } => PipelineResult {
                lyrics: None,
                trivia,
            },
            Outcome::NoCredential | Outcome::IdentificationFailed | Outcome::Failed(_) => {
                PipelineResult::default()
            }
        }
    }
}

pub struct Pipeline {
    identifier: SongIdentifier,
    lyrics: LyricsOvhClient,
    busy: AtomicBool,
}

/// Clears the busy flag however the run ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Pipeline {
    pub fn new(identifier: SongIdentifier, lyrics: LyricsOvhClient) -> Self {
        Self {
            identifier,
            lyrics,
            busy: AtomicBool::new(false),
        }
    }

    /// True while a run is in flight. Callers check this before starting another run.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn run(
        &self,
        title: &str,
        credentials: &CredentialStore,
        notify: &dyn Notify,
    ) -> PipelineResult {
        self.busy.store(true, Ordering::SeqCst);
        let _guard = BusyGuard(&self.busy);

        let outcome = self.execute(title, credentials).await;
        match &outcome {
            Outcome::Failed(e) => tracing::error!(error = %format!("{e:#}"), "pipeline failed"),
            Outcome::Success { .. } => tracing::info!(%title, "pipeline succeeded"),
            other => tracing::info!(%title, outcome = ?other, "pipeline ended without lyrics"),
        }
        notify.notify(outcome.notification());
        outcome.into_result()
    }

    pub async fn execute(&self, title: &str, credentials: &CredentialStore) -> Outcome {
        let api_key = match credentials.get() {
            Ok(Some(k)) => k,
            Ok(None) => return Outcome::NoCredential,
            Err(e) => return Outcome::Failed(e.context("read api key")),
        };

        let Some(info) = self.identifier.identify(title, &api_key).await else {
            return Outcome::IdentificationFailed;
        };

        match self
            .lyrics
            .fetch(&info.identity.artist, &info.identity.song)
            .await
        {
            Some(lyrics) => Outcome::Success {
                lyrics,
                trivia: info.trivia,
            },
            None => Outcome::LyricsFailed {
                trivia: info.trivia,
            },
        }
    }
}
