//! lyrics.ovh API client
//!
//! `GET /v1/<artist>/<title>` answers `{"lyrics": "..."}` or 404 with an
//! `{"error": "..."}` body.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LyricsOvhResponse {
    #[serde(default)]
    lyrics: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LyricsOvhClient {
    client: reqwest::Client,
    base_url: String,
}

impl LyricsOvhClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.lyrics.ovh/v1";
    const USER_AGENT: &'static str = concat!("songscope/", env!("CARGO_PKG_VERSION"));

    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Lyrics for `artist`/`song`, or `None` on any failure or empty answer.
    pub async fn fetch(&self, artist: &str, song: &str) -> Option<String> {
        match self.fetch_inner(artist, song).await {
            Ok(lyrics) => lyrics,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), %artist, %song, "lyrics lookup failed");
                None
            }
        }
    }

    async fn fetch_inner(&self, artist: &str, song: &str) -> anyhow::Result<Option<String>> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(song)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), %url, "no lyrics");
            return Ok(None);
        }

        let body: LyricsOvhResponse = response.json().await?;
        Ok(body.lyrics.filter(|l| !l.is_empty()))
    }
}
