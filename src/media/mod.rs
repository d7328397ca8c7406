//! YouTube link handling: video ids, watch URLs and oEmbed titles.

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .expect("video id regex")
});

/// Extracts the 11-character video id from watch, short, embed and `/v/` links.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
}

/// Looks up video titles without a player.
#[derive(Debug, Clone)]
pub struct OEmbedClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OEmbedClient {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub async fn fetch_title(&self, video_id: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}?url={}&format=json",
            self.endpoint,
            urlencoding::encode(&watch_url(video_id))
        );
        let body: OEmbedResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("send oembed request")?
            .error_for_status()
            .context("oembed http status")?
            .json()
            .await
            .context("parse oembed json")?;
        Ok(body.title)
    }
}
