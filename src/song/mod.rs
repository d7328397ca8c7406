//! Song identification from a raw video title, plus trivia for the result.
//!
//! The model is asked to answer as
//!
//! ```text
//! **Song:** <song>
//! **Artist:** <artist>
//! ```
//!
//! and only that exact shape is accepted.

use crate::llm::CompletionClient;
use serde::{Deserialize, Serialize};

const SONG_PREFIX: &str = "**Song:** ";
const ARTIST_PREFIX: &str = "**Artist:** ";

const IDENTIFY_SYSTEM_PROMPT: &str =
    "You are a system that identifies songs and artists from YouTube video titles.";
const TRIVIA_SYSTEM_PROMPT: &str = "You are a system that provides trivia about songs.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongIdentity {
    pub artist: String,
    pub song: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongInfo {
    pub identity: SongIdentity,
    pub trivia: Option<String>,
}

/// Reads the song from line 0 and the artist from line 1.
///
/// Returns `None` when either field is empty after stripping its label and trimming.
pub fn parse_identity(content: &str) -> Option<SongIdentity> {
    let mut lines = content.split('\n');
    let song = strip_label(lines.next(), SONG_PREFIX);
    let artist = strip_label(lines.next(), ARTIST_PREFIX);

    if song.is_empty() || artist.is_empty() {
        return None;
    }
    Some(SongIdentity { artist, song })
}

fn strip_label(line: Option<&str>, prefix: &str) -> String {
    let line = line.unwrap_or_default();
    line.strip_prefix(prefix).unwrap_or(line).trim().to_string()
}

fn identify_prompt(title: &str) -> String {
    format!("Extract the song and artist from the YouTube title: {title}")
}

fn trivia_prompt(song: &str, artist: &str) -> String {
    format!(
        "I need a paragraph of trivia about the song \"{song}\" by {artist}. \
         I'm interested in learning something I probably wouldn't already know. \
         Focus on details like: The song's writing or composition process, \
         any interesting stories from the recording sessions, \
         the song's chart performance or cultural impact beyond just 'it was a hit,' \
         and any unusual or surprising facts about the song's creation or reception. \
         Avoid generic information like 'it was a popular song.'"
    )
}

#[derive(Debug, Clone)]
pub struct SongIdentifier {
    llm: CompletionClient,
}

impl SongIdentifier {
    pub fn new(llm: CompletionClient) -> Self {
        Self { llm }
    }

    /// Never fails outward: any upstream error is logged and reported as `None`.
    pub async fn identify(&self, title: &str, api_key: &str) -> Option<SongInfo> {
        let content = match self
            .llm
            .complete(IDENTIFY_SYSTEM_PROMPT, &identify_prompt(title), api_key)
            .await
        {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "song identification request failed");
                return None;
            }
        };

        let Some(identity) = parse_identity(&content) else {
            tracing::info!(%title, "could not extract song info from completion");
            return None;
        };
        tracing::info!(artist = %identity.artist, song = %identity.song, "identified song");

        let trivia = self
            .fetch_trivia(&identity.song, &identity.artist, api_key)
            .await;
        Some(SongInfo { identity, trivia })
    }

    pub async fn fetch_trivia(&self, song: &str, artist: &str, api_key: &str) -> Option<String> {
        match self
            .llm
            .complete(TRIVIA_SYSTEM_PROMPT, &trivia_prompt(song, artist), api_key)
            .await
        {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "trivia request failed");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn completion(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        }))
    }

    /// Mounts an identify answer and a trivia answer, told apart by their system prompts.
    pub(crate) async fn mount_llm(server: &MockServer, identify: ResponseTemplate, trivia: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(body_string_contains("identifies songs and artists"))
            .respond_with(identify)
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("provides trivia about songs"))
            .respond_with(trivia)
            .mount(server)
            .await;
    }

    fn identifier(server: &MockServer) -> SongIdentifier {
        SongIdentifier::new(CompletionClient::new(server.uri(), "grok-beta").unwrap())
    }

    #[test]
    fn test_parse_well_formed() {
        let parsed = parse_identity("**Song:**   Bohemian Rhapsody  \n**Artist:** Queen\n").unwrap();
        assert_eq!(parsed.song, "Bohemian Rhapsody");
        assert_eq!(parsed.artist, "Queen");
    }

    #[test]
    fn test_parse_handles_crlf_and_extra_lines() {
        let parsed = parse_identity("**Song:** Hello\r\n**Artist:** Adele\r\nSome commentary").unwrap();
        assert_eq!(parsed.song, "Hello");
        assert_eq!(parsed.artist, "Adele");
    }

    #[test]
    fn test_parse_empty_field_is_unresolved() {
        assert_eq!(parse_identity("**Song:** \n**Artist:** Queen"), None);
        assert_eq!(parse_identity("**Song:** Hello\n**Artist:**   "), None);
        assert_eq!(parse_identity("**Song:** Only one line"), None);
        assert_eq!(parse_identity(""), None);
    }

    #[test]
    fn test_parse_is_prefix_only() {
        // Unlabelled lines are kept verbatim.
        let parsed = parse_identity("Hello\nAdele").unwrap();
        assert_eq!(parsed.song, "Hello");
        assert_eq!(parsed.artist, "Adele");

        // A different label shape is not stripped.
        let parsed = parse_identity("**song:** Hello\n**Artist:** Adele").unwrap();
        assert_eq!(parsed.song, "**song:** Hello");

        // Reordered labels are not swapped back.
        let parsed = parse_identity("**Artist:** Adele\n**Song:** Hello").unwrap();
        assert_eq!(parsed.song, "**Artist:** Adele");
        assert_eq!(parsed.artist, "**Song:** Hello");
    }

    #[tokio::test]
    async fn test_identify_with_trivia() {
        let server = MockServer::start().await;
        mount_llm(
            &server,
            completion("**Song:** Never Gonna Give You Up\n**Artist:** Rick Astley"),
            completion("Recorded in a single afternoon."),
        )
        .await;

        let info = identifier(&server)
            .identify("Never Gonna Give You Up", "k")
            .await
            .unwrap();
        assert_eq!(
            info.identity,
            SongIdentity {
                artist: "Rick Astley".into(),
                song: "Never Gonna Give You Up".into(),
            }
        );
        assert_eq!(info.trivia.as_deref(), Some("Recorded in a single afternoon."));
    }

    #[tokio::test]
    async fn test_identify_embeds_title_and_names_song_in_trivia_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("from the YouTube title: Queen - Bohemian Rhapsody (Official Video)"))
            .respond_with(completion("**Song:** Bohemian Rhapsody\n**Artist:** Queen"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("the song \\\"Bohemian Rhapsody\\\" by Queen"))
            .respond_with(completion("trivia"))
            .expect(1)
            .mount(&server)
            .await;

        let info = identifier(&server)
            .identify("Queen - Bohemian Rhapsody (Official Video)", "k")
            .await
            .unwrap();
        assert_eq!(info.trivia.as_deref(), Some("trivia"));
    }

    #[tokio::test]
    async fn test_unresolved_identity_skips_trivia() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("identifies songs and artists"))
            .respond_with(completion("I could not find a song in that title."))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("provides trivia about songs"))
            .respond_with(completion("unused"))
            .expect(0)
            .mount(&server)
            .await;

        assert_eq!(identifier(&server).identify("cat video", "k").await, None);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert_eq!(identifier(&server).identify("anything", "k").await, None);
    }

    #[tokio::test]
    async fn test_trivia_failure_keeps_identity() {
        let server = MockServer::start().await;
        mount_llm(
            &server,
            completion("**Song:** Hello\n**Artist:** Adele"),
            ResponseTemplate::new(429),
        )
        .await;

        let info = identifier(&server).identify("Adele - Hello", "k").await.unwrap();
        assert_eq!(info.identity.song, "Hello");
        assert_eq!(info.trivia, None);
    }

    #[tokio::test]
    async fn test_empty_trivia_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        assert_eq!(identifier(&server).fetch_trivia("Hello", "Adele", "k").await, None);
    }
}
