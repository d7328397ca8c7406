use crate::app::events::{Event, PlayerEvent};
use anyhow::Context;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::UnixStream,
    process::{Child, Command},
    sync::mpsc,
};

/// mpv driven over its JSON IPC socket. Loads YouTube watch URLs directly via ytdl_hook.
#[derive(Debug)]
pub struct MpvHandle {
    child: Child,
    socket_path: PathBuf,
    writer: tokio::sync::Mutex<tokio::io::WriteHalf<UnixStream>>,
    request_id: AtomicU64,
}

impl MpvHandle {
    pub async fn spawn(
        event_tx: mpsc::Sender<Event>,
        show_video: bool,
        log_file: Option<&std::path::Path>,
    ) -> anyhow::Result<Self> {
        let socket_path =
            std::env::temp_dir().join(format!("songscope-mpv-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&socket_path);

        let mut cmd = Command::new("mpv");
        cmd.args(["--idle=yes", "--input-terminal=no", "--really-quiet"]);
        if !show_video {
            cmd.arg("--no-video");
        }
        if let Some(p) = log_file {
            cmd.arg(format!("--log-file={}", p.display()));
        }
        let child = cmd
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .context("spawn mpv")?;

        let stream = connect_with_retry(&socket_path).await?;
        let (reader, writer) = tokio::io::split(stream);

        tokio::spawn(read_events_loop(reader, event_tx));

        let this = Self {
            child,
            socket_path,
            writer: tokio::sync::Mutex::new(writer),
            request_id: AtomicU64::new(1),
        };

        this.command(json!({"command":["request_log_messages", "warn"]}))
            .await?;
        this.command(json!({"command":["observe_property", 1, "time-pos"]}))
            .await?;
        this.command(json!({"command":["observe_property", 2, "duration"]}))
            .await?;
        this.command(json!({"command":["observe_property", 3, "pause"]}))
            .await?;
        this.command(json!({"command":["observe_property", 4, "media-title"]}))
            .await?;

        Ok(this)
    }

    pub async fn load_url(&self, url: &str) -> anyhow::Result<()> {
        self.command(json!({"command":["loadfile", url, "replace"]}))
            .await?;
        // Start paused; the user presses play.
        self.command(json!({"command":["set_property", "pause", true]}))
            .await
    }

    pub async fn toggle_pause(&self) -> anyhow::Result<()> {
        self.command(json!({"command":["cycle", "pause"]})).await
    }

    pub async fn seek_relative(&self, seconds: f64) -> anyhow::Result<()> {
        self.command(json!({"command":["seek", seconds, "relative"]}))
            .await
    }

    async fn command(&self, mut v: serde_json::Value) -> anyhow::Result<()> {
        if v.get("request_id").is_none() {
            let id = self.request_id.fetch_add(1, Ordering::Relaxed);
            if let serde_json::Value::Object(ref mut o) = v {
                o.insert("request_id".to_string(), serde_json::Value::from(id));
            }
        }
        let mut w = self.writer.lock().await;
        let mut line = serde_json::to_vec(&v).context("encode mpv json")?;
        line.push(b'\n');
        w.write_all(&line).await.context("write mpv ipc")?;
        w.flush().await.context("flush mpv ipc")?;
        Ok(())
    }
}

impl Drop for MpvHandle {
    fn drop(&mut self) {
        let _ = self.child.start_kill();
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

async fn connect_with_retry(path: &PathBuf) -> anyhow::Result<UnixStream> {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        match UnixStream::connect(path).await {
            Ok(s) => return Ok(s),
            Err(e) => {
                if tokio::time::Instant::now() > deadline {
                    return Err(e).with_context(|| format!("connect to mpv ipc {}", path.display()));
                }
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
        }
    }
}

async fn read_events_loop(reader: tokio::io::ReadHalf<UnixStream>, event_tx: mpsc::Sender<Event>) {
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Ok(v) = serde_json::from_str::<serde_json::Value>(&line) else {
            continue;
        };
        if let (Some(_rid), Some(err)) = (v.get("request_id"), v.get("error"))
            && let Some(err_s) = err.as_str()
            && err_s != "success"
        {
            tracing::warn!(error = err_s, "mpv ipc error");
        }
        if let Some(pe) = map_mpv_event(&v)
            && event_tx.send(Event::Player(pe)).await.is_err()
        {
            break;
        }
    }
}

fn map_mpv_event(v: &serde_json::Value) -> Option<PlayerEvent> {
    match v.get("event")?.as_str()? {
        "property-change" => {
            let data = v.get("data")?;
            match v.get("name")?.as_str()? {
                "time-pos" => Some(PlayerEvent::Position {
                    seconds: data.as_f64().unwrap_or(0.0),
                }),
                "duration" => Some(PlayerEvent::Duration {
                    seconds: data.as_f64().unwrap_or(0.0),
                }),
                "pause" => Some(PlayerEvent::Playing(!data.as_bool().unwrap_or(true))),
                "media-title" => {
                    let title = data.as_str()?.trim();
                    // Before ytdl_hook resolves the page, mpv reports the URL itself.
                    if title.is_empty() || title.starts_with("http") || title.starts_with("watch?v=") {
                        None
                    } else {
                        Some(PlayerEvent::Title(title.to_string()))
                    }
                }
                _ => None,
            }
        }
        "end-file" => {
            let reason = v.get("reason").and_then(|x| x.as_str()).unwrap_or("");
            if reason == "error" {
                let err = v.get("error").and_then(|x| x.as_str()).unwrap_or("unknown");
                Some(PlayerEvent::Error(format!("mpv could not load the video: {err}")))
            } else {
                Some(PlayerEvent::Playing(false))
            }
        }
        "log-message" => {
            let level = v.get("level")?.as_str().unwrap_or("info");
            let text = v.get("text")?.as_str().unwrap_or("").trim();
            if level == "error" && !text.is_empty() {
                Some(PlayerEvent::Error(format!("mpv {level}: {text}")))
            } else {
                if !text.is_empty() {
                    tracing::debug!(level, text, "mpv log");
                }
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(raw: &str) -> Option<PlayerEvent> {
        map_mpv_event(&serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn test_media_title_once_resolved() {
        assert_eq!(
            ev(r#"{"event":"property-change","id":4,"name":"media-title","data":"Queen - Bohemian Rhapsody (Official Video)"}"#),
            Some(PlayerEvent::Title("Queen - Bohemian Rhapsody (Official Video)".into()))
        );
        assert_eq!(
            ev(r#"{"event":"property-change","id":4,"name":"media-title","data":"https://www.youtube.com/watch?v=fJ9rUzIMcZQ"}"#),
            None
        );
        assert_eq!(ev(r#"{"event":"property-change","id":4,"name":"media-title","data":null}"#), None);
    }

    #[test]
    fn test_pause_maps_to_playing() {
        assert_eq!(
            ev(r#"{"event":"property-change","id":3,"name":"pause","data":false}"#),
            Some(PlayerEvent::Playing(true))
        );
        assert_eq!(
            ev(r#"{"event":"property-change","id":3,"name":"pause","data":true}"#),
            Some(PlayerEvent::Playing(false))
        );
    }

    #[test]
    fn test_end_file_error() {
        assert!(matches!(
            ev(r#"{"event":"end-file","reason":"error","error":"loading failed"}"#),
            Some(PlayerEvent::Error(msg)) if msg.contains("loading failed")
        ));
        assert_eq!(ev(r#"{"event":"end-file","reason":"eof"}"#), Some(PlayerEvent::Playing(false)));
    }
}
