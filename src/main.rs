mod app;
mod config;
mod credential;
mod input;
mod llm;
mod lyrics;
mod media;
mod notify;
mod pipeline;
mod player;
mod song;
mod storage;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "songscope",
    version,
    about = "Lyrics and trivia for the song in a YouTube video"
)]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// X.AI API key for this run only (not saved).
    #[arg(long, env = "XAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Identify the song, fetch trivia and lyrics, and print them (headless).
    Lookup {
        /// A YouTube link, or a raw video title.
        input: String,
        /// Treat INPUT as a title even if it looks like a link.
        #[arg(long)]
        title: bool,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the title of a YouTube video (headless).
    Title { url: String },
    /// Manage the stored X.AI API key.
    Key {
        #[command(subcommand)]
        cmd: KeyCommand,
    },
}

#[derive(Debug, Subcommand)]
enum KeyCommand {
    /// Store a key for future runs.
    Set { key: String },
    /// Remove the stored key.
    Clear,
    /// Show which key would be used (masked).
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let command = cli.command.unwrap_or(Command::Tui);

    init_tracing(&cfg, matches!(command, Command::Tui))?;

    let storage = Arc::new(storage::Storage::open(&cfg.database_path()).context("open settings store")?);
    let credentials = Arc::new(credential::CredentialStore::new(
        Arc::clone(&storage),
        cfg.llm.api_key.clone(),
    ));
    credentials.set_session(cli.api_key);

    match command {
        Command::Tui => {
            let pipeline = Arc::new(make_pipeline(&cfg)?);
            let mut app = app::App::new(cfg.clone(), pipeline, credentials)?;
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Lookup { input, title, json } => {
            let media_title = if title {
                input
            } else {
                match media::extract_video_id(&input) {
                    Some(video_id) => media::OEmbedClient::new(cfg.media.oembed_url.clone())?
                        .fetch_title(&video_id)
                        .await
                        .context("look up video title")?,
                    None => input,
                }
            };
            eprintln!("Title: {media_title}");

            let pipeline = make_pipeline(&cfg)?;
            let result = pipeline
                .run(&media_title, &credentials, &notify::StderrNotifier)
                .await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
            if !result.has_lyrics() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Title { url } => {
            let video_id = media::extract_video_id(&url).context("not a YouTube video link")?;
            let title = media::OEmbedClient::new(cfg.media.oembed_url.clone())?
                .fetch_title(&video_id)
                .await?;
            println!("{title}");
        }
        Command::Key { cmd } => match cmd {
            KeyCommand::Set { key } => {
                anyhow::ensure!(!key.trim().is_empty(), "key must not be empty");
                credentials.set(&key).context("save api key")?;
                println!("Saved API key.");
            }
            KeyCommand::Clear => {
                credentials.clear().context("clear api key")?;
                println!("Cleared stored API key.");
            }
            KeyCommand::Show => match credentials.get()? {
                Some(k) => println!("{}", credential::mask(&k)),
                None => println!("No API key configured."),
            },
        },
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr, except in the TUI where they would corrupt the screen.
fn init_tracing(cfg: &config::Config, tui: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if tui {
        let path = cfg.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn make_pipeline(cfg: &config::Config) -> anyhow::Result<pipeline::Pipeline> {
    let llm = llm::CompletionClient::new(cfg.llm.endpoint.clone(), cfg.llm.model.clone())
        .context("build completion client")?;
    let lyrics = lyrics::LyricsOvhClient::new(cfg.lyrics.base_url.clone())
        .context("build lyrics client")?;
    Ok(pipeline::Pipeline::new(song::SongIdentifier::new(llm), lyrics))
}

fn print_result(result: &pipeline::PipelineResult) {
    if let Some(trivia) = &result.trivia {
        println!("== Song Trivia ==\n{trivia}\n");
    }
    if let Some(lyrics) = &result.lyrics {
        println!("== Lyrics ==\n{lyrics}");
    }
}
