//! `rsvp` — terminal dashboard and submission tool for the RSVP server.
//!
//! # Usage
//!
//! ```
//! rsvp --url http://localhost:8080
//! rsvp --config ~/.config/rsvp/config.toml
//! rsvp submit --name "Ana Cruz" --email ana@x.com --guests 2 --attending yes
//! ```

mod app;
mod client;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand, ValueEnum};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rsvp_core::record::{ATTENDING_NO, ATTENDING_YES, Submission};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rsvp", about = "Dashboard and submission tool for wedding RSVPs")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the RSVP server (default: http://localhost:8080).
  #[arg(long, env = "RSVP_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Open the admin dashboard (the default).
  Dashboard,
  /// Submit one RSVP.
  Submit {
    #[arg(long)]
    name:      String,
    #[arg(long)]
    email:     String,
    /// Party size, 1 to 4.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    guests:    u8,
    #[arg(long, value_enum)]
    attending: Answer,
    #[arg(long)]
    dietary:   Option<String>,
    #[arg(long)]
    message:   Option<String>,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Answer {
  Yes,
  No,
}

impl Answer {
  fn as_str(self) -> &'static str {
    match self {
      Answer::Yes => ATTENDING_YES,
      Answer::No => ATTENDING_NO,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
  };
  let client = ApiClient::new(api_config)?;

  match args.command.unwrap_or(Command::Dashboard) {
    Command::Dashboard => run_dashboard(client).await,
    Command::Submit { name, email, guests, attending, dietary, message } => {
      let submission = Submission {
        name:      Some(name),
        email:     Some(email.clone()),
        guests:    Some(guests.to_string()),
        attending: Some(attending.as_str().to_owned()),
        dietary,
        message,
      };
      let ack = client.submit(&submission).await?;
      println!("{} ({email}, {})", ack.message, ack.submitted_at.to_rfc3339());
      Ok(())
    }
  }
}

async fn run_dashboard(client: ApiClient) -> Result<()> {
  let mut app = App::new(client);
  app.load().await;

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}
