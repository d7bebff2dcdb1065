//! Paddock binary - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialize tracing
//! 3. Run one of the shells: single question, stdin chat, headless flight

mod cli;

use std::path::Path;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use paddock_chat::{ConversationSession, Message, QUICK_QUESTIONS};
use paddock_core::config::PaddockConfig;
use paddock_core::error::PaddockError;
use paddock_core::types::Sender;
use paddock_flight::{
    locate_user, FixedPosition, FlightController, FlightObserver, FlightPlan, FlightSettings,
    FlightState, GeolocationProvider, HeadlessSurface, StartOutcome,
};

use cli::{CliArgs, Command};

/// Prints flight progress in 10% steps and every zoom badge change.
struct ConsoleObserver {
    last_decile: AtomicI64,
    last_zoom: AtomicI32,
}

impl ConsoleObserver {
    fn new() -> Self {
        Self {
            last_decile: AtomicI64::new(-1),
            last_zoom: AtomicI32::new(i32::MIN),
        }
    }
}

impl FlightObserver for ConsoleObserver {
    fn on_progress(&self, percent: f64) {
        let decile = (percent / 10.0).floor() as i64;
        if self.last_decile.swap(decile, Ordering::Relaxed) != decile {
            println!("progress {:>3.0}%", percent);
        }
    }

    fn on_zoom_change(&self, zoom: i32) {
        if self.last_zoom.swap(zoom, Ordering::Relaxed) != zoom {
            println!("zoom {zoom}");
        }
    }

    fn on_state_change(&self, state: &FlightState) {
        println!("flight {state}");
    }
}

fn last_bot_reply(messages: &[Message]) -> Option<&Message> {
    messages.iter().rev().find(|m| m.sender == Sender::Bot)
}

async fn run_ask(config: &PaddockConfig, words: &[String]) -> Result<(), PaddockError> {
    let session = ConversationSession::new(&config.chat);
    let question = words.join(" ");
    match session.submit(&question) {
        Some(pending) => {
            pending.wait().await;
            if let Some(reply) = last_bot_reply(&session.messages()) {
                println!("{}", reply.text);
            }
        }
        None => tracing::warn!("Nothing to ask"),
    }
    Ok(())
}

async fn run_chat(config: &PaddockConfig) -> Result<(), PaddockError> {
    let session = ConversationSession::new(&config.chat);
    tracing::info!(session_id = %session.id(), "Chat started");

    for message in session.messages() {
        println!("bot> {}", message.text);
    }
    for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
        println!("  /{} {}", i + 1, question);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" {
            break;
        }

        let pending = match line.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
            Some(n) => match session.submit_quick(n.wrapping_sub(1)) {
                Ok(pending) => pending,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            },
            None => {
                session.set_draft(line);
                session.submit_draft()
            }
        };

        if let Some(pending) = pending {
            pending.wait().await;
            if let Some(reply) = last_bot_reply(&session.messages()) {
                println!("bot> {}", reply.text);
            }
        }
    }

    tracing::info!(
        session_id = %session.id(),
        messages = session.messages().len(),
        "Chat ended"
    );
    Ok(())
}

async fn run_fly(
    config: &PaddockConfig,
    location: Option<FixedPosition>,
    no_delay: bool,
) -> Result<(), PaddockError> {
    let user = locate_user(location.as_ref().map(|p| p as &dyn GeolocationProvider));
    if let Some(advisory) = user.advisory {
        println!("{advisory}");
    }
    if let Some(marker) = user.marker {
        println!("you are here: {marker}");
    }

    let surface = Arc::new(HeadlessSurface::default());
    let controller = FlightController::new(
        surface.clone(),
        Arc::new(ConsoleObserver::new()),
        FlightSettings::from_config(&config.flight),
    );

    let plan = FlightPlan::from_config(&config.flight);
    println!("from {} to {}", plan.start, plan.end);
    if controller.start(plan)? == StartOutcome::Queued {
        tracing::info!("Waiting for the map surface");
    }

    surface.set_ready(true);
    if !no_delay {
        tokio::time::sleep(Duration::from_millis(config.flight.start_delay_ms)).await;
    }
    controller.surface_ready()?;
    controller.finished().await;

    if let Some(camera) = controller.camera() {
        println!("landed at {} (zoom {:.1})", camera.center, camera.zoom);
    }
    Ok(())
}

fn run_init(path: &Path) -> Result<(), PaddockError> {
    if path.exists() {
        return Err(PaddockError::Config(format!(
            "{} already exists",
            path.display()
        )));
    }
    PaddockConfig::default().save(path)?;
    println!("wrote {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let config = PaddockConfig::load_or_default(&config_file);
    let level = args.resolve_log_level(&config.general.log_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Paddock v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    match &args.command {
        Command::Ask { words } => run_ask(&config, words).await?,
        Command::Chat => run_chat(&config).await?,
        Command::Fly { no_delay, .. } => {
            let location = args.command.location().map(FixedPosition);
            run_fly(&config, location, *no_delay).await?
        }
        Command::Init => run_init(&config_file)?,
    }

    Ok(())
}
