// Replays a scripted session against an in-memory booking page and prints
// the resulting page as JSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use booking_portal::render::booking_page;
use booking_portal::{BookingApp, Event, PortalConfig};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "portal_demo", about = "Replay a booking page session script")]
struct Cli {
    /// JSON script: a list of events and clock advances
    #[arg(short, long)]
    script: PathBuf,

    /// Optional JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    Event(Event),
    AdvanceMs(u64),
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "booking_portal=debug,portal_demo=debug,info"
    } else {
        "booking_portal=info,portal_demo=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => PortalConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PortalConfig::default(),
    };

    let script = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script {}", cli.script.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&script).context("Failed to parse script")?;
    info!("Replaying {} step(s)", steps.len());

    let mut app = BookingApp::with_config(config, booking_page())?;
    for (index, step) in steps.into_iter().enumerate() {
        match step {
            Step::Event(event) => app
                .dispatch(event)
                .with_context(|| format!("Step {} failed", index))?,
            Step::AdvanceMs(ms) => {
                app.advance(Duration::from_millis(ms))
                    .with_context(|| format!("Step {} failed", index))?;
            }
        }
    }

    let snapshot = serde_json::to_string_pretty(app.surface())?;
    println!("{}", snapshot);
    Ok(())
}
