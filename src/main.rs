use anyhow::Context as _;
use clap::Parser as _;
use dotenvy::dotenv;
use removed_posts::Data;
use removed_posts::services::event_manager::{Handler, TriggerEvent};
use removed_posts::services::platform::MemoryPlatform;
use removed_posts::services::settings::MemorySettings;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Platform snapshot (posts, comment trees, users) to replay events against.
    #[arg(long, env = "SNAPSHOT_PATH")]
    snapshot: Option<PathBuf>,

    /// JSON array of trigger events to replay in order.
    #[arg(long, env = "EVENTS_PATH")]
    events: Option<PathBuf>,

    /// Installation settings as a JSON object keyed by setting name. Defaults apply when omitted.
    #[arg(long, env = "SETTINGS_PATH")]
    settings: Option<PathBuf>,

    /// List the registered modules and exit.
    #[arg(long)]
    list_modules: bool,
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    if args.list_modules {
        for module in removed_posts::modules::definitions() {
            println!("{:<16} {:<24} {}", module.id, module.label, module.description);
        }
        return Ok(());
    }

    let snapshot_path = args
        .snapshot
        .context("--snapshot or SNAPSHOT_PATH is required")?;
    let events_path = args.events.context("--events or EVENTS_PATH is required")?;

    let platform = Arc::new(
        MemoryPlatform::from_json(&read(&snapshot_path)?).context("Failed to parse snapshot")?,
    );

    let settings = match &args.settings {
        Some(path) => MemorySettings::from_json(&read(path)?).context("Failed to parse settings")?,
        None => MemorySettings::new(),
    };

    let events: Vec<TriggerEvent> =
        serde_json::from_str(&read(&events_path)?).context("Failed to parse events")?;

    let data = Data::new(platform.clone(), Arc::new(settings));
    let handler = Handler::new();

    info!("Replaying {} event(s)...", events.len());
    for (i, event) in events.iter().enumerate() {
        // A failed event does not stop the replay
        if let Err(e) = handler.dispatch(&data, event).await {
            error!("Event #{} ({}) failed: {:?}", i, event.name(), e);
        }
    }

    for action in platform.actions() {
        info!("Applied: {:?}", action);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "actions": platform.actions(),
            "snapshot": platform.snapshot(),
        }))?
    );

    Ok(())
}
