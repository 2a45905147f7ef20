//! Questline Engine - Main entry point.
//!
//! Reads newline-delimited JSON host events on stdin and writes outbound
//! messages as JSON lines on stdout. Logs go to stderr.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use questline_engine::api::{ActorLanes, HostEventReader};
use questline_engine::infrastructure::outbound::ChannelNotifier;
use questline_engine::{App, AppConfig};
use questline_shared::OutboundMessage;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "questline_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Questline Engine");

    let config = AppConfig::from_env()?;
    let sweep_every = (config.session_ttl / 4).max(MIN_SWEEP_INTERVAL);

    let (notifier, outbox) = ChannelNotifier::channel();
    let outbound = notifier.sender();
    let app = Arc::new(App::startup(config, Arc::new(notifier)).await?);

    let writer = tokio::spawn(write_outbound(outbox));

    let session_ttl = app.config.session_ttl;
    let mut sweep = tokio::time::interval(sweep_every);
    let mut lanes = ActorLanes::new(app.dispatcher.clone(), outbound);
    let mut events = HostEventReader::new(BufReader::new(tokio::io::stdin()));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = events.next_event() => match event {
                Ok(Some(event)) => lanes.submit(event),
                Ok(None) => {
                    tracing::info!("Host closed the event stream");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read host events");
                    break;
                }
            },
            _ = sweep.tick() => {
                let expired = app.authoring.expire_idle().await;
                let retired = lanes.retire_idle(session_ttl);
                if expired > 0 || retired > 0 {
                    tracing::debug!(expired, retired, "Idle sessions and lanes swept");
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("Interrupt received");
                break;
            }
        }
    }

    lanes.shutdown().await;

    let closed = app.shutdown().await;
    tracing::info!(closed, "Store connections closed");

    // The writer finishes once the last notifier sender (held by the app) is gone.
    drop(app);
    writer.await?;
    Ok(())
}

async fn write_outbound(mut outbox: tokio::sync::mpsc::UnboundedReceiver<OutboundMessage>) {
    let mut stdout = tokio::io::stdout();
    while let Some(message) = outbox.recv().await {
        let mut line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode outbound message");
                continue;
            }
        };
        line.push('\n');
        if let Err(e) = stdout.write_all(line.as_bytes()).await {
            tracing::error!(error = %e, "Failed to write outbound message");
            return;
        }
        if let Err(e) = stdout.flush().await {
            tracing::error!(error = %e, "Failed to flush stdout");
            return;
        }
    }
}

fn load_dotenv() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Working directory first, then the repo root; local overrides win.
    for dir in [std::path::PathBuf::from("."), repo_root] {
        for filename in [".env.local", ".env"] {
            let path = dir.join(filename);
            if path.exists() {
                let _ = dotenvy::from_path(path);
            }
        }
    }
}
