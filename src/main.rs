use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sihf_live::api::SihfClient;
use sihf_live::config::Config;
use sihf_live::models::{Gameday, ModelNotification};
use sihf_live::parser::{EventParser, SummaryNormalizer};
use sihf_live::tables::LeagueTable;
use sihf_live::workers::{DetailPoller, ModelWorker, SummaryPoller};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sihf_live=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sihf-live");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded (events sorted {})",
        config.event_sort_order
    );

    let leagues = Arc::new(LeagueTable::load_or_default(&config.league_table_path)?);
    info!("League table initialized ({} leagues)", leagues.len());

    let client = Arc::new(SihfClient::new(&config.sihf_base_url, &config.language));
    let parser = EventParser::new()?;

    // Channels
    let (update_tx, update_rx) = mpsc::channel(100);
    let (notify_tx, mut notify_rx) = mpsc::channel(100);
    let (refresh_tx, refresh_rx) = mpsc::channel(1);
    // Kept open for the lifetime of the process so the detail poller keeps
    // listening for game selections
    let (_follow_tx, follow_rx) = mpsc::channel(1);

    // Create workers
    let summary_poller = SummaryPoller::new(
        Arc::clone(&client),
        SummaryNormalizer::new(Arc::clone(&leagues)),
        update_tx.clone(),
        refresh_rx,
        config.summary_poll_interval,
    );

    let detail_poller = DetailPoller::new(
        Arc::clone(&client),
        parser,
        config.event_sort_order,
        update_tx,
        follow_rx,
        config.follow_game_id,
        config.detail_poll_interval,
    );

    let model_worker = ModelWorker::new(
        Gameday::today(),
        config.event_sort_order,
        update_rx,
        notify_tx,
    );

    info!("Workers created, starting...");

    let summary_handle = tokio::spawn(summary_poller.run());
    let detail_handle = tokio::spawn(detail_poller.run());
    let model_handle = tokio::spawn(model_worker.run());

    // Stand-in for a presentation layer: report what changed
    let notification_handle = tokio::spawn(async move {
        while let Some(notification) = notify_rx.recv().await {
            match notification {
                ModelNotification::Gameday(change) => info!("Gameday changed: {:?}", change),
                ModelNotification::Events(replaced) => info!(
                    "Events of game {} replaced ({} events)",
                    replaced.game_id, replaced.len
                ),
            }
        }
    });

    let refresh_handle = tokio::spawn(forward_refresh_signals(refresh_tx));

    info!("All workers started");

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = summary_handle => {
            error!("Summary poller exited unexpectedly: {:?}", result);
        }
        result = detail_handle => {
            error!("Detail poller exited unexpectedly: {:?}", result);
        }
        result = model_handle => {
            error!("Model worker exited unexpectedly: {:?}", result);
        }
        result = notification_handle => {
            error!("Notification consumer exited unexpectedly: {:?}", result);
        }
        result = refresh_handle => {
            error!("Refresh signal handler exited unexpectedly: {:?}", result);
        }
    }

    info!("Shutting down sihf-live");
    Ok(())
}

/// Turn SIGHUP into an immediate summary refresh
#[cfg(unix)]
async fn forward_refresh_signals(refresh_tx: mpsc::Sender<()>) -> Result<()> {
    use anyhow::Context;
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup()).context("Failed to install SIGHUP handler")?;

    while hangup.recv().await.is_some() {
        info!("SIGHUP received, refreshing summaries");
        if refresh_tx.send(()).await.is_err() {
            break;
        }
    }

    Ok(())
}

#[cfg(not(unix))]
async fn forward_refresh_signals(refresh_tx: mpsc::Sender<()>) -> Result<()> {
    let _refresh_tx = refresh_tx;
    std::future::pending::<()>().await;
    Ok(())
}
