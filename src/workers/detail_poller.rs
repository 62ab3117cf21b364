use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::api::{decode, SihfClient};
use crate::error::IngestError;
use crate::models::ModelUpdate;
use crate::parser::{EventParser, SortOrder};

/// Worker that polls the details of the followed game
pub struct DetailPoller {
    client: Arc<SihfClient>,
    parser: EventParser,
    sort_order: SortOrder,
    update_tx: mpsc::Sender<ModelUpdate>,
    follow_rx: mpsc::Receiver<Option<u64>>,
    game_id: Option<u64>,
    poll_interval: Duration,
}

/// How an in-flight detail request ended
enum Fetch {
    Done(Result<Vec<u8>, IngestError>),
    /// Another game (or none) was selected while the request was running
    Superseded(Option<u64>),
}

impl DetailPoller {
    /// Create a new detail poller following `game_id`
    pub fn new(
        client: Arc<SihfClient>,
        parser: EventParser,
        sort_order: SortOrder,
        update_tx: mpsc::Sender<ModelUpdate>,
        follow_rx: mpsc::Receiver<Option<u64>>,
        game_id: Option<u64>,
        poll_interval_secs: u64,
    ) -> Self {
        Self {
            client,
            parser,
            sort_order,
            update_tx,
            follow_rx,
            game_id,
            poll_interval: Duration::from_secs(poll_interval_secs),
        }
    }

    /// Run the worker loop. Selecting a game polls it immediately.
    pub async fn run(mut self) {
        info!("Detail poller started (interval: {:?})", self.poll_interval);

        let mut interval = time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                Some(game_id) = self.follow_rx.recv() => {
                    info!("Following game {:?}", game_id);
                    self.game_id = game_id;
                    interval.reset();
                }
            }

            self.poll().await;
        }
    }

    /// Fetch the followed game once. Selecting another game while the
    /// request is in flight cancels it; the new game is fetched instead.
    pub(crate) async fn poll(&mut self) {
        loop {
            let Some(game_id) = self.game_id else {
                debug!("No game followed, skipping detail fetch");
                return;
            };

            let outcome = tokio::select! {
                result = self.client.fetch_details(game_id) => Fetch::Done(result),
                Some(next) = self.follow_rx.recv() => Fetch::Superseded(next),
            };

            match outcome {
                Fetch::Done(result) => {
                    self.forward(game_id, result).await;
                    return;
                }
                Fetch::Superseded(next) => {
                    warn!(
                        "Detail fetch for game {} superseded, now following {:?}",
                        game_id, next
                    );
                    self.game_id = next;
                }
            }
        }
    }

    async fn forward(&self, game_id: u64, result: Result<Vec<u8>, IngestError>) {
        let body = match result {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to fetch details of game {}: {}", game_id, e);
                return;
            }
        };

        let details = self.parser.parse_details(&decode(&body), self.sort_order);
        info!(
            "Game {}: {} events, {} players",
            game_id,
            details.events.len(),
            details.roster.len()
        );

        if let Err(e) = self
            .update_tx
            .send(ModelUpdate::Details { game_id, details })
            .await
        {
            warn!("Failed to send detail update: {}", e);
        }
    }
}
