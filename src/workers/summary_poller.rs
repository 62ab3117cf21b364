use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::api::{decode, SihfClient};
use crate::error::IngestError;
use crate::models::ModelUpdate;
use crate::parser::SummaryNormalizer;

/// Worker that polls the gameday summary table
pub struct SummaryPoller {
    client: Arc<SihfClient>,
    normalizer: SummaryNormalizer,
    update_tx: mpsc::Sender<ModelUpdate>,
    refresh_rx: mpsc::Receiver<()>,
    poll_interval: Duration,
}

impl SummaryPoller {
    /// Create a new summary poller
    pub fn new(
        client: Arc<SihfClient>,
        normalizer: SummaryNormalizer,
        update_tx: mpsc::Sender<ModelUpdate>,
        refresh_rx: mpsc::Receiver<()>,
        poll_interval_secs: u64,
    ) -> Self {
        Self {
            client,
            normalizer,
            update_tx,
            refresh_rx,
            poll_interval: Duration::from_secs(poll_interval_secs),
        }
    }

    /// Run the worker loop. A refresh request triggers an immediate poll.
    pub async fn run(mut self) {
        info!("Summary poller started (interval: {:?})", self.poll_interval);

        let mut interval = time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                Some(()) = self.refresh_rx.recv() => {
                    debug!("Summary refresh requested");
                    interval.reset();
                }
            }

            self.poll().await;
        }
    }

    /// Fetch once and forward the result. A refresh request arriving while
    /// the request is in flight cancels it and starts over, so a superseded
    /// response never reaches the model.
    pub(crate) async fn poll(&mut self) {
        let result = loop {
            let outcome = tokio::select! {
                result = self.client.fetch_summaries() => Some(result),
                Some(()) = self.refresh_rx.recv() => None,
            };

            match outcome {
                Some(result) => break result,
                None => warn!("Summary fetch superseded by a refresh request, restarting"),
            }
        };

        self.forward(result).await;
    }

    async fn forward(&self, result: Result<Vec<u8>, IngestError>) {
        let body = match result {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to fetch game summaries: {}", e);
                return;
            }
        };

        let summaries = self.normalizer.normalize_batch(&decode(&body));
        info!("Received {} game summaries", summaries.len());

        let update = ModelUpdate::Summaries {
            date: Local::now().date_naive(),
            summaries,
        };

        if let Err(e) = self.update_tx.send(update).await {
            warn!("Failed to send summary update: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::LeagueTable;

    fn poller(base_url: &str) -> (SummaryPoller, mpsc::Receiver<ModelUpdate>, mpsc::Sender<()>) {
        let (update_tx, update_rx) = mpsc::channel(8);
        let (refresh_tx, refresh_rx) = mpsc::channel(8);
        let poller = SummaryPoller::new(
            Arc::new(SihfClient::new(base_url, "de")),
            SummaryNormalizer::new(Arc::new(LeagueTable::new())),
            update_tx,
            refresh_rx,
            60,
        );
        (poller, update_rx, refresh_tx)
    }

    #[tokio::test]
    async fn test_poll_forwards_normalized_batch() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"data": [
                    ["NL A", "19:45", {"id": 1, "name": "EHC Biel"}, {"id": 2, "name": "HC Lugano"},
                     {"homeTeam": 1, "awayTeam": 0}, {"homeTeam": [1], "awayTeam": [0]}, "",
                     {"percent": 17, "name": "1. Drittel"}, {"gameId": 42}],
                    ["too", "short"]
                ]}"#,
            )
            .create_async()
            .await;

        let (mut poller, mut update_rx, _refresh_tx) = poller(&server.url());
        poller.poll().await;

        match update_rx.try_recv().unwrap() {
            ModelUpdate::Summaries { date, summaries } => {
                assert_eq!(date, Local::now().date_naive());
                assert_eq!(summaries.len(), 1);
                assert_eq!(summaries[0].game_id, 42);
                assert_eq!(summaries[0].score.total, "1:0");
            }
            other => panic!("unexpected update: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_an_empty_batch() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let (mut poller, mut update_rx, _refresh_tx) = poller(&server.url());
        poller.poll().await;

        match update_rx.try_recv().unwrap() {
            ModelUpdate::Summaries { summaries, .. } => assert!(summaries.is_empty()),
            other => panic!("unexpected update: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_network_failure_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let (mut poller, mut update_rx, _refresh_tx) = poller(&server.url());
        poller.poll().await;

        assert!(update_rx.try_recv().is_err());
    }
}
