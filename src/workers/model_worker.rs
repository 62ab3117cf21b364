use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::{Gameday, GamedayChange, ModelNotification, ModelUpdate};
use crate::parser::SortOrder;

/// Worker that owns the gameday model and applies updates to it in order.
///
/// Only this worker mutates the model, so it needs no locking.
pub struct ModelWorker {
    gameday: Gameday,
    sort_order: SortOrder,
    update_rx: mpsc::Receiver<ModelUpdate>,
    notify_tx: mpsc::Sender<ModelNotification>,
}

impl ModelWorker {
    /// Create a new model worker
    pub fn new(
        gameday: Gameday,
        sort_order: SortOrder,
        update_rx: mpsc::Receiver<ModelUpdate>,
        notify_tx: mpsc::Sender<ModelNotification>,
    ) -> Self {
        Self {
            gameday,
            sort_order,
            update_rx,
            notify_tx,
        }
    }

    pub fn gameday(&self) -> &Gameday {
        &self.gameday
    }

    /// Run the worker loop
    pub async fn run(mut self) {
        info!("Model worker started for {}", self.gameday.date());

        while let Some(update) = self.update_rx.recv().await {
            for notification in self.apply(update) {
                if let Err(e) = self.notify_tx.send(notification).await {
                    warn!("Failed to send model notification: {}", e);
                }
            }
        }

        warn!("Model update channel closed");
    }

    /// Apply one update and return the resulting notifications
    pub fn apply(&mut self, update: ModelUpdate) -> Vec<ModelNotification> {
        match update {
            ModelUpdate::Summaries { date, summaries } => {
                let changes = self.gameday.merge(date, summaries);

                for change in &changes {
                    self.log_change(change);
                }

                changes.into_iter().map(ModelNotification::Gameday).collect()
            }
            ModelUpdate::Details { game_id, details } => {
                match self.gameday.replace_details(
                    game_id,
                    details.events,
                    details.roster,
                    self.sort_order,
                ) {
                    Some(replaced) => {
                        info!("Game {} | {} events", game_id, replaced.len);
                        vec![ModelNotification::Events(replaced)]
                    }
                    None => {
                        debug!("Details for unknown game {}, ignoring", game_id);
                        Vec::new()
                    }
                }
            }
        }
    }

    fn log_change(&self, change: &GamedayChange) {
        match *change {
            GamedayChange::Reset => info!("Gameday reset to {}", self.gameday.date()),
            GamedayChange::Inserted { position, game_id }
            | GamedayChange::Updated { position, game_id } => {
                if let Some(game) = self.gameday.get_by_id(game_id) {
                    let summary = game.summary();
                    info!(
                        "#{} | Game {} | {} vs {} | {} ({}) | {}",
                        position,
                        game_id,
                        summary.hometeam.name,
                        summary.awayteam.name,
                        game.total_score(),
                        game.periods_score(),
                        game.status_text(),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::{
        EventDetail, EventTime, EventsReplaced, GameEvent, GameSummary, Roster, Score, Team,
    };
    use crate::parser::GameDetails;
    use crate::tables::GameStatus;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 1, day).unwrap()
    }

    fn summary(game_id: u64, total: &str, status: u8) -> GameSummary {
        GameSummary {
            game_id,
            league: "90".to_string(),
            hometeam: Team {
                id: 1,
                name: "Fribourg-Gottéron".to_string(),
            },
            awayteam: Team {
                id: 2,
                name: "Frölunda".to_string(),
            },
            start_time: "20:00".to_string(),
            score: Score {
                total: total.to_string(),
                ..Score::default()
            },
            status: GameStatus(status),
        }
    }

    fn worker() -> (
        ModelWorker,
        mpsc::Sender<ModelUpdate>,
        mpsc::Receiver<ModelNotification>,
    ) {
        let (update_tx, update_rx) = mpsc::channel(8);
        let (notify_tx, notify_rx) = mpsc::channel(8);
        let worker = ModelWorker::new(
            Gameday::new(date(10)),
            SortOrder::Descending,
            update_rx,
            notify_tx,
        );
        (worker, update_tx, notify_rx)
    }

    #[test]
    fn test_apply_summaries() {
        let (mut worker, _update_tx, _notify_rx) = worker();

        let notifications = worker.apply(ModelUpdate::Summaries {
            date: date(10),
            summaries: vec![summary(5, "-:-", 0)],
        });
        assert_eq!(
            notifications,
            vec![ModelNotification::Gameday(GamedayChange::Inserted {
                position: 0,
                game_id: 5
            })]
        );

        let notifications = worker.apply(ModelUpdate::Summaries {
            date: date(10),
            summaries: vec![summary(5, "0:0", 1)],
        });
        assert_eq!(
            notifications,
            vec![ModelNotification::Gameday(GamedayChange::Updated {
                position: 0,
                game_id: 5
            })]
        );
        assert_eq!(worker.gameday().len(), 1);
    }

    #[test]
    fn test_apply_details_uses_configured_order() {
        let (mut worker, _update_tx, _notify_rx) = worker();
        worker.apply(ModelUpdate::Summaries {
            date: date(10),
            summaries: vec![summary(5, "1:0", 1)],
        });

        let events = [60, 600]
            .into_iter()
            .map(|seconds| {
                GameEvent::new(
                    EventDetail::GoalkeeperIn,
                    EventTime::from_seconds(seconds),
                    Some(1),
                )
            })
            .collect();
        let notifications = worker.apply(ModelUpdate::Details {
            game_id: 5,
            details: GameDetails {
                events,
                roster: Roster::new(),
            },
        });

        assert_eq!(
            notifications,
            vec![ModelNotification::Events(EventsReplaced {
                game_id: 5,
                position: 0,
                len: 2
            })]
        );
        let game = worker.gameday().get(0).unwrap();
        assert_eq!(game.events()[0].time.seconds, 600);
    }

    #[test]
    fn test_details_for_unknown_game_are_ignored() {
        let (mut worker, _update_tx, _notify_rx) = worker();

        let notifications = worker.apply(ModelUpdate::Details {
            game_id: 404,
            details: GameDetails::default(),
        });
        assert!(notifications.is_empty());
    }

    #[tokio::test]
    async fn test_run_forwards_notifications() {
        let (worker, update_tx, mut notify_rx) = worker();
        let handle = tokio::spawn(worker.run());

        update_tx
            .send(ModelUpdate::Summaries {
                date: date(10),
                summaries: vec![summary(5, "-:-", 0), summary(6, "-:-", 0)],
            })
            .await
            .unwrap();
        update_tx
            .send(ModelUpdate::Summaries {
                date: date(11),
                summaries: Vec::new(),
            })
            .await
            .unwrap();
        drop(update_tx);
        handle.await.unwrap();

        let mut received = Vec::new();
        while let Ok(notification) = notify_rx.try_recv() {
            received.push(notification);
        }

        assert_eq!(
            received,
            vec![
                ModelNotification::Gameday(GamedayChange::Inserted {
                    position: 0,
                    game_id: 5
                }),
                ModelNotification::Gameday(GamedayChange::Inserted {
                    position: 1,
                    game_id: 6
                }),
                ModelNotification::Gameday(GamedayChange::Reset),
            ]
        );
    }
}
