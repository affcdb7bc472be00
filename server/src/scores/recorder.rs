use common::games::snake::GameOverReport;
use tracing::{info, warn};

use crate::session_runner::GameOverSink;
use super::error::ScoreResult;
use super::record::{NewScore, ScoreRecord};
use super::store::ScoreStore;

#[derive(Clone, Debug)]
pub struct ScoreRecorder {
    store: ScoreStore,
}

impl ScoreRecorder {
    pub fn new(store: ScoreStore) -> Self {
        Self { store }
    }

    pub async fn submit(&self, player_name: &str, score: i64) -> ScoreResult<ScoreRecord> {
        let new_score = NewScore::new(player_name, score)?;
        let record = self.store.save(&new_score).await?;
        info!(
            "saved score {} for {} as row {}",
            record.score, record.player_name, record.id
        );
        Ok(record)
    }
}

impl GameOverSink for ScoreRecorder {
    /// Best effort: the write runs on its own task and a failure is only logged.
    fn record_game_over(&self, report: GameOverReport) {
        let recorder = self.clone();
        tokio::spawn(async move {
            if let Err(e) = recorder
                .submit(report.player_name.as_str(), i64::from(report.score))
                .await
            {
                warn!(
                    "dropping score {} for {}: {}",
                    report.score, report.player_name, e
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use common::PlayerName;
    use common::games::snake::GameEndReason;

    use super::*;
    use crate::scores::ScoreError;

    async fn memory_recorder() -> ScoreRecorder {
        ScoreRecorder::new(ScoreStore::connect("sqlite::memory:", 1).await.unwrap())
    }

    #[tokio::test]
    async fn test_submit_returns_stored_record() {
        let recorder = memory_recorder().await;
        let record = recorder.submit("Ann", 30).await.unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.score, 30);
    }

    #[tokio::test]
    async fn test_submit_rejects_before_touching_storage() {
        let recorder = memory_recorder().await;
        let err = recorder.submit("", 5).await.unwrap_err();
        assert!(matches!(err, ScoreError::InvalidInput(_)));

        // Nothing was written, so the next row is still the first one.
        let record = recorder.submit("Ann", 5).await.unwrap();
        assert_eq!(record.id, 1);
    }

    #[tokio::test]
    async fn test_game_over_is_persisted_in_background() {
        let store = ScoreStore::connect("sqlite::memory:", 1).await.unwrap();
        let recorder = ScoreRecorder::new(store.clone());

        recorder.record_game_over(GameOverReport {
            player_name: PlayerName::parse("Ann").unwrap(),
            score: 40,
            reason: GameEndReason::SelfCollision,
        });

        let mut saved = None;
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            if let ScoreStore::Sqlite(pool) = &store {
                let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM player_score")
                    .fetch_one(pool)
                    .await
                    .ok();
                if count == Some(1) {
                    saved = count;
                    break;
                }
            }
        }
        assert_eq!(saved, Some(1));
    }

    #[tokio::test]
    async fn test_background_failure_does_not_panic() {
        let store = ScoreStore::connect("sqlite::memory:", 1).await.unwrap();
        store.close().await;
        let recorder = ScoreRecorder::new(store);

        recorder.record_game_over(GameOverReport {
            player_name: PlayerName::parse("Ann").unwrap(),
            score: 10,
            reason: GameEndReason::WallCollision,
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matches!(
            recorder.submit("Ann", 10).await,
            Err(ScoreError::Storage(_))
        ));
    }
}
