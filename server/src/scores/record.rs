use chrono::NaiveDateTime;
use common::PlayerName;
use serde::Serialize;

use super::error::{ScoreError, ScoreResult};

/// A stored row of `player_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ScoreRecord {
    pub id: i32,
    pub player_name: String,
    pub score: i32,
    pub created_at: NaiveDateTime,
}

/// A validated score that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub player_name: PlayerName,
    pub score: i32,
}

impl NewScore {
    pub fn new(player_name: &str, score: i64) -> ScoreResult<Self> {
        let player_name =
            PlayerName::parse(player_name).map_err(|e| ScoreError::invalid_input(e.to_string()))?;

        if score < 0 {
            return Err(ScoreError::invalid_input("score must be a non-negative integer"));
        }
        let score = i32::try_from(score)
            .map_err(|_| ScoreError::invalid_input("score is out of range"))?;

        Ok(Self { player_name, score })
    }
}
