use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::scores::{ScoreError, ScoreRecord, ScoreResult};
use crate::web_server::AppState;

#[derive(Debug, Deserialize)]
struct SaveScoreRequest {
    player_name: Option<String>,
    score: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct SaveScoreSuccess {
    success: bool,
    data: ScoreRecord,
}

#[derive(Debug, Serialize)]
struct SaveScoreFailure {
    success: bool,
    error: String,
}

/// `POST /api/saveScore`. Every failure, including a malformed body, is a 500
/// with `success: false` so the page only has one error shape to handle.
pub async fn save_score(State(state): State<AppState>, body: Bytes) -> Response {
    match handle_save_score(&state, &body).await {
        Ok(record) => (
            StatusCode::OK,
            Json(SaveScoreSuccess {
                success: true,
                data: record,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("saveScore failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveScoreFailure {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn handle_save_score(state: &AppState, body: &[u8]) -> ScoreResult<ScoreRecord> {
    let request: SaveScoreRequest = serde_json::from_slice(body)
        .map_err(|e| ScoreError::invalid_input(format!("malformed body: {}", e)))?;

    let player_name = request
        .player_name
        .ok_or_else(|| ScoreError::invalid_input("player_name is required"))?;

    let score = request
        .score
        .as_ref()
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| ScoreError::invalid_input("score must be an integer"))?;

    state.recorder.submit(&player_name, score).await
}
