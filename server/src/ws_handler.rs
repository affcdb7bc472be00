use axum::extract::ws::{Message, WebSocket};
use common::SessionId;
use common::games::SessionRng;
use common::games::snake::GameSession;
use common::name_generator::suggest_player_name;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::protocol::{ClientMessage, ServerMessage};
use crate::session_runner::run_session;
use crate::web_server::AppState;

const CHANNEL_CAPACITY: usize = 128;

pub async fn handle_websocket(socket: WebSocket, state: AppState) {
    let session_id = state.next_session_id();
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (command_tx, command_rx) = mpsc::channel::<ClientMessage>(CHANNEL_CAPACITY);
    let (update_tx, mut update_rx) = mpsc::channel::<ServerMessage>(CHANNEL_CAPACITY);

    let send_task = tokio::spawn(async move {
        while let Some(message) = update_rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Failed to encode server message: {}", e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let settings = state.game_settings.clone();
    let welcome = ServerMessage::Welcome {
        suggested_name: suggest_player_name(),
        field_width: settings.field_size.width,
        field_height: settings.field_size.height,
        tick_interval_ms: settings.tick_interval.as_millis() as u64,
    };
    if update_tx.send(welcome).await.is_err() {
        return;
    }

    let rng = SessionRng::from_random();
    info!("[{}] connected, rng seed {}", session_id, rng.seed());
    let session_task = tokio::spawn(run_session(
        session_id,
        GameSession::new(settings, rng),
        command_rx,
        update_tx.clone(),
        state.recorder.clone(),
    ));

    while let Some(result) = ws_receiver.next().await {
        let text = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!("[{}] socket error: {}", session_id, e);
                break;
            }
        };

        match serde_json::from_str::<ClientMessage>(text.as_str()) {
            Ok(command) => {
                if command_tx.send(command).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                let error = ServerMessage::Error {
                    message: format!("Unrecognised message: {}", e),
                };
                if update_tx.send(error).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(command_tx);
    drop(update_tx);
    check_task_exit(session_id, "session", session_task.await);
    check_task_exit(session_id, "send", send_task.await);
    info!("[{}] disconnected", session_id);
}

/// Logs a task that panicked or was cancelled. Returns whether it ended cleanly.
fn check_task_exit(session_id: SessionId, task: &str, result: Result<(), JoinError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("[{}] {} task failed: {}", session_id, task, e);
            false
        }
    }
}
