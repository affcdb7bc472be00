use common::SessionId;
use common::games::snake::{GameOverReport, GameSession, TickOutcome};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::protocol::{ClientMessage, ServerMessage};

/// Receives each finished game exactly once. Implementations must not block:
/// the session loop calls this inline between ticks.
pub trait GameOverSink: Send + Sync + Clone + 'static {
    fn record_game_over(&self, report: GameOverReport);
}

/// Drives one session until the client stops it or goes away.
///
/// Commands and ticks are handled by the same loop, so a tick always sees the
/// direction and food left by the last complete command. The tick timer only
/// exists while the game is running.
pub async fn run_session<TSink: GameOverSink>(
    session_id: SessionId,
    mut session: GameSession,
    mut commands: mpsc::Receiver<ClientMessage>,
    updates: mpsc::Sender<ServerMessage>,
    sink: TSink,
) {
    let tick_interval = session.settings().tick_interval;
    let mut ticker: Option<Interval> = None;

    if !send_state(&updates, &session).await {
        return;
    }

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("[{}] command channel closed", session_id);
                    break;
                };

                if let ClientMessage::Stop = command {
                    info!("[{}] stopped by client", session_id);
                    break;
                }

                if let Err(message) = apply_command(&mut session, command) {
                    if updates.send(ServerMessage::Error { message }).await.is_err() {
                        break;
                    }
                    continue;
                }

                if session.is_running() && ticker.is_none() {
                    let mut new_ticker = interval_at(Instant::now() + tick_interval, tick_interval);
                    new_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    ticker = Some(new_ticker);
                }

                if !send_state(&updates, &session).await {
                    break;
                }
            }
            _ = next_tick(&mut ticker) => {
                match session.tick() {
                    TickOutcome::Idle => continue,
                    TickOutcome::GameOver(report) => {
                        ticker = None;
                        sink.record_game_over(report);
                    }
                    TickOutcome::Advanced | TickOutcome::AteFood => {}
                }

                if !send_state(&updates, &session).await {
                    break;
                }
            }
        }
    }
}

fn apply_command(session: &mut GameSession, command: ClientMessage) -> Result<(), String> {
    match command {
        ClientMessage::Start { player_name } => {
            session.submit_name(&player_name).map_err(|e| e.to_string())?;
        }
        ClientMessage::Turn { direction } => {
            session.steer(direction);
        }
        ClientMessage::Restart => {
            session.restart();
        }
        ClientMessage::Stop => {}
    }
    Ok(())
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn send_state(updates: &mpsc::Sender<ServerMessage>, session: &GameSession) -> bool {
    updates
        .send(ServerMessage::State {
            snapshot: session.snapshot(),
        })
        .await
        .is_ok()
}
