use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
    routing::{get, post},
};
use common::SessionId;
use common::games::snake::SnakeSessionSettings;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing::info;

use crate::api::save_score;
use crate::scores::ScoreRecorder;
use crate::ws_handler::handle_websocket;

#[derive(Clone)]
pub struct AppState {
    pub recorder: ScoreRecorder,
    pub game_settings: SnakeSessionSettings,
    session_counter: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(recorder: ScoreRecorder, game_settings: SnakeSessionSettings) -> Self {
        Self {
            recorder,
            game_settings,
            session_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn next_session_id(&self) -> SessionId {
        SessionId::new(self.session_counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

pub fn build_router(state: AppState, static_files_path: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/saveScore", post(save_score))
        .route("/ws", get(ws_upgrade_handler))
        .route("/health", get(health))
        .fallback_service(ServeDir::new(static_files_path))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Web server listening on {}", addr);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> &'static str {
    "OK"
}

async fn ws_upgrade_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}
