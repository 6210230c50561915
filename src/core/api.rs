//! HTTP + WebSocket API for remote mood UIs
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get presentation state
//! - POST /session/{id}/analyze - Analyze text
//! - POST /session/{id}/flourish/clear - Hide the flourish now
//! - WS /ws/{id} - Live state updates
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::core::{LexiconScorer, MoodPresenter};
use crate::error::{MoodError, Result};
use crate::types::{MoodPresentation, PresentationState};

/// Session state
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub presenter: MoodPresenter<LexiconScorer>,
    pub update_tx: broadcast::Sender<PresentationState>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    pub config: Config,
    next_session: AtomicU64,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Analyze response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub presentation: MoodPresentation,
    pub score: Option<f64>,
    pub show_flourish: bool,
    pub analysis_count: u64,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router(config: Config) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        config,
        next_session: AtomicU64::new(1),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/analyze", post(analyze))
        .route("/session/:id/flourish/clear", post(clear_flourish))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(State(state): State<Arc<AppState>>) -> Json<NewSessionResponse> {
    let seq = state.next_session.fetch_add(1, Ordering::Relaxed);
    let session_id = generate_session_id(seq);
    let (tx, _) = broadcast::channel(100);

    let mut presenter = MoodPresenter::new(LexiconScorer::with_damping(state.config.scorer.damping))
        .with_timer(state.config.flourish_duration(), state.config.hide_policy);
    let observer_tx = tx.clone();
    presenter.subscribe(move |s| {
        // No subscribers is fine
        let _ = observer_tx.send(s.clone());
    });

    let session = Session {
        id: session_id.clone(),
        presenter,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, "session created");

    Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
    })
}

/// Get presentation state
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> std::result::Result<Json<PresentationState>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| not_found(&id))?;
    Ok(Json(session.presenter.state().clone()))
}

/// Analyze text for a session
async fn analyze(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AnalyzeRequest>,
) -> std::result::Result<Json<AnalyzeResponse>, StatusCode> {
    let response = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(&id))?;

        let (presentation, score) = session.presenter.analyze_with_score(&req.text);
        let current = session.presenter.state();
        AnalyzeResponse {
            presentation,
            score: score.value,
            show_flourish: current.show_flourish,
            analysis_count: current.analysis_count,
        }
    };

    schedule_hide(Arc::clone(&state), id, state.config.flourish_duration());
    Ok(Json(response))
}

/// Hide the flourish immediately
async fn clear_flourish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> std::result::Result<Json<PresentationState>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| not_found(&id))?;
    session.presenter.clear_flourish();
    Ok(Json(session.presenter.state().clone()))
}

/// Let the presenter's timer fire once the flourish duration has passed
fn schedule_hide(state: Arc<AppState>, id: String, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut sessions = state.sessions.write().await;
        if let Some(session) = sessions.get_mut(&id) {
            let fired = session.presenter.poll();
            debug!(session = %id, fired, "flourish timer polled");
        }
    });
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> std::result::Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| not_found(&id))?;
    let rx = session.update_tx.subscribe();
    let initial = session.presenter.state().clone();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, initial, rx).await;
    }))
}

/// Push the current state, then every update until either side goes away
async fn handle_websocket(
    socket: WebSocket,
    initial: PresentationState,
    mut rx: broadcast::Receiver<PresentationState>,
) {
    let (mut sender, mut receiver) = socket.split();

    if let Some(json) = encode_state(&initial) {
        if sender.send(Message::Text(json)).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            update = rx.recv() => {
                let update = match update {
                    Ok(update) => update,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "websocket client lagging");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let Some(json) = encode_state(&update) else {
                    continue;
                };
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

/// State as a JSON text frame; a failure is logged and the frame skipped
fn encode_state(state: &PresentationState) -> Option<String> {
    match serde_json::to_string(state) {
        Ok(json) => Some(json),
        Err(e) => {
            error!(error = %e, "failed to encode state for websocket");
            None
        }
    }
}

fn not_found(id: &str) -> StatusCode {
    warn!(session = %id, "unknown session");
    StatusCode::NOT_FOUND
}

/// Generate session ID
fn generate_session_id(seq: u64) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    format!("session_{:x}_{}", nanos, seq)
}

/// Run the API server
pub async fn run_server(config: Config) -> Result<()> {
    let addr = config.server.addr.clone();
    let server_err = |source| MoodError::Server { addr: addr.clone(), source };

    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(server_err)?;
    info!(%addr, "server listening");
    println!("😊 Mood Detector API running on {}", addr);
    println!("  POST /session/new                - Create session");
    println!("  GET  /session/:id                - Get state");
    println!("  POST /session/:id/analyze        - Analyze text");
    println!("  POST /session/:id/flourish/clear - Hide flourish");
    println!("  WS   /ws/:id                     - Live updates");
    println!("  GET  /health                     - Health check");
    axum::serve(listener, router).await.map_err(server_err)?;
    Ok(())
}
