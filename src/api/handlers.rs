//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::{
    state::{DismissOutcome, SettingsCandidate},
    tasks::SessionEvent,
};

use super::{
    responses::{ApiResponse, ConfirmRequest, HealthResponse, StatusResponse},
    ControlState,
};

type Rejection = (StatusCode, Json<ApiResponse>);

fn queue_full() -> Rejection {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiResponse::error("Session queue is full or closed")),
    )
}

fn session_gone() -> Rejection {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error("Session ended before answering")),
    )
}

/// Queue an event that needs no answer
fn post(
    state: &ControlState,
    event: SessionEvent,
    message: &str,
) -> Result<Json<ApiResponse>, Rejection> {
    if state.events.post(event) {
        info!("Control surface: {}", message);
        Ok(Json(ApiResponse::accepted(message)))
    } else {
        Err(queue_full())
    }
}

/// Queue an event carrying a reply channel and wait for the session's answer
async fn ask<T>(
    state: &ControlState,
    make_event: impl FnOnce(oneshot::Sender<T>) -> SessionEvent,
) -> Result<T, Rejection> {
    let (reply, answer) = oneshot::channel();
    if !state.events.post(make_event(reply)) {
        return Err(queue_full());
    }
    answer.await.map_err(|_| {
        error!("Session dropped a reply channel");
        session_gone()
    })
}

/// Handle POST /control/show - tray "show"
pub async fn show_control_handler(
    State(state): State<Arc<ControlState>>,
) -> Result<Json<ApiResponse>, Rejection> {
    post(&state, SessionEvent::ShowControl, "Show control window")
}

/// Handle POST /settings/open - tray "settings"
pub async fn open_settings_handler(
    State(state): State<Arc<ControlState>>,
) -> Result<Json<ApiResponse>, Rejection> {
    post(&state, SessionEvent::OpenSettings, "Open settings")
}

/// Handle POST /reminder/show - show now or focus the open reminder
pub async fn show_reminder_handler(
    State(state): State<Arc<ControlState>>,
) -> Result<Json<ApiResponse>, Rejection> {
    post(&state, SessionEvent::ShowReminder, "Show reminder")
}

/// Handle POST /exit - tray "exit"
pub async fn exit_handler(
    State(state): State<Arc<ControlState>>,
) -> Result<Json<ApiResponse>, Rejection> {
    post(&state, SessionEvent::Quit, "Exit requested")
}

/// Handle PUT /settings - validate and apply a full settings candidate
pub async fn apply_settings_handler(
    State(state): State<Arc<ControlState>>,
    Json(candidate): Json<SettingsCandidate>,
) -> Result<Json<ApiResponse>, Rejection> {
    match ask(&state, |reply| SessionEvent::ApplySettings { candidate, reply }).await? {
        Ok(()) => Ok(Json(ApiResponse::ok("Settings saved and applied"))),
        Err(e) => {
            warn!("Settings rejected from control surface: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::invalid(e.field(), e.to_string())),
            ))
        }
    }
}

/// Handle POST /reminder/dismiss - may answer `confirm_required`
pub async fn dismiss_handler(
    State(state): State<Arc<ControlState>>,
) -> Result<Json<DismissOutcome>, Rejection> {
    ask(&state, |reply| SessionEvent::DismissReminder { reply })
        .await
        .map(Json)
}

/// Handle POST /reminder/confirm - answer to the quick-close question
pub async fn confirm_handler(
    State(state): State<Arc<ControlState>>,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<DismissOutcome>, Rejection> {
    ask(&state, |reply| SessionEvent::QuickCloseAnswer {
        close: request.close,
        reply,
    })
    .await
    .map(Json)
}

/// Handle GET /status - current session snapshot
pub async fn status_handler(State(state): State<Arc<ControlState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        session: state.status.borrow().clone(),
        tooltip: state.tooltip(),
        tray_icon: state.tray_icon().map(|path| path.to_path_buf()),
        uptime: state.uptime(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
