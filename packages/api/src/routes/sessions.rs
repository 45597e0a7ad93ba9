use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::game_session::GameSession;
use shared::models::requests::{EndSessionRequest, MoveRequest};
use shared::models::responses::{MoveResponse, PollResponse, SessionView};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions/{session_id}", get(get_session))
        .route("/sessions/{session_id}/poll", get(poll_session))
        .route("/sessions/{session_id}/move", patch(submit_move))
        .route("/sessions/{session_id}/end", patch(end_session))
}

async fn get_session(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let view = state
        .game_session_service
        .get_session_with_players(&session_id)
        .await?;

    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
struct PollParams {
    last_version: u64,
}

async fn poll_session(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(session_id): Path<String>,
    Query(params): Query<PollParams>,
) -> Result<Json<PollResponse>, ApiError> {
    let response = state
        .game_session_service
        .poll(&session_id, params.last_version)
        .await?;

    Ok(Json(response))
}

async fn submit_move(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(session_id): Path<String>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let response = state
        .move_service
        .submit_move(&session_id, &authenticated_user.user_id, &payload.notation)
        .await?;

    Ok(Json(response))
}

async fn end_session(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(session_id): Path<String>,
    Json(payload): Json<EndSessionRequest>,
) -> Result<Json<GameSession>, ApiError> {
    let session = state
        .termination_service
        .end_session_for_user(
            &session_id,
            &authenticated_user.user_id,
            payload.reason,
            payload.result,
        )
        .await?;

    Ok(Json(session))
}
