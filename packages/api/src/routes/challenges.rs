use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::requests::{RespondChallengeRequest, SendChallengeRequest};
use shared::models::responses::{RespondChallengeResponse, SendChallengeResponse};
use shared::services::challenge_service::ChallengeOutcome;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/challenges", post(send_challenge))
        .route(
            "/challenges/{challenge_id}",
            axum::routing::patch(respond_challenge).delete(cancel_challenge),
        )
}

async fn send_challenge(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<SendChallengeRequest>,
) -> Result<Json<SendChallengeResponse>, ApiError> {
    let challenge = state
        .challenge_service
        .send_challenge(
            &authenticated_user.user_id,
            &payload.challenged_id,
            payload.time_control_secs,
        )
        .await?;

    Ok(Json(SendChallengeResponse {
        challenge_id: challenge.challenge_id,
    }))
}

async fn respond_challenge(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(challenge_id): Path<String>,
    Json(payload): Json<RespondChallengeRequest>,
) -> Result<Json<RespondChallengeResponse>, ApiError> {
    let outcome = state
        .challenge_service
        .respond(&challenge_id, &authenticated_user.user_id, payload.decision)
        .await?;

    let session_id = match outcome {
        ChallengeOutcome::Accepted { session_id } => Some(session_id),
        ChallengeOutcome::Declined => None,
    };

    Ok(Json(RespondChallengeResponse { session_id }))
}

async fn cancel_challenge(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(challenge_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .challenge_service
        .cancel(&challenge_id, &authenticated_user.user_id)
        .await?;

    Ok(StatusCode::OK)
}
