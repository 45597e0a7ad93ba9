use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::responses::ErrorResponse;
use shared::services::errors::{
    auth_service_errors::AuthServiceError, challenge_service_errors::ChallengeServiceError,
    game_session_service_errors::GameSessionServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    AuthService(AuthServiceError),
    ChallengeService(ChallengeServiceError),
    GameSessionService(GameSessionServiceError),
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl From<ChallengeServiceError> for ApiError {
    fn from(error: ChallengeServiceError) -> Self {
        ApiError::ChallengeService(error)
    }
}

impl From<GameSessionServiceError> for ApiError {
    fn from(error: GameSessionServiceError) -> Self {
        ApiError::GameSessionService(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::AuthService(
                AuthServiceError::InvalidToken | AuthServiceError::ExpiredToken,
            ) => (StatusCode::UNAUTHORIZED, self.message()),
            ApiError::AuthService(AuthServiceError::ValidationError(_)) => {
                (StatusCode::BAD_REQUEST, self.message())
            }

            ApiError::ChallengeService(ChallengeServiceError::ChallengeNotFound) => {
                (StatusCode::NOT_FOUND, self.message())
            }
            ApiError::ChallengeService(ChallengeServiceError::DuplicateChallenge) => {
                (StatusCode::CONFLICT, self.message())
            }
            ApiError::ChallengeService(ChallengeServiceError::ValidationError(_)) => {
                (StatusCode::BAD_REQUEST, self.message())
            }
            ApiError::ChallengeService(ChallengeServiceError::RepositoryError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.message())
            }

            ApiError::GameSessionService(GameSessionServiceError::GameNotFound) => {
                (StatusCode::NOT_FOUND, self.message())
            }
            ApiError::GameSessionService(GameSessionServiceError::GameAlreadyCompleted) => {
                (StatusCode::CONFLICT, self.message())
            }
            ApiError::GameSessionService(GameSessionServiceError::NotParticipant) => {
                (StatusCode::FORBIDDEN, self.message())
            }
            ApiError::GameSessionService(
                GameSessionServiceError::NotYourTurn
                | GameSessionServiceError::InvalidMove(_)
                | GameSessionServiceError::StaleVersion
                | GameSessionServiceError::ValidationError(_),
            ) => (StatusCode::BAD_REQUEST, self.message()),
            ApiError::GameSessionService(
                GameSessionServiceError::RulesError(_)
                | GameSessionServiceError::RepositoryError(_),
            ) => (StatusCode::INTERNAL_SERVER_ERROR, self.message()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl ApiError {
    fn message(&self) -> String {
        match self {
            ApiError::AuthService(e) => e.to_string(),
            ApiError::ChallengeService(e) => e.to_string(),
            ApiError::GameSessionService(e) => e.to_string(),
        }
    }
}
