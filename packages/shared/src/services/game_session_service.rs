use std::sync::Arc;

use crate::models::game_session::GameSession;
use crate::models::responses::{PollResponse, SessionView};
use crate::models::user::PlayerSummary;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::game_session_repository::GameSessionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::game_session_service_errors::GameSessionServiceError;

/// Read side of the subsystem: session lookup and the polling protocol.
/// Nothing here mutates a session.
#[derive(Clone)]
pub struct GameSessionService {
    sessions: Arc<dyn GameSessionRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl GameSessionService {
    pub fn new(
        sessions: Arc<dyn GameSessionRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        GameSessionService { sessions, users }
    }

    pub async fn get_session(
        &self,
        session_id: &str,
    ) -> Result<GameSession, GameSessionServiceError> {
        self.sessions
            .get_game_session(session_id)
            .await?
            .ok_or(GameSessionServiceError::GameNotFound)
    }

    /// The session plus both players' public summaries, for the initial
    /// page load of a game view.
    pub async fn get_session_with_players(
        &self,
        session_id: &str,
    ) -> Result<SessionView, GameSessionServiceError> {
        let session = self.get_session(session_id).await?;

        let white_player = self.summary_for(&session.white_player_id).await?;
        let black_player = self.summary_for(&session.black_player_id).await?;

        Ok(SessionView {
            session,
            white_player,
            black_player,
        })
    }

    /// Polling endpoint. Returns the full session when the server has
    /// anything newer than `last_version_seen`, so the response is
    /// idempotent and safe to apply out of order: a client always replaces
    /// its local state wholesale with a higher-versioned snapshot.
    pub async fn poll(
        &self,
        session_id: &str,
        last_version_seen: u64,
    ) -> Result<PollResponse, GameSessionServiceError> {
        let session = self.get_session(session_id).await?;

        if session.version > last_version_seen {
            Ok(PollResponse::updated(session))
        } else {
            Ok(PollResponse::no_update())
        }
    }

    async fn summary_for(&self, user_id: &str) -> Result<PlayerSummary, GameSessionServiceError> {
        self.users
            .get_player_summary(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => GameSessionServiceError::RepositoryError(
                    format!("player {} missing from users table", user_id),
                ),
                other => GameSessionServiceError::RepositoryError(other.to_string()),
            })
    }
}
