use crate::repositories::errors::game_session_repository_errors::GameSessionRepositoryError;
use crate::services::errors::rules_engine_errors::RulesEngineError;

#[derive(Debug)]
pub enum GameSessionServiceError {
    GameNotFound,
    GameAlreadyCompleted,
    NotParticipant,
    NotYourTurn,
    /// Rejected by the rules engine.
    InvalidMove(String),
    /// Lost the optimistic-concurrency race; the caller must reload and may
    /// resubmit only if it is still their turn.
    StaleVersion,
    ValidationError(String),
    RulesError(String),
    RepositoryError(String),
}

impl std::fmt::Display for GameSessionServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameSessionServiceError::GameNotFound => write!(f, "Game session not found"),
            GameSessionServiceError::GameAlreadyCompleted => {
                write!(f, "Game session is already completed")
            }
            GameSessionServiceError::NotParticipant => {
                write!(f, "User is not a participant in this session")
            }
            GameSessionServiceError::NotYourTurn => write!(f, "It is not your turn"),
            GameSessionServiceError::InvalidMove(msg) => write!(f, "Invalid move: {}", msg),
            GameSessionServiceError::StaleVersion => {
                write!(f, "Session changed concurrently; reload and retry")
            }
            GameSessionServiceError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            GameSessionServiceError::RulesError(msg) => write!(f, "Rules engine error: {}", msg),
            GameSessionServiceError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GameSessionServiceError {}

impl From<GameSessionRepositoryError> for GameSessionServiceError {
    fn from(err: GameSessionRepositoryError) -> Self {
        match err {
            GameSessionRepositoryError::VersionConflict => GameSessionServiceError::StaleVersion,
            other => GameSessionServiceError::RepositoryError(other.to_string()),
        }
    }
}

impl From<RulesEngineError> for GameSessionServiceError {
    fn from(err: RulesEngineError) -> Self {
        match err {
            RulesEngineError::IllegalMove(msg) | RulesEngineError::InvalidNotation(msg) => {
                GameSessionServiceError::InvalidMove(msg)
            }
            RulesEngineError::InvalidPosition(msg) => GameSessionServiceError::RulesError(msg),
        }
    }
}
