use crate::repositories::errors::challenge_repository_errors::ChallengeRepositoryError;

#[derive(Debug)]
pub enum ChallengeServiceError {
    /// No pending challenge matches the id and caller.
    ChallengeNotFound,
    /// A pending challenge already exists between these two users.
    DuplicateChallenge,
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for ChallengeServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChallengeServiceError::ChallengeNotFound => write!(f, "Challenge not found"),
            ChallengeServiceError::DuplicateChallenge => {
                write!(f, "A pending challenge already exists between these users")
            }
            ChallengeServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ChallengeServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ChallengeServiceError {}

impl From<ChallengeRepositoryError> for ChallengeServiceError {
    fn from(err: ChallengeRepositoryError) -> Self {
        match err {
            // A write that found the challenge no longer pending means the
            // caller's view was stale; surface it as not-found.
            ChallengeRepositoryError::StateConflict => ChallengeServiceError::ChallengeNotFound,
            other => ChallengeServiceError::RepositoryError(other.to_string()),
        }
    }
}
