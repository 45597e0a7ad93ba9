#[derive(Debug)]
pub enum GameSessionRepositoryError {
    /// The conditional write lost: the stored version differed from the
    /// expected one, or the session was no longer active.
    VersionConflict,
    /// A session with this id already exists.
    AlreadyExists,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for GameSessionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameSessionRepositoryError::VersionConflict => {
                write!(f, "Conditional update failed: version conflict")
            }
            GameSessionRepositoryError::AlreadyExists => {
                write!(f, "Session already exists")
            }
            GameSessionRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            GameSessionRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for GameSessionRepositoryError {}
