#[derive(Debug)]
pub enum ChallengeRepositoryError {
    /// The challenge was not in the state the write required (it is no
    /// longer pending, or the transaction was cancelled).
    StateConflict,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for ChallengeRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChallengeRepositoryError::StateConflict => {
                write!(f, "Challenge is no longer in the required state")
            }
            ChallengeRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ChallengeRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for ChallengeRepositoryError {}
