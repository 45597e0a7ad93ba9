#[derive(Debug)]
pub enum RatingRecorderError {
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for RatingRecorderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingRecorderError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            RatingRecorderError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for RatingRecorderError {}
