#[derive(Debug)]
pub enum RulesEngineError {
    /// The notation could not be parsed as a move.
    InvalidNotation(String),
    /// The move is not legal in the given position.
    IllegalMove(String),
    /// The stored position itself could not be read; this indicates
    /// corrupted state, not a bad request.
    InvalidPosition(String),
}

impl std::fmt::Display for RulesEngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesEngineError::InvalidNotation(msg) => write!(f, "Invalid notation: {}", msg),
            RulesEngineError::IllegalMove(msg) => write!(f, "Illegal move: {}", msg),
            RulesEngineError::InvalidPosition(msg) => write!(f, "Invalid position: {}", msg),
        }
    }
}

impl std::error::Error for RulesEngineError {}
