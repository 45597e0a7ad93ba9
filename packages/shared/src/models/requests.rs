use serde::{Deserialize, Serialize};

use crate::models::game_session::{GameResult, TerminationReason};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendChallengeRequest {
    pub challenged_id: String,
    pub time_control_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeDecision {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondChallengeRequest {
    pub decision: ChallengeDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Coordinate notation: source and destination squares plus an optional
    /// promotion piece, e.g. "e2e4" or "a7a8q".
    pub notation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndSessionRequest {
    pub reason: TerminationReason,
    /// The result is derived server-side from the reason; when supplied it
    /// must match, otherwise the request is rejected.
    pub result: Option<GameResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_deserializes_lowercase() {
        let accept: ChallengeDecision = serde_json::from_str("\"accept\"").unwrap();
        let decline: ChallengeDecision = serde_json::from_str("\"decline\"").unwrap();

        assert_eq!(accept, ChallengeDecision::Accept);
        assert_eq!(decline, ChallengeDecision::Decline);
    }

    #[test]
    fn test_end_request_result_is_optional() {
        let raw = r#"{"reason":"resignation"}"#;
        let request: EndSessionRequest = serde_json::from_str(raw).unwrap();

        assert_eq!(request.reason, TerminationReason::Resignation);
        assert!(request.result.is_none());
    }
}
