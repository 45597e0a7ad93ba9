use serde::{Deserialize, Serialize};

use crate::models::game_session::{GameSession, Turn};
use crate::models::user::PlayerSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendChallengeResponse {
    pub challenge_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondChallengeResponse {
    /// Present only when the challenge was accepted.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub version: u64,
    pub turn: Turn,
}

/// Poll result: either the full current session (the client replaces its
/// local state wholesale) or a bare no-update signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResponse {
    pub has_updates: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<GameSession>,
}

impl PollResponse {
    pub fn no_update() -> Self {
        PollResponse {
            has_updates: false,
            session: None,
        }
    }

    pub fn updated(session: GameSession) -> Self {
        PollResponse {
            has_updates: true,
            session: Some(session),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: GameSession,
    pub white_player: PlayerSummary,
    pub black_player: PlayerSummary,
}
