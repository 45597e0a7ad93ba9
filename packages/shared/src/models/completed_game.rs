use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::game_session::{GameResult, GameSession, TerminationReason};

/// What the downstream rating/statistics recorder receives once per
/// completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedGameRecord {
    pub session_id: String,
    pub white_player_id: String,
    pub black_player_id: String,
    pub result: GameResult,
    pub termination_reason: TerminationReason,
    pub time_control_secs: u64,
    pub move_count: u64,
    pub completed_at: DateTime<Utc>,
}

impl CompletedGameRecord {
    pub fn from_session(
        session: &GameSession,
        result: GameResult,
        reason: TerminationReason,
    ) -> Self {
        CompletedGameRecord {
            session_id: session.session_id.clone(),
            white_player_id: session.white_player_id.clone(),
            black_player_id: session.black_player_id.clone(),
            result,
            termination_reason: reason,
            time_control_secs: session.time_control_secs,
            move_count: session.version,
            completed_at: Utc::now(),
        }
    }
}
