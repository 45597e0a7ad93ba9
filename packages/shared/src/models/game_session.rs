use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    White,
    Black,
}

impl Turn {
    pub fn opponent(&self) -> Turn {
        match self {
            Turn::White => Turn::Black,
            Turn::Black => Turn::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "1-0")]
    WhiteWins,
    #[serde(rename = "0-1")]
    BlackWins,
    #[serde(rename = "1/2-1/2")]
    Draw,
}

impl GameResult {
    /// The result in which `winner` takes the full point.
    pub fn win_for(winner: Turn) -> GameResult {
        match winner {
            Turn::White => GameResult::WhiteWins,
            Turn::Black => GameResult::BlackWins,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    Checkmate,
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
    Timeout,
    Resignation,
    DrawAgreement,
}

/// Authoritative server-side state of one two-player game.
///
/// `version` counts accepted moves and doubles as the optimistic-concurrency
/// token: every write to the session is conditioned on it. The invariants
/// maintained by the services are: `moves.len() == version`, `turn` is White
/// exactly when `version` is even, and nothing changes after `status`
/// becomes `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub session_id: String,
    pub white_player_id: String,
    pub black_player_id: String,
    pub moves: Vec<String>,
    pub fen: String,
    pub turn: Turn,
    pub version: u64,
    pub time_control_secs: u64,
    pub time_remaining_white: u64,
    pub time_remaining_black: u64,
    pub status: SessionStatus,
    pub result: Option<GameResult>,
    pub termination_reason: Option<TerminationReason>,
    pub ended_at: Option<DateTime<Utc>>,
    pub last_move_by: Option<String>,
    pub last_move_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(white_player_id: &str, black_player_id: &str, time_control_secs: u64) -> Self {
        GameSession {
            session_id: Uuid::new_v4().to_string(),
            white_player_id: white_player_id.to_string(),
            black_player_id: black_player_id.to_string(),
            moves: vec![],
            fen: STARTING_FEN.to_string(),
            turn: Turn::White,
            version: 0,
            time_control_secs,
            time_remaining_white: time_control_secs,
            time_remaining_black: time_control_secs,
            status: SessionStatus::Active,
            result: None,
            termination_reason: None,
            ended_at: None,
            last_move_by: None,
            last_move_at: None,
            created_at: Utc::now(),
        }
    }

    /// The seat assigned to `user_id`, if they are one of the two players.
    /// Seat resolution is by canonical id equality only.
    pub fn color_of(&self, user_id: &str) -> Option<Turn> {
        if self.white_player_id == user_id {
            Some(Turn::White)
        } else if self.black_player_id == user_id {
            Some(Turn::Black)
        } else {
            None
        }
    }

    pub fn time_remaining_for(&self, color: Turn) -> u64 {
        match color {
            Turn::White => self.time_remaining_white,
            Turn::Black => self.time_remaining_black,
        }
    }

    pub fn set_time_remaining(&mut self, color: Turn, secs: u64) {
        match color {
            Turn::White => self.time_remaining_white = secs,
            Turn::Black => self.time_remaining_black = secs,
        }
    }
}
