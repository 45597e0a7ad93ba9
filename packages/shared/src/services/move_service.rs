use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::game_session::{GameResult, SessionStatus, TerminationReason};
use crate::models::responses::MoveResponse;
use crate::repositories::game_session_repository::GameSessionRepository;
use crate::services::clock;
use crate::services::errors::game_session_service_errors::GameSessionServiceError;
use crate::services::rules_engine::{RulesEngine, TerminalPosition};
use crate::services::termination_service::TerminationService;

/// Accepts moves: turn ownership, rules-engine legality, clock deduction,
/// and the version-conditioned write, in that order. The resulting position
/// is always derived server-side from the stored position and the move;
/// nothing a client sends beyond the notation is trusted.
#[derive(Clone)]
pub struct MoveService {
    sessions: Arc<dyn GameSessionRepository + Send + Sync>,
    rules: Arc<dyn RulesEngine + Send + Sync>,
    termination: TerminationService,
}

impl MoveService {
    pub fn new(
        sessions: Arc<dyn GameSessionRepository + Send + Sync>,
        rules: Arc<dyn RulesEngine + Send + Sync>,
        termination: TerminationService,
    ) -> Self {
        MoveService {
            sessions,
            rules,
            termination,
        }
    }

    pub async fn submit_move(
        &self,
        session_id: &str,
        acting_user_id: &str,
        notation: &str,
    ) -> Result<MoveResponse, GameSessionServiceError> {
        self.submit_move_at(session_id, acting_user_id, notation, Utc::now())
            .await
    }

    pub(crate) async fn submit_move_at(
        &self,
        session_id: &str,
        acting_user_id: &str,
        notation: &str,
        now: DateTime<Utc>,
    ) -> Result<MoveResponse, GameSessionServiceError> {
        let session = self
            .sessions
            .get_game_session(session_id)
            .await?
            .ok_or(GameSessionServiceError::GameNotFound)?;

        if session.status != SessionStatus::Active {
            return Err(GameSessionServiceError::GameAlreadyCompleted);
        }

        let color = session
            .color_of(acting_user_id)
            .ok_or(GameSessionServiceError::NotParticipant)?;

        if color != session.turn {
            return Err(GameSessionServiceError::NotYourTurn);
        }

        let new_fen = self.rules.apply_move(&session.fen, notation)?;

        let moved_since = session.last_move_at.unwrap_or(session.created_at);
        let elapsed = clock::elapsed_secs(moved_since, now);
        let previous_clock = session.time_remaining_for(color);
        let flagged = clock::is_flagged(previous_clock, elapsed);

        let mut updated = session.clone();
        updated.moves.push(notation.to_string());
        updated.fen = new_fen;
        updated.turn = color.opponent();
        updated.version += 1;
        updated.set_time_remaining(color, clock::deduct(previous_clock, elapsed));
        updated.last_move_by = Some(acting_user_id.to_string());
        updated.last_move_at = Some(now);

        // Single conditional write: either the whole move lands, version
        // increment included, or nothing does.
        self.sessions
            .update_game_session(&updated, session.version)
            .await?;

        tracing::info!(
            session_id = %updated.session_id,
            version = updated.version,
            notation,
            "move accepted"
        );

        if flagged {
            // The move is recorded, but the flag fell while it was being
            // made; the opponent takes the game.
            self.termination
                .end_session(
                    session_id,
                    GameResult::win_for(color.opponent()),
                    TerminationReason::Timeout,
                )
                .await?;
        } else {
            match self.rules.terminal_state(&updated.fen)? {
                Some(TerminalPosition::Checkmate) => {
                    self.termination
                        .end_session(
                            session_id,
                            GameResult::win_for(color),
                            TerminationReason::Checkmate,
                        )
                        .await?;
                }
                Some(TerminalPosition::Stalemate) => {
                    self.termination
                        .end_session(session_id, GameResult::Draw, TerminationReason::Stalemate)
                        .await?;
                }
                None => {}
            }
        }

        Ok(MoveResponse {
            version: updated.version,
            turn: updated.turn,
        })
    }
}
