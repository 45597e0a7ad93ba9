use std::sync::Arc;

use chrono::Utc;

use crate::models::completed_game::CompletedGameRecord;
use crate::models::game_session::{
    GameResult, GameSession, SessionStatus, TerminationReason,
};
use crate::repositories::errors::game_session_repository_errors::GameSessionRepositoryError;
use crate::repositories::game_session_repository::GameSessionRepository;
use crate::repositories::rating_recorder::RatingRecorder;
use crate::services::errors::game_session_service_errors::GameSessionServiceError;

/// Retries for a finalize write racing a concurrent move. Each retry
/// reloads; a session found completed is a no-op.
const MAX_FINALIZE_ATTEMPTS: u32 = 3;

/// Finalizes sessions. The one rule here is idempotency: a session reaches
/// `Completed` exactly once, the stored result is never overwritten, and
/// the rating recorder fires exactly once per completion.
#[derive(Clone)]
pub struct TerminationService {
    sessions: Arc<dyn GameSessionRepository + Send + Sync>,
    recorder: Arc<dyn RatingRecorder + Send + Sync>,
}

impl TerminationService {
    pub fn new(
        sessions: Arc<dyn GameSessionRepository + Send + Sync>,
        recorder: Arc<dyn RatingRecorder + Send + Sync>,
    ) -> Self {
        TerminationService { sessions, recorder }
    }

    /// Mark the session completed with `result` and `reason`. If it is
    /// already completed this is a no-op returning the stored session.
    pub async fn end_session(
        &self,
        session_id: &str,
        result: GameResult,
        reason: TerminationReason,
    ) -> Result<GameSession, GameSessionServiceError> {
        for _ in 0..MAX_FINALIZE_ATTEMPTS {
            let session = self
                .sessions
                .get_game_session(session_id)
                .await?
                .ok_or(GameSessionServiceError::GameNotFound)?;

            if session.status == SessionStatus::Completed {
                return Ok(session);
            }

            let mut updated = session.clone();
            updated.status = SessionStatus::Completed;
            updated.result = Some(result);
            updated.termination_reason = Some(reason);
            updated.ended_at = Some(Utc::now());

            match self
                .sessions
                .update_game_session(&updated, session.version)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        session_id = %updated.session_id,
                        ?reason,
                        "session completed"
                    );
                    self.dispatch_rating_record(&updated, result, reason);
                    return Ok(updated);
                }
                // A move landed between our read and write; reload and
                // re-evaluate rather than overwrite.
                Err(GameSessionRepositoryError::VersionConflict) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(GameSessionServiceError::StaleVersion)
    }

    /// Participant-initiated termination: resignation and agreed draws
    /// only. Every other reason is a rules or clock fact the server derives
    /// itself during move processing; accepting one on a client's bare
    /// assertion would let a losing player end any game on their own terms.
    pub async fn end_session_for_user(
        &self,
        session_id: &str,
        acting_user_id: &str,
        reason: TerminationReason,
        requested_result: Option<GameResult>,
    ) -> Result<GameSession, GameSessionServiceError> {
        let session = self
            .sessions
            .get_game_session(session_id)
            .await?
            .ok_or(GameSessionServiceError::GameNotFound)?;

        let color = session
            .color_of(acting_user_id)
            .ok_or(GameSessionServiceError::NotParticipant)?;

        if session.status == SessionStatus::Completed {
            return Ok(session);
        }

        let result = match reason {
            TerminationReason::Resignation => GameResult::win_for(color.opponent()),
            TerminationReason::DrawAgreement => GameResult::Draw,
            TerminationReason::Checkmate
            | TerminationReason::Stalemate
            | TerminationReason::Timeout
            | TerminationReason::ThreefoldRepetition
            | TerminationReason::InsufficientMaterial
            | TerminationReason::FiftyMoveRule => {
                return Err(GameSessionServiceError::ValidationError(format!(
                    "reason {:?} is determined by the server, not the client",
                    reason
                )))
            }
        };

        if let Some(requested) = requested_result {
            if requested != result {
                return Err(GameSessionServiceError::ValidationError(
                    "requested result does not match the outcome for this reason".to_string(),
                ));
            }
        }

        self.end_session(session_id, result, reason).await
    }

    fn dispatch_rating_record(
        &self,
        session: &GameSession,
        result: GameResult,
        reason: TerminationReason,
    ) {
        let record = CompletedGameRecord::from_session(session, result, reason);
        let recorder = Arc::clone(&self.recorder);
        tokio::spawn(async move {
            if let Err(e) = recorder.record_completed_game(&record).await {
                tracing::warn!(
                    session_id = %record.session_id,
                    error = %e,
                    "failed to record completed game"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::in_memory::InMemoryStore;
    use crate::repositories::rating_recorder::MockRatingRecorder;

    fn service_with_store() -> (TerminationService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let mut recorder = MockRatingRecorder::new();
        recorder
            .expect_record_completed_game()
            .returning(|_| Box::pin(async { Ok(()) }));
        let service = TerminationService::new(store.clone(), Arc::new(recorder));
        (service, store)
    }

    #[tokio::test]
    async fn test_resignation_awards_opponent() {
        let (service, store) = service_with_store();
        let session = GameSession::new("white", "black", 600);
        store.put_session(session.clone());

        let ended = service
            .end_session_for_user(
                &session.session_id,
                "white",
                TerminationReason::Resignation,
                None,
            )
            .await
            .unwrap();

        assert_eq!(ended.status, SessionStatus::Completed);
        assert_eq!(ended.result, Some(GameResult::BlackWins));
        assert_eq!(ended.termination_reason, Some(TerminationReason::Resignation));
        assert!(ended.ended_at.is_some());
    }

    #[tokio::test]
    async fn test_second_end_is_noop_preserving_result() {
        let (service, store) = service_with_store();
        let session = GameSession::new("white", "black", 600);
        store.put_session(session.clone());

        service
            .end_session_for_user(
                &session.session_id,
                "white",
                TerminationReason::Resignation,
                None,
            )
            .await
            .unwrap();

        // Black "resigns" afterwards; the stored result must not flip.
        let second = service
            .end_session_for_user(
                &session.session_id,
                "black",
                TerminationReason::Resignation,
                None,
            )
            .await
            .unwrap();

        assert_eq!(second.result, Some(GameResult::BlackWins));
        assert_eq!(
            store.session(&session.session_id).unwrap().result,
            Some(GameResult::BlackWins)
        );
    }

    #[tokio::test]
    async fn test_draw_agreement_is_a_draw() {
        let (service, store) = service_with_store();
        let session = GameSession::new("white", "black", 600);
        store.put_session(session.clone());

        let ended = service
            .end_session_for_user(
                &session.session_id,
                "black",
                TerminationReason::DrawAgreement,
                None,
            )
            .await
            .unwrap();

        assert_eq!(ended.result, Some(GameResult::Draw));
    }

    #[tokio::test]
    async fn test_non_participant_cannot_end() {
        let (service, store) = service_with_store();
        let session = GameSession::new("white", "black", 600);
        store.put_session(session.clone());

        let result = service
            .end_session_for_user(
                &session.session_id,
                "mallory",
                TerminationReason::Resignation,
                None,
            )
            .await;

        assert!(matches!(
            result,
            Err(GameSessionServiceError::NotParticipant)
        ));
    }

    #[tokio::test]
    async fn test_server_derived_reasons_rejected_from_users() {
        let (service, store) = service_with_store();
        let session = GameSession::new("white", "black", 600);
        store.put_session(session.clone());

        for reason in [
            TerminationReason::Checkmate,
            TerminationReason::Stalemate,
            TerminationReason::Timeout,
            TerminationReason::ThreefoldRepetition,
            TerminationReason::InsufficientMaterial,
            TerminationReason::FiftyMoveRule,
        ] {
            let result = service
                .end_session_for_user(&session.session_id, "white", reason, None)
                .await;
            assert!(matches!(
                result,
                Err(GameSessionServiceError::ValidationError(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_false_draw_claim_does_not_end_the_game() {
        let (service, store) = service_with_store();
        let session = GameSession::new("white", "black", 600);
        store.put_session(session.clone());

        // No game reaches the fifty-move rule at move zero; a bare claim
        // must not turn an active game into a draw.
        let result = service
            .end_session_for_user(
                &session.session_id,
                "white",
                TerminationReason::FiftyMoveRule,
                None,
            )
            .await;

        assert!(matches!(
            result,
            Err(GameSessionServiceError::ValidationError(_))
        ));
        let stored = store.session(&session.session_id).unwrap();
        assert_eq!(stored.status, SessionStatus::Active);
        assert!(stored.result.is_none());
        assert!(stored.termination_reason.is_none());
    }

    #[tokio::test]
    async fn test_mismatched_requested_result_rejected() {
        let (service, store) = service_with_store();
        let session = GameSession::new("white", "black", 600);
        store.put_session(session.clone());

        let result = service
            .end_session_for_user(
                &session.session_id,
                "white",
                TerminationReason::Resignation,
                Some(GameResult::WhiteWins),
            )
            .await;

        assert!(matches!(
            result,
            Err(GameSessionServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_end_unknown_session() {
        let (service, _store) = service_with_store();

        let result = service
            .end_session("missing", GameResult::Draw, TerminationReason::DrawAgreement)
            .await;

        assert!(matches!(result, Err(GameSessionServiceError::GameNotFound)));
    }
}
