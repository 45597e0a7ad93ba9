use std::sync::Arc;

use chrono::Utc;

use crate::models::challenge::{Challenge, ChallengeStatus};
use crate::models::game_session::GameSession;
use crate::models::requests::ChallengeDecision;
use crate::repositories::challenge_repository::ChallengeRepository;
use crate::services::errors::challenge_service_errors::ChallengeServiceError;

/// Pending invitations between two users. A challenge is mutated only by
/// the challenged user's response or the challenger's cancellation, and
/// never after leaving `Pending`.
#[derive(Clone)]
pub struct ChallengeService {
    challenges: Arc<dyn ChallengeRepository + Send + Sync>,
}

pub enum ChallengeOutcome {
    Declined,
    /// The challenge was accepted and this session was created with it.
    Accepted { session_id: String },
}

impl ChallengeService {
    pub fn new(challenges: Arc<dyn ChallengeRepository + Send + Sync>) -> Self {
        ChallengeService { challenges }
    }

    pub async fn send_challenge(
        &self,
        challenger_id: &str,
        challenged_id: &str,
        time_control_secs: u64,
    ) -> Result<Challenge, ChallengeServiceError> {
        if challenger_id == challenged_id {
            return Err(ChallengeServiceError::ValidationError(
                "Cannot challenge yourself".to_string(),
            ));
        }
        if time_control_secs == 0 {
            return Err(ChallengeServiceError::ValidationError(
                "Time control must be positive".to_string(),
            ));
        }

        let pair_key = Challenge::pair_key(challenger_id, challenged_id);
        if self
            .challenges
            .find_pending_by_pair(&pair_key)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?
            .is_some()
        {
            return Err(ChallengeServiceError::DuplicateChallenge);
        }

        let challenge = Challenge::new(challenger_id, challenged_id, time_control_secs);
        self.challenges
            .create_challenge(&challenge)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?;

        tracing::info!(
            challenge_id = %challenge.challenge_id,
            challenger_id,
            challenged_id,
            "challenge sent"
        );
        Ok(challenge)
    }

    /// Respond as the challenged user. On accept, the challenger takes
    /// White, the responder takes Black, both clocks are seeded from the
    /// challenge's time control, and the accepted challenge and the new
    /// session are committed atomically.
    pub async fn respond(
        &self,
        challenge_id: &str,
        responder_id: &str,
        decision: ChallengeDecision,
    ) -> Result<ChallengeOutcome, ChallengeServiceError> {
        let challenge = self
            .challenges
            .get_challenge(challenge_id)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?
            .filter(|c| c.challenged_id == responder_id && c.status == ChallengeStatus::Pending)
            .ok_or(ChallengeServiceError::ChallengeNotFound)?;

        match decision {
            ChallengeDecision::Decline => {
                let mut declined = challenge.clone();
                declined.status = ChallengeStatus::Declined;
                declined.responded_at = Some(Utc::now());
                self.challenges.update_pending_challenge(&declined).await?;
                Ok(ChallengeOutcome::Declined)
            }
            ChallengeDecision::Accept => {
                let session = GameSession::new(
                    &challenge.challenger_id,
                    &challenge.challenged_id,
                    challenge.time_control_secs,
                );

                let mut accepted = challenge.clone();
                accepted.status = ChallengeStatus::Accepted;
                accepted.responded_at = Some(Utc::now());
                accepted.session_id = Some(session.session_id.clone());

                self.challenges.accept_challenge(&accepted, &session).await?;

                tracing::info!(
                    challenge_id = %accepted.challenge_id,
                    session_id = %session.session_id,
                    "challenge accepted, session created"
                );
                Ok(ChallengeOutcome::Accepted {
                    session_id: session.session_id,
                })
            }
        }
    }

    /// Withdraw a challenge. Only the original challenger may cancel, and
    /// only while the challenge is still pending.
    pub async fn cancel(
        &self,
        challenge_id: &str,
        requester_id: &str,
    ) -> Result<(), ChallengeServiceError> {
        let challenge = self
            .challenges
            .get_challenge(challenge_id)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?
            .filter(|c| c.challenger_id == requester_id && c.status == ChallengeStatus::Pending)
            .ok_or(ChallengeServiceError::ChallengeNotFound)?;

        let mut cancelled = challenge.clone();
        cancelled.status = ChallengeStatus::Cancelled;
        cancelled.responded_at = Some(Utc::now());
        self.challenges.update_pending_challenge(&cancelled).await?;
        Ok(())
    }
}
