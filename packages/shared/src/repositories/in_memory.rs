//! Test-only store giving the same conditional-write semantics as the
//! DynamoDB repositories, so service tests exercise real lost-race paths.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::challenge::{Challenge, ChallengeStatus};
use crate::models::game_session::{GameSession, SessionStatus};
use crate::repositories::challenge_repository::ChallengeRepository;
use crate::repositories::errors::challenge_repository_errors::ChallengeRepositoryError;
use crate::repositories::errors::game_session_repository_errors::GameSessionRepositoryError;
use crate::repositories::game_session_repository::GameSessionRepository;

#[derive(Default)]
pub struct InMemoryStore {
    sessions: Mutex<HashMap<String, GameSession>>,
    challenges: Mutex<HashMap<String, Challenge>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a stored session unconditionally, for test setup.
    pub fn put_session(&self, session: GameSession) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id.clone(), session);
    }

    pub fn session(&self, session_id: &str) -> Option<GameSession> {
        self.sessions.lock().unwrap().get(session_id).cloned()
    }

    pub fn challenge(&self, challenge_id: &str) -> Option<Challenge> {
        self.challenges.lock().unwrap().get(challenge_id).cloned()
    }
}

#[async_trait]
impl GameSessionRepository for InMemoryStore {
    async fn create_game_session(
        &self,
        game_session: &GameSession,
    ) -> Result<(), GameSessionRepositoryError> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(&game_session.session_id) {
            return Err(GameSessionRepositoryError::AlreadyExists);
        }
        sessions.insert(game_session.session_id.clone(), game_session.clone());
        Ok(())
    }

    async fn get_game_session(
        &self,
        session_id: &str,
    ) -> Result<Option<GameSession>, GameSessionRepositoryError> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn update_game_session(
        &self,
        game_session: &GameSession,
        expected_version: u64,
    ) -> Result<(), GameSessionRepositoryError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get(&game_session.session_id) {
            Some(stored)
                if stored.version == expected_version
                    && stored.status == SessionStatus::Active =>
            {
                sessions.insert(game_session.session_id.clone(), game_session.clone());
                Ok(())
            }
            Some(_) => Err(GameSessionRepositoryError::VersionConflict),
            None => Err(GameSessionRepositoryError::VersionConflict),
        }
    }
}

#[async_trait]
impl ChallengeRepository for InMemoryStore {
    async fn create_challenge(
        &self,
        challenge: &Challenge,
    ) -> Result<(), ChallengeRepositoryError> {
        self.challenges
            .lock()
            .unwrap()
            .insert(challenge.challenge_id.clone(), challenge.clone());
        Ok(())
    }

    async fn get_challenge(
        &self,
        challenge_id: &str,
    ) -> Result<Option<Challenge>, ChallengeRepositoryError> {
        Ok(self.challenges.lock().unwrap().get(challenge_id).cloned())
    }

    async fn find_pending_by_pair(
        &self,
        pair_key: &str,
    ) -> Result<Option<Challenge>, ChallengeRepositoryError> {
        Ok(self
            .challenges
            .lock()
            .unwrap()
            .values()
            .find(|c| c.pair_key == pair_key && c.status == ChallengeStatus::Pending)
            .cloned())
    }

    async fn update_pending_challenge(
        &self,
        challenge: &Challenge,
    ) -> Result<(), ChallengeRepositoryError> {
        let mut challenges = self.challenges.lock().unwrap();
        match challenges.get(&challenge.challenge_id) {
            Some(stored) if stored.status == ChallengeStatus::Pending => {
                challenges.insert(challenge.challenge_id.clone(), challenge.clone());
                Ok(())
            }
            _ => Err(ChallengeRepositoryError::StateConflict),
        }
    }

    async fn accept_challenge(
        &self,
        challenge: &Challenge,
        session: &GameSession,
    ) -> Result<(), ChallengeRepositoryError> {
        // Both locks held for the duration of the write, matching the
        // all-or-nothing transaction of the DynamoDB implementation.
        let mut challenges = self.challenges.lock().unwrap();
        let mut sessions = self.sessions.lock().unwrap();

        match challenges.get(&challenge.challenge_id) {
            Some(stored) if stored.status == ChallengeStatus::Pending => {}
            _ => return Err(ChallengeRepositoryError::StateConflict),
        }
        if sessions.contains_key(&session.session_id) {
            return Err(ChallengeRepositoryError::StateConflict);
        }

        challenges.insert(challenge.challenge_id.clone(), challenge.clone());
        sessions.insert(session.session_id.clone(), session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_requires_matching_version() {
        let store = InMemoryStore::new();
        let session = GameSession::new("w", "b", 600);
        store.create_game_session(&session).await.unwrap();

        let mut updated = session.clone();
        updated.version = 1;

        // Wrong expected version loses.
        let lost = store.update_game_session(&updated, 5).await;
        assert!(matches!(
            lost,
            Err(GameSessionRepositoryError::VersionConflict)
        ));

        // Matching expected version wins.
        store.update_game_session(&updated, 0).await.unwrap();
        assert_eq!(store.session(&session.session_id).unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_update_rejected_once_completed() {
        let store = InMemoryStore::new();
        let mut session = GameSession::new("w", "b", 600);
        session.status = SessionStatus::Completed;
        store.put_session(session.clone());

        let result = store.update_game_session(&session, session.version).await;
        assert!(matches!(
            result,
            Err(GameSessionRepositoryError::VersionConflict)
        ));
    }

    #[tokio::test]
    async fn test_accept_challenge_requires_pending() {
        let store = InMemoryStore::new();
        let mut challenge = Challenge::new("a", "b", 600);
        store.create_challenge(&challenge).await.unwrap();

        challenge.status = ChallengeStatus::Accepted;
        let session = GameSession::new("a", "b", 600);
        store.accept_challenge(&challenge, &session).await.unwrap();

        // A second accept must fail and leave no extra session behind.
        let session2 = GameSession::new("a", "b", 600);
        let result = store.accept_challenge(&challenge, &session2).await;
        assert!(matches!(result, Err(ChallengeRepositoryError::StateConflict)));
        assert!(store.session(&session2.session_id).is_none());
    }
}
