use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
}

/// A pending invitation from one user to another to start a game.
///
/// `pair_key` is the two player ids in sorted order joined with `#`; it is
/// the hash key of the GSI used to find an existing pending challenge
/// between two users regardless of who sent it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge_id: String,
    pub challenger_id: String,
    pub challenged_id: String,
    pub pair_key: String,
    pub time_control_secs: u64,
    pub status: ChallengeStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub session_id: Option<String>,
}

impl Challenge {
    pub fn new(challenger_id: &str, challenged_id: &str, time_control_secs: u64) -> Self {
        Challenge {
            challenge_id: Uuid::new_v4().to_string(),
            challenger_id: challenger_id.to_string(),
            challenged_id: challenged_id.to_string(),
            pair_key: Self::pair_key(challenger_id, challenged_id),
            time_control_secs,
            status: ChallengeStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
            session_id: None,
        }
    }

    pub fn pair_key(a: &str, b: &str) -> String {
        if a <= b {
            format!("{}#{}", a, b)
        } else {
            format!("{}#{}", b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_challenge_is_pending() {
        let challenge = Challenge::new("alice", "bob", 600);

        assert!(!challenge.challenge_id.is_empty());
        assert_eq!(challenge.challenger_id, "alice");
        assert_eq!(challenge.challenged_id, "bob");
        assert_eq!(challenge.time_control_secs, 600);
        assert_eq!(challenge.status, ChallengeStatus::Pending);
        assert!(challenge.responded_at.is_none());
        assert!(challenge.session_id.is_none());
    }

    #[test]
    fn test_pair_key_is_direction_independent() {
        assert_eq!(
            Challenge::pair_key("alice", "bob"),
            Challenge::pair_key("bob", "alice")
        );
        assert_eq!(Challenge::pair_key("alice", "bob"), "alice#bob");
    }

    #[test]
    fn test_challenges_in_either_direction_share_pair_key() {
        let forward = Challenge::new("alice", "bob", 300);
        let reverse = Challenge::new("bob", "alice", 300);

        assert_eq!(forward.pair_key, reverse.pair_key);
        assert_ne!(forward.challenge_id, reverse.challenge_id);
    }

    #[test]
    fn test_challenge_serialization_roundtrip() {
        let challenge = Challenge::new("alice", "bob", 900);

        let serialized = serde_json::to_string(&challenge).unwrap();
        let deserialized: Challenge = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.challenge_id, challenge.challenge_id);
        assert_eq!(deserialized.pair_key, challenge.pair_key);
        assert_eq!(deserialized.status, ChallengeStatus::Pending);
    }
}
