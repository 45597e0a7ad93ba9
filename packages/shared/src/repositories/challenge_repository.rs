use crate::models::challenge::Challenge;
use crate::models::game_session::GameSession;
use crate::repositories::errors::challenge_repository_errors::ChallengeRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, Put, TransactWriteItem};
use aws_sdk_dynamodb::Client;
use serde_dynamo::{to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait ChallengeRepository: Send + Sync {
    async fn create_challenge(&self, challenge: &Challenge)
        -> Result<(), ChallengeRepositoryError>;

    async fn get_challenge(
        &self,
        challenge_id: &str,
    ) -> Result<Option<Challenge>, ChallengeRepositoryError>;

    /// The pending challenge between the two users of `pair_key`, in either
    /// direction, if one exists.
    async fn find_pending_by_pair(
        &self,
        pair_key: &str,
    ) -> Result<Option<Challenge>, ChallengeRepositoryError>;

    /// Replace the stored challenge, conditioned on it still being pending.
    /// Used for decline and cancel, the only mutations that do not create a
    /// session.
    async fn update_pending_challenge(
        &self,
        challenge: &Challenge,
    ) -> Result<(), ChallengeRepositoryError>;

    /// Commit the accepted challenge and its new session as one atomic
    /// unit. Neither write lands without the other: the challenge put is
    /// conditioned on still-pending, the session put on key absence.
    async fn accept_challenge(
        &self,
        challenge: &Challenge,
        session: &GameSession,
    ) -> Result<(), ChallengeRepositoryError>;
}

pub struct DynamoDbChallengeRepository {
    pub client: Client,
    pub challenges_table: String,
    pub sessions_table: String,
}

impl DynamoDbChallengeRepository {
    pub fn new(client: Client) -> Self {
        let challenges_table = std::env::var("CHALLENGES_TABLE")
            .expect("CHALLENGES_TABLE environment variable must be set");
        let sessions_table = std::env::var("GAME_SESSIONS_TABLE")
            .expect("GAME_SESSIONS_TABLE environment variable must be set");
        Self {
            client,
            challenges_table,
            sessions_table,
        }
    }

    fn pending_attribute() -> Result<aws_sdk_dynamodb::types::AttributeValue, ChallengeRepositoryError>
    {
        to_attribute_value("Pending")
            .map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ChallengeRepository for DynamoDbChallengeRepository {
    async fn create_challenge(
        &self,
        challenge: &Challenge,
    ) -> Result<(), ChallengeRepositoryError> {
        let item =
            to_item(challenge).map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.challenges_table)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(challenge_id)")
            .send()
            .await
            .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_challenge(
        &self,
        challenge_id: &str,
    ) -> Result<Option<Challenge>, ChallengeRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.challenges_table)
            .key(
                "challenge_id",
                to_attribute_value(challenge_id)
                    .map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let challenge: Challenge = serde_dynamo::from_item(item)
                .map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(challenge))
        } else {
            Ok(None)
        }
    }

    async fn find_pending_by_pair(
        &self,
        pair_key: &str,
    ) -> Result<Option<Challenge>, ChallengeRepositoryError> {
        let pair_key_attr: AttributeValue = to_attribute_value(pair_key)
            .map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;

        // The filter is applied after each page is read, so a page can come
        // back empty while a pending challenge sits on a later one. Follow
        // last_evaluated_key until a match or the end of the partition.
        let mut exclusive_start_key = None;
        loop {
            let result = self
                .client
                .query()
                .table_name(&self.challenges_table)
                .index_name("GSI_ChallengesByPair")
                .key_condition_expression("pair_key = :pair_key")
                .filter_expression("#status = :pending")
                .expression_attribute_names("#status", "status")
                .expression_attribute_values(":pair_key", pair_key_attr.clone())
                .expression_attribute_values(":pending", Self::pending_attribute()?)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(item) = result.items.and_then(|items| items.into_iter().next()) {
                let challenge: Challenge = serde_dynamo::from_item(item)
                    .map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;
                return Ok(Some(challenge));
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => return Ok(None),
            }
        }
    }

    async fn update_pending_challenge(
        &self,
        challenge: &Challenge,
    ) -> Result<(), ChallengeRepositoryError> {
        let item =
            to_item(challenge).map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.challenges_table)
            .set_item(Some(item))
            .condition_expression("attribute_exists(challenge_id) AND #status = :pending")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":pending", Self::pending_attribute()?)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    ChallengeRepositoryError::StateConflict
                } else {
                    ChallengeRepositoryError::DynamoDb(service_error.to_string())
                }
            })?;

        Ok(())
    }

    async fn accept_challenge(
        &self,
        challenge: &Challenge,
        session: &GameSession,
    ) -> Result<(), ChallengeRepositoryError> {
        let challenge_item =
            to_item(challenge).map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;
        let session_item =
            to_item(session).map_err(|e| ChallengeRepositoryError::Serialization(e.to_string()))?;

        let challenge_put = Put::builder()
            .table_name(&self.challenges_table)
            .set_item(Some(challenge_item))
            .condition_expression("attribute_exists(challenge_id) AND #status = :pending")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":pending", Self::pending_attribute()?)
            .build()
            .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;

        let session_put = Put::builder()
            .table_name(&self.sessions_table)
            .set_item(Some(session_item))
            .condition_expression("attribute_not_exists(session_id)")
            .build()
            .map_err(|e| ChallengeRepositoryError::DynamoDb(e.to_string()))?;

        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(challenge_put).build())
            .transact_items(TransactWriteItem::builder().put(session_put).build())
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_transaction_canceled_exception() {
                    ChallengeRepositoryError::StateConflict
                } else {
                    ChallengeRepositoryError::DynamoDb(service_error.to_string())
                }
            })?;

        Ok(())
    }
}
