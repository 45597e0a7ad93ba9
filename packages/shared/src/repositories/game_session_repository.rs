use crate::models::game_session::GameSession;
use crate::repositories::errors::game_session_repository_errors::GameSessionRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

/// Keyed persistence for game sessions.
///
/// Every mutation goes through `update_game_session`, which is conditioned
/// on the version the caller read. A write that loses the race fails with
/// `VersionConflict` instead of overwriting; this is the whole of the
/// optimistic-concurrency contract.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait GameSessionRepository: Send + Sync {
    async fn create_game_session(
        &self,
        game_session: &GameSession,
    ) -> Result<(), GameSessionRepositoryError>;

    async fn get_game_session(
        &self,
        session_id: &str,
    ) -> Result<Option<GameSession>, GameSessionRepositoryError>;

    /// Replace the stored session, conditioned on the stored item still
    /// having `version == expected_version` and an active status.
    async fn update_game_session(
        &self,
        game_session: &GameSession,
        expected_version: u64,
    ) -> Result<(), GameSessionRepositoryError>;
}

pub struct DynamoDbGameSessionRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbGameSessionRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("GAME_SESSIONS_TABLE")
            .expect("GAME_SESSIONS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl GameSessionRepository for DynamoDbGameSessionRepository {
    async fn create_game_session(
        &self,
        game_session: &GameSession,
    ) -> Result<(), GameSessionRepositoryError> {
        let item = to_item(game_session)
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(session_id)")
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    GameSessionRepositoryError::AlreadyExists
                } else {
                    GameSessionRepositoryError::DynamoDb(service_error.to_string())
                }
            })?;

        Ok(())
    }

    async fn get_game_session(
        &self,
        session_id: &str,
    ) -> Result<Option<GameSession>, GameSessionRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "session_id",
                to_attribute_value(session_id)
                    .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| GameSessionRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let game_session: GameSession = serde_dynamo::from_item(item)
                .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(game_session))
        } else {
            Ok(None)
        }
    }

    async fn update_game_session(
        &self,
        game_session: &GameSession,
        expected_version: u64,
    ) -> Result<(), GameSessionRepositoryError> {
        let item = to_item(game_session)
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;
        let expected = to_attribute_value(expected_version)
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;
        let active = to_attribute_value("Active")
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            // "version" and "status" are DynamoDB reserved words.
            .condition_expression(
                "attribute_exists(session_id) AND #version = :expected AND #status = :active",
            )
            .expression_attribute_names("#version", "version")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":expected", expected)
            .expression_attribute_values(":active", active)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    GameSessionRepositoryError::VersionConflict
                } else {
                    GameSessionRepositoryError::DynamoDb(service_error.to_string())
                }
            })?;

        Ok(())
    }
}
