use crate::models::user::PlayerSummary;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value};

#[cfg(test)]
use mockall::automock;

/// Narrow read-only view of the platform users table. This subsystem only
/// needs the public summary shown alongside a session.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait UserRepository: Send + Sync {
    async fn get_player_summary(
        &self,
        user_id: &str,
    ) -> Result<PlayerSummary, UserRepositoryError>;
}

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("USERS_TABLE").expect("USERS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn get_player_summary(
        &self,
        user_id: &str,
    ) -> Result<PlayerSummary, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                "id",
                to_attribute_value(user_id)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = output.item {
            let summary: PlayerSummary =
                from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
            Ok(summary)
        } else {
            Err(UserRepositoryError::NotFound)
        }
    }
}
