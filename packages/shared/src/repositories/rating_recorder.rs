use crate::models::completed_game::CompletedGameRecord;
use crate::repositories::errors::rating_recorder_errors::RatingRecorderError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::to_item;

#[cfg(test)]
use mockall::automock;

/// Downstream rating/statistics collaborator. Invoked once per completed
/// session, fire-and-forget: the arbiter logs a failure and moves on.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait RatingRecorder: Send + Sync {
    async fn record_completed_game(
        &self,
        record: &CompletedGameRecord,
    ) -> Result<(), RatingRecorderError>;
}

pub struct DynamoDbRatingRecorder {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbRatingRecorder {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("GAME_RESULTS_TABLE")
            .expect("GAME_RESULTS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl RatingRecorder for DynamoDbRatingRecorder {
    async fn record_completed_game(
        &self,
        record: &CompletedGameRecord,
    ) -> Result<(), RatingRecorderError> {
        let item =
            to_item(record).map_err(|e| RatingRecorderError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| RatingRecorderError::DynamoDb(e.to_string()))?;

        Ok(())
    }
}
