use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use tip_totals_core::error::PublishError;

use crate::adapters::notifier::Notifier;

#[derive(Debug, Clone)]
pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
}

impl SnsNotifier {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, topic: &str, text: &str) -> Result<Option<String>, PublishError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .message(text)
            .send()
            .await
            .map_err(|error| {
                PublishError::new(format!(
                    "publish to '{topic}' failed: {}",
                    DisplayErrorContext(&error)
                ))
            })?;

        Ok(output.message_id().map(str::to_string))
    }
}
