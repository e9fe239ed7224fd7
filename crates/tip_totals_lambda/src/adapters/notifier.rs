use async_trait::async_trait;
use tip_totals_core::error::PublishError;

/// Topic publish endpoint. One call is at most one publish attempt.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns the message id assigned by the topic, when it reports one.
    async fn publish(&self, topic: &str, text: &str) -> Result<Option<String>, PublishError>;
}

#[async_trait]
impl<'a, T> Notifier for &'a T
where
    T: Notifier + ?Sized,
{
    async fn publish(&self, topic: &str, text: &str) -> Result<Option<String>, PublishError> {
        (**self).publish(topic, text).await
    }
}
