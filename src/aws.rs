//! S3 and SNS backed implementations of the service traits.

use crate::{
    error::BoxError,
    loader::ObjectStore,
    notify::{AlertMessage, Notifier},
    types::Location,
};
use async_trait::async_trait;
use aws_config::SdkConfig;
use bytes::Bytes;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_s3::Client::new(config))
    }

    pub fn from_client(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get(&self, location: &Location) -> Result<Bytes, BoxError> {
        let output = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await?;
        let body = output.body.collect().await?;
        Ok(body.into_bytes())
    }
}

#[derive(Clone, Debug)]
pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
}

impl SnsNotifier {
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_sns::Client::new(config))
    }

    pub fn from_client(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, topic_arn: &str, message: &AlertMessage) -> Result<(), BoxError> {
        let output = self
            .client
            .publish()
            .target_arn(topic_arn)
            .message(message.body())
            .message_structure(AlertMessage::MESSAGE_STRUCTURE)
            .send()
            .await?;
        debug!(
            topic_arn,
            message_id = output.message_id(),
            records = message.record_count(),
            "Published alert"
        );
        Ok(())
    }
}
