use crate::{
    error::{BoxError, Error},
    types::Record,
};
use async_trait::async_trait;
use serde::Serialize;

/// Delivery of alert messages to a notification topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic_arn: &str, message: &AlertMessage) -> Result<(), BoxError>;
}

/// An alert message in the SNS JSON message structure.
///
/// The body is `{"default": "<matched records as a JSON string>"}`, so every
/// delivery protocol receives the JSON array of matched records.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AlertMessage {
    body: String,
    record_count: usize,
}

#[derive(Serialize)]
struct Envelope<'a> {
    default: &'a str,
}

impl AlertMessage {
    /// Value of the SNS `MessageStructure` parameter matching [`AlertMessage::body`].
    pub const MESSAGE_STRUCTURE: &'static str = "json";

    pub fn from_records(records: &[Record]) -> Result<Self, Error> {
        let payload = serde_json::to_string(records).map_err(Error::Encode)?;
        let body = serde_json::to_string(&Envelope { default: &payload }).map_err(Error::Encode)?;
        Ok(Self {
            body,
            record_count: records.len(),
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }
}
