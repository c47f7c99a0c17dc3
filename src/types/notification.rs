use crate::types::Location;
use serde::{Deserialize, Serialize};

/// An S3 event notification, as delivered to the function when CloudTrail
/// writes a new log file.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

impl Notification {
    /// Log file locations referenced by the notification, in the order listed.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.records.iter().map(NotificationRecord::location)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    pub s3: S3Entity,
}

impl NotificationRecord {
    pub fn location(&self) -> Location {
        Location::new(&self.s3.bucket.name, &self.s3.object.key)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct S3Object {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}
