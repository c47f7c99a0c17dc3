use derive_more::Display;
use serde::{Deserialize, Serialize};

pub use notification::{Notification, NotificationRecord, S3Bucket, S3Entity, S3Object};
pub use record::{LogFile, Nullable, Record, Resource, SessionContext, SessionIssuer, UserIdentity};

pub mod notification;
pub mod record;

/// `eventSource` of records emitted by the key management service.
pub const KMS_EVENT_SOURCE: &str = "kms.amazonaws.com";

/// A log file object, addressed by bucket and key.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize)]
#[display("s3://{bucket}/{key}")]
pub struct Location {
    pub bucket: String,
    pub key: String,
}

impl Location {
    pub fn new<B: Into<String>, K: Into<String>>(bucket: B, key: K) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// Key management operations that raise an alert on restricted keys.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub enum KmsAction {
    #[display("Encrypt")]
    Encrypt,
    #[display("Decrypt")]
    Decrypt,
    #[display("ReEncrypt")]
    ReEncrypt,
}

impl KmsAction {
    pub const ALL: [KmsAction; 3] = [KmsAction::Encrypt, KmsAction::Decrypt, KmsAction::ReEncrypt];

    /// Returns the filtered action matching a record's `eventName`, if any.
    pub fn from_event_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypt",
            Self::Decrypt => "Decrypt",
            Self::ReEncrypt => "ReEncrypt",
        }
    }
}

/// The `userIdentity.type` tag of a record.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdentityType {
    #[display("IAMUser")]
    IamUser,
    #[display("AssumedRole")]
    AssumedRole,
    #[display("{_0}")]
    Other(String),
}

impl From<String> for IdentityType {
    fn from(v: String) -> Self {
        match v.as_str() {
            "IAMUser" => Self::IamUser,
            "AssumedRole" => Self::AssumedRole,
            _ => Self::Other(v),
        }
    }
}

impl From<IdentityType> for String {
    fn from(v: IdentityType) -> Self {
        match v {
            IdentityType::Other(s) => s,
            t => t.to_string(),
        }
    }
}
