use crate::types::{IdentityType, KmsAction, KMS_EVENT_SOURCE};
use internment::Intern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A member that can be absent (`None`), explicitly `null` (`Some(None)`) or
/// present (`Some(Some(_))`). Both absent and `null` serialize back as parsed.
pub type Nullable<T> = Option<Option<T>>;

fn present<T>(value: &Nullable<T>) -> Option<&T> {
    value.as_ref()?.as_ref()
}

/// Top-level document of a CloudTrail log file.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LogFile {
    #[serde(rename = "Records")]
    pub records: Vec<Record>,
}

/// A single CloudTrail event record.
///
/// Only the members the alert filter reads are typed; everything else is kept
/// in [`Record::other`] so that a serialized record carries the same content
/// it was parsed from, explicit `null`s included.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// ISO-8601 timestamp, ordered lexically.
    pub event_time: String,
    pub event_source: Intern<String>,
    pub event_name: Intern<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub user_identity: Nullable<UserIdentity>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub resources: Nullable<Vec<Resource>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Record {
    pub fn is_kms_event(&self) -> bool {
        self.event_source.as_str() == KMS_EVENT_SOURCE
    }

    pub fn kms_action(&self) -> Option<KmsAction> {
        KmsAction::from_event_name(self.event_name.as_str())
    }

    pub fn user_identity(&self) -> Option<&UserIdentity> {
        present(&self.user_identity)
    }

    /// ARNs of the affected resources, skipping entries without one.
    pub fn resource_arns(&self) -> impl Iterator<Item = &str> + '_ {
        present(&self.resources)
            .into_iter()
            .flatten()
            .filter_map(Resource::arn)
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub identity_type: Nullable<IdentityType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub arn: Nullable<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub session_context: Nullable<SessionContext>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl UserIdentity {
    pub fn identity_type(&self) -> Option<&IdentityType> {
        present(&self.identity_type)
    }

    pub fn arn(&self) -> Option<&str> {
        present(&self.arn).map(String::as_str)
    }

    /// ARN of the entity that issued the temporary credentials of an assumed role.
    pub fn session_issuer_arn(&self) -> Option<&str> {
        present(&present(&self.session_context)?.session_issuer)?.arn()
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub session_issuer: Nullable<SessionIssuer>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct SessionIssuer {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub arn: Nullable<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SessionIssuer {
    pub fn arn(&self) -> Option<&str> {
        present(&self.arn).map(String::as_str)
    }
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(
        rename = "ARN",
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub arn: Nullable<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Resource {
    pub fn arn(&self) -> Option<&str> {
        present(&self.arn).map(String::as_str)
    }
}
