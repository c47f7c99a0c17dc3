//! Decides whether a CloudTrail record is a restricted KMS key operation
//! performed by a principal outside the allow-list.

use crate::{
    config::Config,
    types::{IdentityType, Record},
};
use tracing::trace;

/// The evaluated sub-conditions of the alert predicate for one record.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct AlertCheck {
    /// `eventSource` is the key management service.
    pub kms_event: bool,
    /// `eventName` is one of the filtered [`KmsAction`](crate::types::KmsAction)s.
    pub filtered_action: bool,
    /// At least one affected resource is a restricted key.
    pub restricted_resource: bool,
    /// The acting principal is allow-listed.
    pub principal_allowed: bool,
}

impl AlertCheck {
    pub fn evaluate(record: &Record, config: &Config) -> Self {
        let check = Self {
            kms_event: is_kms_event(record),
            filtered_action: is_filtered_action(record),
            restricted_resource: is_restricted_resource(record, config),
            principal_allowed: is_principal_allowed(record, config),
        };
        trace!(
            event_time = %record.event_time,
            event_name = record.event_name.as_str(),
            kms_event = check.kms_event,
            filtered_action = check.filtered_action,
            restricted_resource = check.restricted_resource,
            principal_allowed = check.principal_allowed,
            "Evaluated record"
        );
        check
    }

    pub fn should_alert(&self) -> bool {
        self.kms_event && self.filtered_action && self.restricted_resource && !self.principal_allowed
    }
}

/// Returns true when `record` is a filtered KMS operation on a restricted key
/// by a principal that is not allow-listed.
pub fn should_alert(record: &Record, config: &Config) -> bool {
    AlertCheck::evaluate(record, config).should_alert()
}

pub fn is_kms_event(record: &Record) -> bool {
    record.is_kms_event()
}

pub fn is_filtered_action(record: &Record) -> bool {
    record.kms_action().is_some()
}

/// A record without resources cannot be scoped to a key, so it never counts
/// as touching a restricted one.
pub fn is_restricted_resource(record: &Record, config: &Config) -> bool {
    record.resource_arns().any(|arn| config.is_restricted_key(arn))
}

/// Whether the principal behind `record` is allow-listed.
///
/// IAM users are matched on their own ARN, assumed roles on the ARN of the
/// session issuer; an assumed role without session issuer is not allowed.
/// Any other identity type, or a record without one, is treated as allowed.
pub fn is_principal_allowed(record: &Record, config: &Config) -> bool {
    let Some(identity) = record.user_identity() else {
        return true;
    };

    match identity.identity_type() {
        Some(IdentityType::IamUser) => identity
            .arn()
            .is_some_and(|arn| config.is_allowed_principal(arn)),
        Some(IdentityType::AssumedRole) => identity
            .session_issuer_arn()
            .is_some_and(|arn| config.is_allowed_principal(arn)),
        // TODO: decide whether unrecognized identity types should fail closed
        Some(IdentityType::Other(_)) | None => true,
    }
}
