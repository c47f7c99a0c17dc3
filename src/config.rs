use crate::error::Error;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Separator of list-valued environment settings.
pub const LIST_SEPARATOR: char = ',';

/// Settings of a single invocation.
///
/// Built once per invocation and passed explicitly to the filter and the
/// handler; nothing reads the process environment behind their back.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Principal ARNs (IAM users, or role ARNs issuing assumed-role sessions)
    /// exempt from alerting.
    pub allowed_principals: FxHashSet<String>,
    /// KMS key ARNs whose use is restricted.
    pub restricted_key_arns: FxHashSet<String>,
    /// SNS topic receiving the alerts.
    pub topic_arn: String,
}

impl Config {
    pub const ENV_ALLOWED_PRINCIPALS: &'static str = "ALLOWED_PRINCIPALS";
    pub const ENV_TOPIC_ARN: &'static str = "SNS_TOPIC_ARN";
    pub const ENV_RESTRICTED_KEY_ARNS: &'static str = "RESTRICTED_KMS_CMK_ARN";

    /// Required settings, in the order their presence is checked.
    pub const REQUIRED: [&'static str; 3] = [
        Self::ENV_ALLOWED_PRINCIPALS,
        Self::ENV_TOPIC_ARN,
        Self::ENV_RESTRICTED_KEY_ARNS,
    ];

    pub fn new<P, R, T>(allowed_principals: P, restricted_key_arns: R, topic_arn: T) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        T: Into<String>,
    {
        Self {
            allowed_principals: allowed_principals.into_iter().map(Into::into).collect(),
            restricted_key_arns: restricted_key_arns.into_iter().map(Into::into).collect(),
            topic_arn: topic_arn.into(),
        }
    }

    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the settings through `lookup`, which returns the raw value of a
    /// named setting or `None` when it is absent.
    ///
    /// Fails with [`Error::MissingSetting`] naming the first absent setting.
    /// An empty value counts as present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let [allowed, topic_arn, restricted] =
            Self::REQUIRED.map(|name| lookup(name).ok_or(Error::MissingSetting(name)));
        let (allowed, topic_arn, restricted) = (allowed?, topic_arn?, restricted?);

        Ok(Self {
            allowed_principals: split_list(&allowed),
            restricted_key_arns: split_list(&restricted),
            topic_arn,
        })
    }

    /// Parses a YAML configuration document.
    pub fn from_yaml_str(s: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn is_allowed_principal(&self, arn: &str) -> bool {
        self.allowed_principals.contains(arn)
    }

    pub fn is_restricted_key(&self, arn: &str) -> bool {
        self.restricted_key_arns.contains(arn)
    }
}

fn split_list(value: &str) -> FxHashSet<String> {
    value.split(LIST_SEPARATOR).map(str::to_owned).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    const USER: &str = "arn:aws:iam::123456789012:user/MyAllowedUser";
    const ROLE: &str = "arn:aws:iam::123456789012:role/MyAllowedRoleToBeAssumed";
    const KEY: &str = "arn:aws:kms:us-east-1:012345678901:key/8d3acf57-6bba-480a-9459-ed1b8e79d3d0";
    const TOPIC: &str = "arn:aws:sns:eu-west-1:123456789012:alert_topic";

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn from_lookup_splits_lists() {
        let vars = env(&[
            ("ALLOWED_PRINCIPALS", format!("{USER},{ROLE}").as_str()),
            ("SNS_TOPIC_ARN", TOPIC),
            ("RESTRICTED_KMS_CMK_ARN", KEY),
        ]);
        let cfg = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg, Config::new([USER, ROLE], [KEY], TOPIC));
        assert!(cfg.is_allowed_principal(USER));
        assert!(cfg.is_allowed_principal(ROLE));
        assert!(!cfg.is_allowed_principal(KEY));
        assert!(cfg.is_restricted_key(KEY));
    }

    #[test]
    fn list_entries_are_not_trimmed() {
        let vars = env(&[
            ("ALLOWED_PRINCIPALS", format!("{USER}, {ROLE}").as_str()),
            ("SNS_TOPIC_ARN", TOPIC),
            ("RESTRICTED_KMS_CMK_ARN", KEY),
        ]);
        let cfg = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert!(cfg.is_allowed_principal(USER));
        assert!(!cfg.is_allowed_principal(ROLE));
    }

    #[test]
    fn first_missing_setting_is_reported() {
        let vars = env(&[("RESTRICTED_KMS_CMK_ARN", KEY)]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, Error::MissingSetting("ALLOWED_PRINCIPALS")));
        assert_eq!(err.to_string(), "Failed because ALLOWED_PRINCIPALS is not set");

        let vars = env(&[("ALLOWED_PRINCIPALS", USER), ("RESTRICTED_KMS_CMK_ARN", KEY)]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, Error::MissingSetting("SNS_TOPIC_ARN")));

        let vars = env(&[("ALLOWED_PRINCIPALS", USER), ("SNS_TOPIC_ARN", TOPIC)]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, Error::MissingSetting("RESTRICTED_KMS_CMK_ARN")));
    }

    #[test]
    fn empty_values_are_present() {
        let vars = env(&[
            ("ALLOWED_PRINCIPALS", ""),
            ("SNS_TOPIC_ARN", TOPIC),
            ("RESTRICTED_KMS_CMK_ARN", KEY),
        ]);
        let cfg = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert!(!cfg.is_allowed_principal(USER));
    }

    #[test]
    fn from_yaml() {
        let doc = format!(
            "allowed-principals:\n  - {USER}\n  - {ROLE}\nrestricted-key-arns:\n  - {KEY}\ntopic-arn: {TOPIC}\n"
        );
        let cfg = Config::from_yaml_str(&doc).unwrap();
        assert_eq!(cfg, Config::new([USER, ROLE], [KEY], TOPIC));
    }

    #[test]
    fn from_yaml_rejects_missing_topic() {
        let doc = format!("allowed-principals: []\nrestricted-key-arns:\n  - {KEY}\n");
        assert!(matches!(
            Config::from_yaml_str(&doc),
            Err(Error::InvalidConfig(_))
        ));
    }
}
